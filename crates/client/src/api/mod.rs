//! REST client for the medical-store backend.
//!
//! All requests funnel through shared verb helpers that attach the bearer
//! token (when the caller passes one), map non-success statuses onto
//! [`ApiError`], and parse success bodies into the typed schemas in
//! [`types`].
//!
//! The client holds no credential state: the session token is passed
//! explicitly into every authenticated call, and session invalidation on
//! auth failure is the caller's job (see [`crate::session`]).
//!
//! # Error normalization
//!
//! The backend reports failures as `{"detail": "..."}`. When that field is
//! present it becomes the error message; otherwise a generic `API Error`
//! stands in. 401/403 are classified separately so callers can tell an auth
//! rejection from other failures when logging.

mod types;

pub use types::*;

use std::sync::Arc;

use medipos_core::{ProductId, SessionToken};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;

/// Fallback error message when the backend gives no `detail` field.
const GENERIC_API_ERROR: &str = "API Error";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend responded with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Backend rejected the credential (401/403).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Success status but the body did not match the endpoint schema.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Typed backend client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
            }),
        })
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    /// `POST /login` - exchange credentials for a bearer token.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post("/login", None, request).await
    }

    /// `POST /register` - create a tenant/company account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.post_unit("/register", None, request).await
    }

    /// `GET /dashboard` - aggregate KPIs.
    pub async fn dashboard(&self, token: &SessionToken) -> Result<DashboardSummary, ApiError> {
        self.get("/dashboard", Some(token)).await
    }

    /// `GET /products` - full inventory list.
    pub async fn list_products(&self, token: &SessionToken) -> Result<Vec<Product>, ApiError> {
        self.get("/products", Some(token)).await
    }

    /// `POST /products` - create an inventory item.
    ///
    /// The response body is ignored; callers re-fetch the full list instead
    /// of merging incrementally.
    pub async fn create_product(
        &self,
        token: &SessionToken,
        payload: &ProductPayload,
    ) -> Result<(), ApiError> {
        self.post_unit("/products", Some(token), payload).await
    }

    /// `PUT /products/{id}` - update an inventory item.
    pub async fn update_product(
        &self,
        token: &SessionToken,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), ApiError> {
        self.put_unit(&format!("/products/{id}"), Some(token), payload)
            .await
    }

    /// `DELETE /products/{id}` - remove an inventory item.
    pub async fn delete_product(&self, token: &SessionToken, id: ProductId) -> Result<(), ApiError> {
        self.delete(&format!("/products/{id}"), Some(token)).await
    }

    /// `GET /sales` - sales history.
    pub async fn list_sales(&self, token: &SessionToken) -> Result<Vec<SaleRecord>, ApiError> {
        self.get("/sales", Some(token)).await
    }

    /// `POST /sales` - record one sale line.
    pub async fn create_sale(
        &self,
        token: &SessionToken,
        request: &SaleRequest,
    ) -> Result<(), ApiError> {
        self.post_unit("/sales", Some(token), request).await
    }

    // =========================================================================
    // Verb helpers
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    fn authorize(
        builder: reqwest::RequestBuilder,
        token: Option<&SessionToken>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Execute a GET request and parse the typed response.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&SessionToken>,
    ) -> Result<T, ApiError> {
        let builder = self.inner.client.get(self.url(path));
        let response = Self::authorize(builder, token).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request and parse the typed response.
    async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        token: Option<&SessionToken>,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.inner.client.post(self.url(path)).json(body);
        let response = Self::authorize(builder, token).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request, discarding the response body.
    async fn post_unit<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        token: Option<&SessionToken>,
        body: &B,
    ) -> Result<(), ApiError> {
        let builder = self.inner.client.post(self.url(path)).json(body);
        let response = Self::authorize(builder, token).send().await?;
        Self::expect_success(response).await
    }

    /// Execute a PUT request, discarding the response body.
    async fn put_unit<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        token: Option<&SessionToken>,
        body: &B,
    ) -> Result<(), ApiError> {
        let builder = self.inner.client.put(self.url(path)).json(body);
        let response = Self::authorize(builder, token).send().await?;
        Self::expect_success(response).await
    }

    /// Execute a DELETE request.
    async fn delete(&self, path: &str, token: Option<&SessionToken>) -> Result<(), ApiError> {
        let builder = self.inner.client.delete(self.url(path));
        let response = Self::authorize(builder, token).send().await?;
        Self::expect_success(response).await
    }

    /// Parse a success body into the endpoint schema.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Check the status only; writes ignore their response bodies.
    async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Normalize an error response, pulling the backend's `detail` field
    /// out of the body when present.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.detail.unwrap_or_else(|| GENERIC_API_ERROR.to_owned()),
            Err(_) => GENERIC_API_ERROR.to_owned(),
        };

        if status == 401 || status == 403 {
            return ApiError::Unauthorized(message);
        }

        ApiError::Api { status, message }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Error body shape shared by every backend endpoint.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}
