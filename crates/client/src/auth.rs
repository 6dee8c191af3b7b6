//! Login, registration, and logout flows.
//!
//! All input validation happens before any network call; the backend is
//! only reached once the form is structurally sound.

use medipos_core::{Email, EmailError, SessionCredential, SessionToken, UserProfile};
use thiserror::Error;

use crate::api::{ApiClient, ApiError, LoginRequest, RegisterRequest};
use crate::session::{SessionError, SessionStore};

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors that can occur during authentication flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was left empty.
    #[error("all fields are required")]
    MissingFields,

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Structurally invalid email address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Backend rejected the request; carries the backend's `detail` message.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session file could not be updated.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Login form input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Persist the email for pre-filling the next login.
    pub remember: bool,
}

/// Registration form input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub company: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Exchange credentials for a bearer token and store it.
///
/// On success the issued token is written to the session store (the single
/// ownership point for credentials); with `remember` set the email is
/// persisted too.
///
/// # Errors
///
/// Validation failures abort before any network call; backend rejections
/// surface the response `detail`.
pub async fn login(
    api: &ApiClient,
    store: &SessionStore,
    credentials: &Credentials,
) -> Result<SessionCredential, AuthError> {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    let email = Email::parse(&credentials.email)?;

    let response = api
        .login(&LoginRequest {
            email: email.as_str().to_owned(),
            password: credentials.password.clone(),
        })
        .await?;

    store.store_token(SessionToken::new(response.access_token))?;
    if credentials.remember {
        store.remember_email(email.as_str())?;
    }

    tracing::info!("logged in as {email}");
    store.require().map_err(AuthError::from)
}

/// Create a tenant/company account.
///
/// On success the denormalized `{company, email}` display object is
/// persisted so later views can greet the user; the caller still has to
/// log in to obtain a token.
///
/// # Errors
///
/// Validation failures (missing fields, mismatch, short password, bad
/// email) abort before any network call.
pub async fn register(
    api: &ApiClient,
    store: &SessionStore,
    registration: &Registration,
) -> Result<UserProfile, AuthError> {
    if registration.company.is_empty()
        || registration.email.is_empty()
        || registration.password.is_empty()
        || registration.confirm.is_empty()
    {
        return Err(AuthError::MissingFields);
    }
    if registration.password != registration.confirm {
        return Err(AuthError::PasswordMismatch);
    }
    if registration.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }
    let email = Email::parse(&registration.email)?;

    api.register(&RegisterRequest {
        name: registration.company.clone(),
        email: email.as_str().to_owned(),
        password: registration.password.clone(),
    })
    .await?;

    let profile = UserProfile {
        company: registration.company.clone(),
        email: email.into_inner(),
    };
    store.remember_user(profile.clone())?;

    tracing::info!("registered store account for {}", profile.company);
    Ok(profile)
}

/// Drop the stored token. Display object and remembered email survive.
///
/// # Errors
///
/// Returns an error when the session file cannot be written.
pub fn logout(store: &SessionStore) -> Result<(), SessionError> {
    store.clear()
}
