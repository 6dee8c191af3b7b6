//! Unified error handling for the client.
//!
//! Each module keeps its own error enum; [`AppError`] aggregates them at
//! the frontend boundary so a command can bubble any failure with `?` and
//! report it in one place.

use thiserror::Error;

use crate::api::ApiError;
use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::inventory::InventoryError;
use crate::pos::{CartWarning, CheckoutError, InvoiceError};
use crate::session::SessionError;

/// Application-level error type for the terminal frontend.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session file problem or no stored credential.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Login or registration failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Inventory write rejected.
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Cart mutation rejected.
    #[error("{0}")]
    Cart(#[from] CartWarning),

    /// Checkout aborted or partially failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Invoice artifact could not be produced.
    #[error("Invoice error: {0}")]
    Invoice(#[from] InvoiceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_warning_message_is_unwrapped() {
        let error = AppError::from(CartWarning::OutOfStock {
            name: "Syrup".to_owned(),
        });
        assert_eq!(error.to_string(), "Syrup is out of stock");
    }

    #[test]
    fn test_session_error_is_prefixed() {
        let error = AppError::from(SessionError::AuthRequired);
        assert!(error.to_string().starts_with("Session error:"));
    }
}
