//! # API Error Type
//!
//! Unified error type for dashboard commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Dashboard                          │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                  │
//! │         │                                                               │
//! │         ├── CoreError::OutOfStock ───────► OUT_OF_STOCK                 │
//! │         ├── CoreError::EmptyCart ────────► EMPTY_CART                   │
//! │         ├── ValidationError::Missing.. ──► MISSING_INFORMATION          │
//! │         ├── CoreError::PermissionDenied ─► PERMISSION_DENIED            │
//! │         ├── StorageError ────────────────► STORAGE_ERROR                │
//! │         └── Success                                                     │
//! │                                                                         │
//! │  The frontend shows a toast: heading = `title`, body = `message`.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No error is fatal; every one of them ends as a notification.

use bakery_core::{CoreError, ValidationError};
use serde::Serialize;

use crate::storage::StorageError;

/// API error returned from commands.
///
/// ```json
/// {
///   "code": "OUT_OF_STOCK",
///   "title": "Out of Stock",
///   "message": "Glazed Donut is currently out of stock"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Notification heading
    pub title: String,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Required form fields are empty
    MissingInformation,

    /// Product has no stock
    OutOfStock,

    /// Requested quantity exceeds stock
    InsufficientStock,

    /// Checkout with an empty cart
    EmptyCart,

    /// Cart limits exceeded or line missing
    CartError,

    /// Nobody is signed in
    NotSignedIn,

    /// Signed in, but the role lacks the permission
    PermissionDenied,

    /// Wrong email/password or inactive account
    InvalidCredentials,

    /// Session record could not be written or removed
    StorageError,
}

impl ApiError {
    pub fn new(code: ErrorCode, title: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            code,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            "Not Found",
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, "Invalid Input", message)
    }

    pub fn not_signed_in() -> Self {
        ApiError::new(
            ErrorCode::NotSignedIn,
            "Not Signed In",
            "Please sign in to continue",
        )
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingFields { .. } | ValidationError::Required { .. } => {
                ApiError::new(
                    ErrorCode::MissingInformation,
                    "Missing Information",
                    err.to_string(),
                )
            }
            other => ApiError::validation(other.to_string()),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Bulk order", &id),
            CoreError::AccountNotFound(id) => ApiError::not_found("Account", &id),
            CoreError::OutOfStock { .. } => {
                ApiError::new(ErrorCode::OutOfStock, "Out of Stock", message)
            }
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, "Insufficient Stock", message)
            }
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, "Empty Cart", message),
            CoreError::LineNotInCart(_) | CoreError::CartTooLarge { .. } => {
                ApiError::new(ErrorCode::CartError, "Cart Error", message)
            }
            CoreError::QuantityTooLarge { .. } => ApiError::validation(message),
            CoreError::InvalidCredentials | CoreError::AccountInactive(_) => {
                ApiError::new(ErrorCode::InvalidCredentials, "Login Failed", message)
            }
            CoreError::PermissionDenied(_) => {
                ApiError::new(ErrorCode::PermissionDenied, "Access Denied", message)
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Session storage failed: {}", err);
        ApiError::new(
            ErrorCode::StorageError,
            "Storage Error",
            "Could not save your session on this device",
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}: {}", self.code, self.title, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use bakery_core::Permission;

    #[test]
    fn test_core_error_titles() {
        let err = ApiError::from(CoreError::OutOfStock {
            name: "Glazed Donut".to_string(),
        });
        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert_eq!(err.title, "Out of Stock");
        assert_eq!(err.message, "Glazed Donut is currently out of stock");

        let err = ApiError::from(CoreError::InsufficientStock {
            name: "Croissant".to_string(),
            available: 3,
            requested: 4,
        });
        assert_eq!(err.title, "Insufficient Stock");
        assert_eq!(err.message, "Only 3 Croissant available");

        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.title, "Empty Cart");
        assert_eq!(err.message, "Please add items to cart before checkout");

        let err = ApiError::from(CoreError::PermissionDenied(Permission::ManageUsers));
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(err.title, "Access Denied");
    }

    #[test]
    fn test_missing_fields_title() {
        let err = ApiError::from(CoreError::Validation(ValidationError::MissingFields {
            fields: vec!["customer name".to_string()],
        }));
        assert_eq!(err.code, ErrorCode::MissingInformation);
        assert_eq!(err.title, "Missing Information");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::from(CoreError::EmptyCart)).unwrap();
        assert_eq!(json["code"], "EMPTY_CART");
        assert_eq!(json["title"], "Empty Cart");
    }
}
