//! # Error Types
//!
//! Domain-specific error types for bakery-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bakery-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bakery-dashboard errors (app crate)                                   │
//! │  ├── StorageError     - Session record read/write failures             │
//! │  ├── ConfigError      - Config file / environment problems             │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → notification toast     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure in this crate is a rejected mutation: the state that was
//! passed in is left exactly as it was.

use thiserror::Error;

use crate::auth::Permission;
use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalogue.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product has no stock at all.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "Chocolate Truffle Cake" (stock: 0)
    ///      │
    ///      ▼
    /// OutOfStock { name: "Chocolate Truffle Cake" }
    ///      │
    ///      ▼
    /// Toast: "Chocolate Truffle Cake is currently out of stock"
    /// ```
    #[error("{name} is currently out of stock")]
    OutOfStock { name: String },

    /// Requested quantity exceeds current stock.
    #[error("Only {available} {name} available")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Product has no line in the cart or order draft.
    #[error("{0} is not in the cart")]
    LineNotInCart(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Please add items to cart before checkout")]
    EmptyCart,

    /// Cart has exceeded maximum allowed distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Bulk order cannot be found.
    #[error("Bulk order not found: {0}")]
    OrderNotFound(String),

    /// Account cannot be found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Email/password pair did not match any account.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Account exists but has been deactivated.
    #[error("Account {0} is inactive")]
    AccountInactive(String),

    /// The session does not hold any permission that grants the operation.
    ///
    /// Carries the first permission of the allow-list so the message can
    /// name something concrete.
    #[error("You don't have permission to perform this action ({0})")]
    PermissionDenied(Permission),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Several required fields are missing at once (form-level check).
    #[error("Please fill in all required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Amount above its ceiling.
    #[error("{field} must be at most {max}")]
    AmountTooLarge { field: String, max: Money },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate account email).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_messages() {
        let err = CoreError::InsufficientStock {
            name: "Croissant".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(err.to_string(), "Only 3 Croissant available");

        let err = CoreError::OutOfStock {
            name: "Baguette".to_string(),
        };
        assert_eq!(err.to_string(), "Baguette is currently out of stock");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MissingFields {
            fields: vec!["customer name".to_string(), "delivery date".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: customer name, delivery date"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "email".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "email is required");
    }

    #[test]
    fn test_permission_denied_names_token() {
        let err = CoreError::PermissionDenied(Permission::ManageUsers);
        assert!(err.to_string().contains("manage_users"));
    }
}
