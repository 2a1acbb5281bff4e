//! # Validation Module
//!
//! Input validation for dashboard forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  ├── Input types, min attributes                                       │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Dashboard command (Rust)                                     │
//! │  └── THIS MODULE: required fields, ranges, allowed values              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: bakery-core operations                                       │
//! │  └── Stock checks, empty cart, cart limits                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bakery_core::validation::{validate_category, validate_quantity};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_category("Cakes").is_ok());
//! assert!(validate_category("Sandwiches").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::CATEGORIES;
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY, MAX_ORDER_VALUE, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Trims `value` and fails with `Required` when nothing is left.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = validate_required("name", name)?;

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name)
}

/// Validates a product category against [`CATEGORIES`].
pub fn validate_category(category: &str) -> ValidationResult<String> {
    let category = validate_required("category", category)?;

    CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(&category))
        .map(|c| c.to_string())
        .ok_or_else(|| ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: CATEGORIES.iter().map(|c| c.to_string()).collect(),
        })
}

/// Validates an account email.
///
/// Only the shape is checked: one `@` with something on both sides.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = validate_required("email", email)?;

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        }),
    }
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// Zero is not accepted here; "set quantity to 0" is handled by the cart
/// as a removal before this check runs.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product price.
///
/// ## Rules
/// - Must be positive: the inventory form treats a zero price as missing
/// - Must not exceed MAX_PRICE
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_PRICE {
        return Err(ValidationError::AmountTooLarge {
            field: "price".to_string(),
            max: MAX_PRICE,
        });
    }

    Ok(())
}

/// Validates a discount or advance payment.
///
/// ## Rules
/// - Zero is allowed
/// - Must not be negative
/// - Must not exceed MAX_ORDER_VALUE
///
/// Only the absolute ceiling is checked; a discount above the subtotal is
/// still accepted.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if amount > MAX_ORDER_VALUE {
        return Err(ValidationError::AmountTooLarge {
            field: field.to_string(),
            max: MAX_ORDER_VALUE,
        });
    }

    Ok(())
}

/// Validates a stock level or reorder threshold.
pub fn validate_stock(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more distinct line fits in the cart.
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
