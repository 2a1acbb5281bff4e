//! # Cart Commands
//!
//! The POS screen's cart and the checkout form fields beside it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend Action          Command                 State Change          │
//! │  ───────────────          ───────                 ────────────          │
//! │                                                                         │
//! │  Tap product ───────────► add_to_cart() ────────► line added / merged  │
//! │  +/- buttons ───────────► update_cart_item() ───► quantity replaced    │
//! │  Trash icon ────────────► remove_from_cart() ───► line removed         │
//! │  Discount field ────────► set_discount() ───────► final total updated  │
//! │  Customer fields ───────► set_customer() ───────► stored on the form   │
//! │  Payment select ────────► set_payment_method()                         │
//! │  Clear button ──────────► clear_cart() ─────────► form reset           │
//! │                                                                         │
//! │  Every command requires the Sales screen (make_sales OR manage_sales)   │
//! │  and returns the whole cart so the UI re-renders from one response.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bakery_core::validation::validate_amount;
use bakery_core::{CartTotals, LineItem, Money, PaymentMethod, Screen};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::require_screen;

/// Cart response including lines, totals and form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<LineItem>,
    pub totals: CartTotals,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
    /// Final total formatted for display, e.g. "₹120.00"
    pub display_total: String,
}

fn respond(state: &AppState) -> CartResponse {
    let form = &state.checkout;
    let totals = form.totals();
    CartResponse {
        lines: form.cart.lines().to_vec(),
        display_total: state.config.format_money(totals.final_total),
        totals,
        customer_name: form.customer_name.clone(),
        customer_phone: form.customer_phone.clone(),
        payment_method: form.payment_method,
    }
}

/// Gets the current cart contents.
pub fn get_cart(state: &AppState) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    require_screen(state, Screen::Sales, "get_cart")?;
    Ok(respond(state))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Stock 0: rejected with OUT_OF_STOCK
/// - Merged quantity above stock: rejected with INSUFFICIENT_STOCK
/// - Price is frozen at time of adding
pub fn add_to_cart(
    state: &mut AppState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");
    require_screen(state, Screen::Sales, "add_to_cart")?;

    let product = state.catalogue.get(product_id)?;
    if let Err(e) = state.checkout.cart.add_line(product, quantity) {
        warn!(product_id = %product_id, error = %e, "add_to_cart rejected");
        return Err(e.into());
    }

    Ok(respond(state))
}

/// Sets the quantity of a cart line. Quantity 0 removes the line.
pub fn update_cart_item(
    state: &mut AppState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");
    require_screen(state, Screen::Sales, "update_cart_item")?;

    let result = match state.catalogue.get(product_id) {
        Ok(product) => state.checkout.cart.set_line_quantity(product, quantity),
        // a product deleted after it was added can still be removed
        Err(_) if quantity == 0 => state.checkout.cart.remove_line(product_id),
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        warn!(product_id = %product_id, error = %e, "update_cart_item rejected");
        return Err(e.into());
    }

    Ok(respond(state))
}

/// Removes a line from the cart.
pub fn remove_from_cart(state: &mut AppState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    require_screen(state, Screen::Sales, "remove_from_cart")?;

    state.checkout.cart.remove_line(product_id)?;
    Ok(respond(state))
}

/// Empties the cart and resets customer, discount and payment fields.
pub fn clear_cart(state: &mut AppState) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    require_screen(state, Screen::Sales, "clear_cart")?;

    state.checkout.clear();
    Ok(respond(state))
}

/// Sets the discount. Not clamped to the subtotal: above it the total goes
/// negative. Negative discounts and ones above the largest possible cart
/// are rejected.
pub fn set_discount(state: &mut AppState, discount: Money) -> Result<CartResponse, ApiError> {
    debug!(discount = %discount, "set_discount command");
    require_screen(state, Screen::Sales, "set_discount")?;
    validate_amount("discount", discount)?;

    state.checkout.discount = discount;
    Ok(respond(state))
}

/// Stores the optional customer name and phone.
pub fn set_customer(
    state: &mut AppState,
    name: &str,
    phone: &str,
) -> Result<CartResponse, ApiError> {
    debug!("set_customer command");
    require_screen(state, Screen::Sales, "set_customer")?;

    state.checkout.customer_name = name.to_string();
    state.checkout.customer_phone = phone.to_string();
    Ok(respond(state))
}

/// Sets the payment method from its token ("cash", "card" or "upi").
pub fn set_payment_method(state: &mut AppState, method: &str) -> Result<CartResponse, ApiError> {
    debug!(method = %method, "set_payment_method command");
    require_screen(state, Screen::Sales, "set_payment_method")?;

    state.checkout.payment_method = method.parse()?;
    Ok(respond(state))
}
