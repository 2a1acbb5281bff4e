//! # Sale Commands
//!
//! Checkout and sales history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout()                                                             │
//! │     │                                                                   │
//! │     ├── 1. Guard: Sales screen (make_sales OR manage_sales)             │
//! │     ├── 2. SalesLedger::checkout(cart, form fields, staff, now)         │
//! │     │        └── empty cart → EMPTY_CART, nothing recorded              │
//! │     ├── 3. Reset the checkout form (cart, customer, discount, payment)  │
//! │     └── 4. "Sale of ₹120.00 completed successfully"                     │
//! │                                                                         │
//! │  Product stock is not decremented.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bakery_core::{Permission, Sale, Screen};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::{require_any, require_screen};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub sale: Sale,
    pub message: String,
}

/// Records the current cart as a sale and resets the form.
pub fn checkout(state: &mut AppState) -> Result<CheckoutResponse, ApiError> {
    debug!(lines = state.checkout.cart.line_count(), "checkout command");
    let staff = require_screen(state, Screen::Sales, "checkout")?;

    let request = state.checkout.request();
    let sale = match state
        .sales
        .checkout(&mut state.checkout.cart, request, &staff, Utc::now())
    {
        Ok(sale) => sale.clone(),
        Err(e) => {
            warn!(staff_id = %staff.id, error = %e, "Checkout rejected");
            return Err(e.into());
        }
    };
    state.checkout.clear();

    info!(
        sale_id = %sale.id,
        staff_id = %sale.staff_id,
        total = %sale.final_total,
        items = sale.item_count(),
        "Sale recorded"
    );

    Ok(CheckoutResponse {
        message: format!(
            "Sale of {} completed successfully",
            state.config.format_money(sale.final_total)
        ),
        sale,
    })
}

/// Sales the signed-in account may see, newest first.
///
/// `view_all_sales` sees every sale, `view_own_sales` only its own.
pub fn list_sales(state: &AppState) -> Result<Vec<Sale>, ApiError> {
    debug!("list_sales command");
    require_any(
        state,
        &[Permission::ViewAllSales, Permission::ViewOwnSales],
        "list_sales",
    )?;

    Ok(state
        .sales
        .visible_to(state.session.session())
        .into_iter()
        .cloned()
        .collect())
}

/// The newest visible sales, limited by `recent_sales_limit`.
pub fn recent_sales(state: &AppState) -> Result<Vec<Sale>, ApiError> {
    debug!("recent_sales command");
    let mut sales = list_sales(state)?;
    sales.truncate(state.config.recent_sales_limit);
    Ok(sales)
}
