//! # Commands Module
//!
//! Every action the dashboard frontend can trigger.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (permission guards)
//! ├── auth.rs        ◄─── Login, logout, navigation
//! ├── inventory.rs   ◄─── Product CRUD and stock
//! ├── cart.rs        ◄─── POS cart and checkout form fields
//! ├── sale.rs        ◄─── Checkout and sales history
//! ├── bulk_order.rs  ◄─── Bulk order drafts, creation, status
//! ├── report.rs      ◄─── Dashboard stats and reports
//! ├── user.rs        ◄─── User management
//! ├── company.rs     ◄─── Company settings
//! └── config.rs      ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fn add_to_cart(state: &mut AppState, product_id, quantity)             │
//! │         │                                                               │
//! │         ├── 1. Guard: session may open the Sales screen?                │
//! │         │        no ──► Err(ApiError PERMISSION_DENIED)                 │
//! │         ├── 2. Look up / validate input                                 │
//! │         ├── 3. Mutate state through bakery-core                         │
//! │         └── 4. Return a camelCase response DTO                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod bulk_order;
pub mod cart;
pub mod company;
pub mod config;
pub mod inventory;
pub mod report;
pub mod sale;
pub mod user;

use bakery_core::{Account, CoreError, Permission, Screen, Session};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Maps a failed guard to the right error, logging the refusal.
fn guard(session: &Session, result: Result<&Account, CoreError>, action: &str) -> Result<Account, ApiError> {
    match result {
        Ok(account) => Ok(account.clone()),
        Err(_) if !session.is_signed_in() => {
            warn!(action = %action, "Rejected: not signed in");
            Err(ApiError::not_signed_in())
        }
        Err(e) => {
            warn!(
                action = %action,
                role = ?session.role(),
                "Rejected: permission denied"
            );
            Err(e.into())
        }
    }
}

/// Returns the signed-in account if it holds `permission`.
pub(crate) fn require(state: &AppState, permission: Permission, action: &str) -> Result<Account, ApiError> {
    let session = state.session.session();
    guard(session, session.require(permission), action)
}

/// Returns the signed-in account if it holds any of `permissions`.
pub(crate) fn require_any(
    state: &AppState,
    permissions: &[Permission],
    action: &str,
) -> Result<Account, ApiError> {
    let session = state.session.session();
    guard(session, session.require_any(permissions), action)
}

/// Returns the signed-in account if it may open `screen`.
pub(crate) fn require_screen(state: &AppState, screen: Screen, action: &str) -> Result<Account, ApiError> {
    let session = state.session.session();
    guard(session, session.require_screen(screen), action)
}
