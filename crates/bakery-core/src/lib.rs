//! # bakery-core: Pure Business Logic for the Sweet Bakery dashboard
//!
//! Everything the dashboard decides lives here, as plain data and functions
//! with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sweet Bakery Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │   Login ──► Dashboard ──► POS ──► Bulk Orders ──► Reports      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                bakery-dashboard (apps/dashboard)                │   │
//! │  │   AppState, session store, config, seed data, ApiError         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bakery-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌───────┐ │   │
//! │  │   │  auth   │ │  cart   │ │ ledger  │ │ inventory │ │reports│ │   │
//! │  │   │ Role    │ │ Cart    │ │ Sales   │ │ Catalogue │ │ stats │ │   │
//! │  │   │ Screen  │ │ Draft   │ │ Orders  │ │ filters   │ │ rows  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └───────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • TIME PASSED IN AS `now`           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Roles, permissions, screens and the [`Session`]
//! - [`cart`] - Counter cart and bulk-order draft arithmetic
//! - [`ledger`] - Sales ledger (checkout) and bulk-order book
//! - [`inventory`] - Product catalogue
//! - [`users`] - Accounts and demo sign-in
//! - [`reports`] - Dashboard statistics and report aggregates
//! - [`money`] - Integer paise
//! - [`types`] - Shared domain records
//! - [`error`] / [`validation`] - Typed errors and form rules
//!
//! ## Example Usage
//!
//! ```rust
//! use bakery_core::{Permission, Role, Screen};
//!
//! assert!(Role::Staff.has_permission(Permission::MakeSales));
//! assert!(Screen::Sales.is_visible_to(Role::Staff));
//! assert!(!Screen::Reports.is_visible_to(Role::Staff));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod reports;
pub mod types;
pub mod users;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{Permission, Role, Screen, Session};
pub use cart::{Cart, CartTotals, OrderDraft};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{Catalogue, ProductDraft};
pub use ledger::{BulkOrderBook, CheckoutRequest, NewBulkOrder, SalesLedger};
pub use money::Money;
pub use reports::{DashboardStats, ReportPeriod, SalesReport};
pub use types::*;
pub use users::{NewAccount, UserDirectory};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// Catches a typo like 1000 instead of 10 at the counter.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price the inventory form accepts (₹1,00,000).
pub const MAX_PRICE: Money = Money::from_rupees(100_000);

/// Highest value a cart or bulk order can reach: every line at the
/// maximum price and quantity. Discounts and advances are capped here.
pub const MAX_ORDER_VALUE: Money =
    Money::from_paise(MAX_PRICE.paise() * MAX_ITEM_QUANTITY * MAX_CART_LINES as i64);

/// Storage key of the persisted signed-in account.
pub const SESSION_KEY: &str = "bakery_user";
