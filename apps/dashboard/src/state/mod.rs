//! # State Module
//!
//! All mutable dashboard state, owned by one [`AppState`] value.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  commands::cart::add_to_cart(&mut state, ...)                           │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │ AppState                                                          │ │
//! │  │  session      SessionState   (signed-in account + KV store)      │ │
//! │  │  checkout     CheckoutForm   (cart, customer, discount, payment) │ │
//! │  │  order_draft  OrderDraft     (bulk order being composed)         │ │
//! │  │  catalogue    Catalogue                                           │ │
//! │  │  sales        SalesLedger                                         │ │
//! │  │  bulk_orders  BulkOrderBook                                       │ │
//! │  │  users        UserDirectory                                       │ │
//! │  │  company      Company                                             │ │
//! │  │  config       ConfigState    (read-only after startup)           │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! │                                                                         │
//! │  Single actor: commands take `&mut AppState`, so there are no locks.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod checkout;
mod config;
mod session;

pub use checkout::CheckoutForm;
pub use config::{ConfigError, ConfigState};
pub use session::SessionState;

use bakery_core::{BulkOrderBook, Catalogue, Company, OrderDraft, SalesLedger, UserDirectory};

use crate::seed::SeedData;

#[derive(Debug)]
pub struct AppState {
    pub session: SessionState,
    pub checkout: CheckoutForm,
    pub order_draft: OrderDraft,
    pub catalogue: Catalogue,
    pub sales: SalesLedger,
    pub bulk_orders: BulkOrderBook,
    pub users: UserDirectory,
    pub company: Company,
    pub config: ConfigState,
}

impl AppState {
    /// Assembles state from seeded records and a restored session.
    pub fn new(config: ConfigState, session: SessionState, data: SeedData) -> Self {
        AppState {
            session,
            checkout: CheckoutForm::new(),
            order_draft: OrderDraft::new(),
            catalogue: data.catalogue,
            sales: data.sales,
            bulk_orders: data.bulk_orders,
            users: data.users,
            company: data.company,
            config,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::seed::demo_data;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    /// Demo state with an in-memory session store, signed out.
    pub fn demo_state() -> AppState {
        AppState::new(
            ConfigState::default(),
            SessionState::anonymous(Box::new(MemoryStore::new())),
            demo_data(Utc::now()).unwrap(),
        )
    }

    /// Demo state signed in with the demo account for `role` ("admin",
    /// "manager" or "staff").
    pub fn signed_in(role: &str) -> AppState {
        let mut state = demo_state();
        let account = state
            .users
            .authenticate(&format!("{}@bakery.com", role), role)
            .unwrap()
            .clone();
        state.session.sign_in(account).unwrap();
        state
    }
}
