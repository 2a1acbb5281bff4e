//! # Auth Commands
//!
//! Login, logout, and the navigation derived from the signed-in role.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login({ email, password })                                             │
//! │         │                                                               │
//! │         ├── empty field?          → MISSING_INFORMATION                 │
//! │         ├── no match / inactive?  → INVALID_CREDENTIALS                 │
//! │         ▼                                                               │
//! │  SessionState::sign_in ──► store.set("bakery_user", account json)       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  { account, navigation, message: "Welcome to ..." }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bakery_core::{Account, Permission, Screen};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub screen: Screen,
    pub title: String,
    pub path: String,
}

impl From<Screen> for NavItem {
    fn from(screen: Screen) -> Self {
        NavItem {
            screen,
            title: screen.title().to_string(),
            path: screen.path().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub account: Account,
    pub navigation: Vec<NavItem>,
    pub message: String,
}

/// Signs in with the demo credential rule and persists the account.
pub fn login(state: &mut AppState, request: LoginRequest) -> Result<LoginResponse, ApiError> {
    debug!(email = %request.email, "login command");

    let account = match state.users.authenticate(&request.email, &request.password) {
        Ok(account) => account.clone(),
        Err(e) => {
            warn!(email = %request.email, error = %e, "Login rejected");
            return Err(e.into());
        }
    };

    state.session.sign_in(account.clone())?;
    info!(user_id = %account.id, role = %account.role, "User signed in");

    Ok(LoginResponse {
        navigation: navigation(state),
        message: format!("Welcome to {} Management System!", state.config.store_name),
        account,
    })
}

/// Signs out and forgets the persisted account.
///
/// The POS cart and bulk-order draft belong to the previous user and are
/// cleared too.
pub fn logout(state: &mut AppState) -> Result<(), ApiError> {
    debug!("logout command");

    state.checkout.clear();
    state.order_draft.clear();
    let previous = state.session.sign_out()?;

    if let Some(account) = previous {
        info!(user_id = %account.id, "User signed out");
    }
    Ok(())
}

/// The signed-in account, if any.
pub fn current_user(state: &AppState) -> Option<Account> {
    debug!("current_user command");
    state.session.account().cloned()
}

/// Sidebar entries the session may open, in menu order.
pub fn navigation(state: &AppState) -> Vec<NavItem> {
    state
        .session
        .session()
        .visible_screens()
        .into_iter()
        .map(NavItem::from)
        .collect()
}

/// Whether the session holds the permission named by `token`.
///
/// Unknown tokens are a validation error; an anonymous session holds
/// nothing.
pub fn has_permission(state: &AppState, token: &str) -> Result<bool, ApiError> {
    let permission: Permission = token.parse()?;
    Ok(state.session.session().has_permission(permission))
}
