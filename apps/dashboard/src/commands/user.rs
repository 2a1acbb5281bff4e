//! # User Commands
//!
//! User Management screen. Every command requires manage_users.

use bakery_core::{Account, NewAccount, Permission};
use chrono::Utc;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::require;

pub fn list_users(state: &AppState) -> Result<Vec<Account>, ApiError> {
    debug!("list_users command");
    require(state, Permission::ManageUsers, "list_users")?;
    Ok(state.users.list().to_vec())
}

/// Creates an active account. Its password follows the demo rule (the
/// role name).
pub fn add_user(state: &mut AppState, new: NewAccount) -> Result<Account, ApiError> {
    debug!(email = %new.email, role = %new.role, "add_user command");
    let admin = require(state, Permission::ManageUsers, "add_user")?;

    let account = state.users.add_account(new, Utc::now())?.clone();
    info!(
        user_id = %account.id,
        role = %account.role,
        created_by = %admin.id,
        "User added"
    );
    Ok(account)
}

/// Activates or deactivates an account. Inactive accounts cannot sign in.
///
/// An admin cannot deactivate their own account.
pub fn set_user_active(
    state: &mut AppState,
    user_id: &str,
    active: bool,
) -> Result<Account, ApiError> {
    debug!(user_id = %user_id, active = %active, "set_user_active command");
    let admin = require(state, Permission::ManageUsers, "set_user_active")?;

    if admin.id == user_id && !active {
        return Err(ApiError::validation("You cannot deactivate your own account"));
    }

    let account = state.users.set_active(user_id, active)?.clone();
    info!(user_id = %account.id, active = account.is_active, "User status changed");
    Ok(account)
}
