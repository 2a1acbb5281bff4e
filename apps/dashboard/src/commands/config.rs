//! # Config Commands
//!
//! Read-only access to the dashboard configuration.

use tracing::debug;

use crate::state::{AppState, ConfigState};

/// Gets the current dashboard configuration.
///
/// Available before sign-in: the login page shows the store name.
pub fn get_config(state: &AppState) -> ConfigState {
    debug!("get_config command");
    state.config.clone()
}
