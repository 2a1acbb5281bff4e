//! # Bakery Dashboard Library
//!
//! Command layer for the Sweet Bakery management dashboard: sign-in,
//! role-based navigation, inventory, POS checkout, bulk orders, reports,
//! users and company settings.
//!
//! ## Module Organization
//! ```text
//! bakery_dashboard/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   ├── session.rs  ◄─── Signed-in account, persisted in the KV store
//! │   ├── checkout.rs ◄─── POS cart + customer/discount/payment fields
//! │   └── config.rs   ◄─── ConfigState (dashboard.toml + env)
//! ├── commands/       ◄─── One module per screen
//! ├── storage.rs      ◄─── KeyValueStore (file / memory)
//! ├── seed.rs         ◄─── Demo accounts, products, sales, orders
//! └── error.rs        ◄─── ApiError returned by every command
//! ```
//!
//! The binary is a thin front: it restores the session and runs one
//! command from the command line, printing the JSON response.

pub mod commands;
pub mod error;
pub mod seed;
pub mod state;
pub mod storage;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::auth::LoginRequest;
use error::ApiError;
use state::{AppState, ConfigState, SessionState};
use storage::FileStore;

/// Runs the dashboard with the process arguments (without the program name).
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (RUST_LOG, default info,bakery=debug)            │
/// │  2. Load dashboard.toml + BAKERY_* env overrides                        │
/// │  3. Open the session store (config data_dir or platform data dir)      │
/// │  4. Build demo data                                                     │
/// │  5. Restore the signed-in account, if any                               │
/// │  6. Run the requested command                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Commands
/// - `status` (default): current user and navigation
/// - `login <email> <password>`
/// - `logout`
/// - `stats`: dashboard cards for the signed-in user
/// - `report [period]`
pub fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("Starting Sweet Bakery dashboard");

    let config = ConfigState::load_or_default(None);
    let store = match &config.data_dir {
        Some(dir) => FileStore::open(dir)?,
        None => FileStore::open_default()?,
    };
    info!(dir = ?store.dir(), "Session store opened");

    let data = seed::demo_data(Utc::now()).map_err(ApiError::from)?;
    let session = SessionState::restore(Box::new(store));
    let mut state = AppState::new(config, session, data);

    info!(
        signed_in = state.session.session().is_signed_in(),
        screens = state.session.session().visible_screens().len(),
        "State initialized"
    );

    dispatch(&mut state, &args)
}

fn dispatch(state: &mut AppState, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] | ["status"] => print_json(&Status {
            store_name: state.config.store_name.clone(),
            user: commands::auth::current_user(state),
            navigation: commands::auth::navigation(state),
        }),
        ["login", email, password] => {
            let response = commands::auth::login(
                state,
                LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )?;
            print_json(&response)
        }
        ["logout"] => {
            commands::auth::logout(state)?;
            print_json(&commands::auth::current_user(state))
        }
        ["stats"] => print_json(&commands::report::dashboard_stats(state)?),
        ["report"] => print_json(&commands::report::sales_report(state, None)?),
        ["report", period] => print_json(&commands::report::sales_report(state, Some(*period))?),
        _ => Err(ApiError::validation(
            "usage: bakery-dashboard [status | login <email> <password> | logout | stats | report [period]]",
        )
        .into()),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    store_name: String,
    user: Option<bakery_core::Account>,
    navigation: Vec<commands::auth::NavItem>,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bakery=trace` - Show trace for bakery crates only
/// - Default: INFO, DEBUG for bakery crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bakery=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
