//! # Session State
//!
//! Who is signed in, mirrored to the key/value store under
//! [`SESSION_KEY`](bakery_core::SESSION_KEY).
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  startup ──► restore() ──► record present & parses? ──► signed in       │
//! │                                │ no                                     │
//! │                                ▼                                        │
//! │                           anonymous (an unreadable record is removed)   │
//! │                                                                         │
//! │  login  ──► sign_in()  ──► store.set("bakery_user", json)               │
//! │  logout ──► sign_out() ──► store.remove("bakery_user")                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The record is a bare camelCase [`Account`] with no version field.

use bakery_core::{Account, Session, SESSION_KEY};
use tracing::{info, warn};

use crate::storage::{KeyValueStore, StorageResult};

pub struct SessionState {
    session: Session,
    store: Box<dyn KeyValueStore>,
}

impl SessionState {
    /// Starts anonymous without reading the store.
    pub fn anonymous(store: Box<dyn KeyValueStore>) -> Self {
        SessionState {
            session: Session::anonymous(),
            store,
        }
    }

    /// Reads the persisted account, if any.
    ///
    /// A record that cannot be read or parsed is discarded with a warning;
    /// startup never fails because of it.
    pub fn restore(mut store: Box<dyn KeyValueStore>) -> Self {
        let raw = match store.get(SESSION_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Could not read stored session, starting signed out");
                None
            }
        };

        let session = match raw.map(|r| serde_json::from_str::<Account>(&r)) {
            Some(Ok(account)) => {
                info!(user_id = %account.id, role = %account.role, "Session restored");
                Session::signed_in(account)
            }
            Some(Err(e)) => {
                warn!(error = %e, "Discarding unreadable session record");
                if let Err(e) = store.remove(SESSION_KEY) {
                    warn!(error = %e, "Could not remove unreadable session record");
                }
                Session::anonymous()
            }
            None => Session::anonymous(),
        };

        SessionState { session, store }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn account(&self) -> Option<&Account> {
        self.session.account()
    }

    /// Replaces the identity and persists it.
    ///
    /// The in-memory session changes only if the write succeeds.
    pub fn sign_in(&mut self, account: Account) -> StorageResult<()> {
        let record = serde_json::to_string(&account)?;
        self.store.set(SESSION_KEY, &record)?;
        self.session.sign_in(account);
        Ok(())
    }

    /// Clears the identity and the persisted record.
    ///
    /// The in-memory session is cleared even if the store fails.
    pub fn sign_out(&mut self) -> StorageResult<Option<Account>> {
        let previous = self.session.sign_out();
        self.store.remove(SESSION_KEY)?;
        Ok(previous)
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
