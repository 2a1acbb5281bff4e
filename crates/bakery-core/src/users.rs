//! # User Directory
//!
//! Dashboard accounts and the demo sign-in rule.
//!
//! ## Demo Credentials
//! There is no identity provider. An account signs in with its email and a
//! password equal to its role name:
//!
//! ```text
//! admin@bakery.com   / admin
//! manager@bakery.com / manager
//! staff@bakery.com   / staff
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::auth::Role;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Account;
use crate::validation::{validate_email, validate_required};

/// Fields of the "Add User" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// All dashboard accounts, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDirectory {
    accounts: Vec<Account>,
}

impl UserDirectory {
    pub fn new() -> Self {
        UserDirectory {
            accounts: Vec::new(),
        }
    }

    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        UserDirectory { accounts }
    }

    /// Checks an email/password pair.
    ///
    /// Email matching ignores case and surrounding whitespace. Unknown email
    /// and wrong password produce the same error. Blank fields are reported
    /// by name before any lookup.
    pub fn authenticate(&self, email: &str, password: &str) -> CoreResult<&Account> {
        let email = email.trim();
        let mut missing = Vec::new();
        if email.is_empty() {
            missing.push("email".to_string());
        }
        if password.is_empty() {
            missing.push("password".to_string());
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing }.into());
        }

        let account = self
            .find_by_email(email)
            .filter(|a| a.role.as_str() == password)
            .ok_or(CoreError::InvalidCredentials)?;

        if !account.is_active {
            return Err(CoreError::AccountInactive(account.email.clone()));
        }
        Ok(account)
    }

    /// Creates an active account. Emails are unique ignoring case.
    pub fn add_account(&mut self, new: NewAccount, now: DateTime<Utc>) -> CoreResult<&Account> {
        let name = validate_required("name", &new.name)?;
        let email = validate_email(&new.email)?.to_lowercase();

        if self.find_by_email(&email).is_some() {
            return Err(ValidationError::Duplicate {
                field: "email".to_string(),
                value: email,
            }
            .into());
        }

        self.accounts.push(Account {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            role: new.role,
            is_active: true,
            created_at: now,
        });

        let last = self.accounts.len() - 1;
        Ok(&self.accounts[last])
    }

    /// Activates or deactivates an account. The role never changes.
    pub fn set_active(&mut self, id: &str, active: bool) -> CoreResult<&Account> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::AccountNotFound(id.to_string()))?;
        account.is_active = active;
        Ok(account)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Account> {
        let email = email.trim();
        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    /// Number of active accounts.
    pub fn active_count(&self) -> usize {
        self.accounts.iter().filter(|a| a.is_active).count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
