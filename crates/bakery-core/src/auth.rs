//! # Authorization
//!
//! Role → permission resolution, screen visibility, and the explicit
//! session that every command receives.
//!
//! ## Policy Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Role      Permissions                                                  │
//! │  ───────   ──────────────────────────────────────────────────────────   │
//! │  admin     manage_users  manage_company  manage_items  view_reports     │
//! │            manage_sales  view_all_sales                                 │
//! │  manager   manage_items  view_reports  manage_sales  view_all_sales     │
//! │            manage_bulk_orders                                           │
//! │  staff     make_sales  view_stock  view_own_sales                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both `Role` and `Permission` are closed enums, so adding a role forces
//! every `match` on it to be revisited at compile time.
//!
//! ## Screen Visibility
//! A screen is visible when the session holds ANY permission of the
//! screen's allow-list. No screen requires all of a set.
//!
//! ```rust
//! use bakery_core::auth::{Permission, Role, Screen};
//!
//! assert!(Role::Staff.has_permission(Permission::MakeSales));
//! assert!(!Role::Staff.has_permission(Permission::ViewReports));
//! assert!(Screen::Sales.is_visible_to(Role::Admin)); // via manage_sales
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Account;

// =============================================================================
// Permission
// =============================================================================

/// A permission token.
///
/// Serialized (and parsed) as its snake_case token, e.g. `"manage_items"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageUsers,
    ManageCompany,
    ManageItems,
    ViewReports,
    ManageSales,
    ViewAllSales,
    ManageBulkOrders,
    MakeSales,
    ViewStock,
    ViewOwnSales,
}

impl Permission {
    /// Every permission token, in declaration order.
    pub const ALL: [Permission; 10] = [
        Permission::ManageUsers,
        Permission::ManageCompany,
        Permission::ManageItems,
        Permission::ViewReports,
        Permission::ManageSales,
        Permission::ViewAllSales,
        Permission::ManageBulkOrders,
        Permission::MakeSales,
        Permission::ViewStock,
        Permission::ViewOwnSales,
    ];

    /// Returns the canonical token string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageUsers => "manage_users",
            Permission::ManageCompany => "manage_company",
            Permission::ManageItems => "manage_items",
            Permission::ViewReports => "view_reports",
            Permission::ManageSales => "manage_sales",
            Permission::ViewAllSales => "view_all_sales",
            Permission::ManageBulkOrders => "manage_bulk_orders",
            Permission::MakeSales => "make_sales",
            Permission::ViewStock => "view_stock",
            Permission::ViewOwnSales => "view_own_sales",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "permission".to_string(),
                allowed: Permission::ALL.iter().map(|p| p.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Role
// =============================================================================

/// The role an account holds. Fixed at account creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ManageUsers,
    Permission::ManageCompany,
    Permission::ManageItems,
    Permission::ViewReports,
    Permission::ManageSales,
    Permission::ViewAllSales,
];

const MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::ManageItems,
    Permission::ViewReports,
    Permission::ManageSales,
    Permission::ViewAllSales,
    Permission::ManageBulkOrders,
];

const STAFF_PERMISSIONS: &[Permission] = &[
    Permission::MakeSales,
    Permission::ViewStock,
    Permission::ViewOwnSales,
];

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Staff];

    /// The fixed permission set for this role.
    pub const fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Admin => ADMIN_PERMISSIONS,
            Role::Manager => MANAGER_PERMISSIONS,
            Role::Staff => STAFF_PERMISSIONS,
        }
    }

    /// Pure membership lookup.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// Lowercase role name, also the demo password for seeded accounts.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Screen
// =============================================================================

/// A dashboard screen, used only as an authorization target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Dashboard,
    Inventory,
    Sales,
    BulkOrders,
    Reports,
    Users,
    Settings,
}

impl Screen {
    /// Navigation order.
    pub const ALL: [Screen; 7] = [
        Screen::Dashboard,
        Screen::Inventory,
        Screen::Sales,
        Screen::BulkOrders,
        Screen::Reports,
        Screen::Users,
        Screen::Settings,
    ];

    /// Permissions that each, on their own, grant this screen.
    pub const fn allow_list(&self) -> &'static [Permission] {
        match self {
            Screen::Dashboard => &[Permission::ManageItems, Permission::MakeSales],
            Screen::Inventory => &[Permission::ManageItems],
            Screen::Sales => &[Permission::MakeSales, Permission::ManageSales],
            Screen::BulkOrders => &[Permission::ManageBulkOrders, Permission::ManageSales],
            Screen::Reports => &[Permission::ViewReports],
            Screen::Users => &[Permission::ManageUsers],
            Screen::Settings => &[Permission::ManageCompany, Permission::ManageItems],
        }
    }

    /// Navigation title.
    pub const fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Inventory => "Inventory",
            Screen::Sales => "Sales/POS",
            Screen::BulkOrders => "Bulk Orders",
            Screen::Reports => "Reports",
            Screen::Users => "User Management",
            Screen::Settings => "Company Settings",
        }
    }

    /// Route the frontend mounts the screen at.
    pub const fn path(&self) -> &'static str {
        match self {
            Screen::Dashboard => "/dashboard",
            Screen::Inventory => "/inventory",
            Screen::Sales => "/sales",
            Screen::BulkOrders => "/bulk-orders",
            Screen::Reports => "/reports",
            Screen::Users => "/users",
            Screen::Settings => "/settings",
        }
    }

    /// OR across the allow-list.
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.allow_list().iter().any(|p| role.has_permission(*p))
    }
}

// =============================================================================
// Session
// =============================================================================

/// The signed-in identity for one dashboard session.
///
/// Replaces ambient "current user" state: commands receive the session
/// explicitly and ask it for permissions. Anonymous sessions hold nothing.
///
/// ## Lifecycle
/// ```text
/// startup ──► restore from store ──► Session::signed_in(account)
///                     │ (nothing stored)
///                     ▼
///              Session::anonymous() ──► login ──► signed_in
///                                                    │
///                                        logout ◄────┘ (store cleared)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    account: Option<Account>,
}

impl Session {
    pub fn anonymous() -> Self {
        Session { account: None }
    }

    pub fn signed_in(account: Account) -> Self {
        Session {
            account: Some(account),
        }
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.account.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.account.as_ref().map(|a| a.role)
    }

    /// Replaces the identity, returning the previous one.
    pub fn sign_in(&mut self, account: Account) -> Option<Account> {
        self.account.replace(account)
    }

    /// Clears the identity, returning it.
    pub fn sign_out(&mut self) -> Option<Account> {
        self.account.take()
    }

    /// `false` unconditionally when nobody is signed in.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role()
            .map(|role| role.has_permission(permission))
            .unwrap_or(false)
    }

    pub fn has_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(*p))
    }

    pub fn can_view(&self, screen: Screen) -> bool {
        self.role().map(|r| screen.is_visible_to(r)).unwrap_or(false)
    }

    /// Screens in navigation order that this session may open.
    pub fn visible_screens(&self) -> Vec<Screen> {
        Screen::ALL
            .iter()
            .copied()
            .filter(|s| self.can_view(*s))
            .collect()
    }

    /// Returns the account if it holds `permission`.
    pub fn require(&self, permission: Permission) -> CoreResult<&Account> {
        self.require_any(&[permission])
    }

    /// Returns the account if it holds at least one of `permissions`.
    pub fn require_any(&self, permissions: &[Permission]) -> CoreResult<&Account> {
        let denied = || {
            CoreError::PermissionDenied(
                permissions
                    .first()
                    .copied()
                    .unwrap_or(Permission::ManageUsers),
            )
        };
        let account = self.account.as_ref().ok_or_else(denied)?;
        if permissions.iter().any(|p| account.role.has_permission(*p)) {
            Ok(account)
        } else {
            Err(denied())
        }
    }

    /// Returns the account if it can open `screen`.
    pub fn require_screen(&self, screen: Screen) -> CoreResult<&Account> {
        self.require_any(screen.allow_list())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
