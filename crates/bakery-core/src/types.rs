//! # Domain Types
//!
//! Core domain types used throughout the bakery dashboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Account      │   │    Product      │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  product_id     │       │
//! │  │  email          │   │  name/category  │   │  name snapshot  │       │
//! │  │  role           │   │  price          │   │  unit_price     │       │
//! │  │  is_active      │   │  stock/min_stock│   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │   BulkOrder     │   │    Company      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  lines (frozen) │   │  lines (frozen) │   │  name, address  │       │
//! │  │  subtotal       │   │  total/advance  │   │  phone, email   │       │
//! │  │  discount       │   │  balance        │   │  gst            │       │
//! │  │  final_total    │   │  status         │   └─────────────────┘       │
//! │  │  payment_method │   │  delivery_date  │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Sales and bulk orders copy the product name and price into their lines.
//! Editing or deleting a product later never changes a recorded sale.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::auth::Role;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Account
// =============================================================================

/// A dashboard user.
///
/// This is also the record persisted under the session key, so its JSON
/// shape is part of the storage format (camelCase, like the frontend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// Categories offered by the inventory form.
pub const CATEGORIES: &[&str] = &[
    "Bread", "Cakes", "Pastries", "Cookies", "Muffins", "Donuts", "Other",
];

/// A bakery item in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Unit price, never negative.
    pub price: Money,
    /// Units on hand, never negative.
    pub stock: i64,
    /// Reorder threshold: at or below this the product is "low".
    pub min_stock: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        if self.stock == 0 {
            StockStatus::Out
        } else if self.stock <= self.min_stock {
            StockStatus::Low
        } else {
            StockStatus::Good
        }
    }

    /// Stock at or below the reorder threshold (includes out of stock).
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    /// Value of the units on hand.
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.stock)
    }
}

/// Stock badge shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Out,
    Low,
    Good,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product line in a cart, sale or bulk order.
///
/// `line_total` is kept equal to `quantity × unit_price`; the only way to
/// change the quantity is [`LineItem::set_quantity`], which recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    /// Product name at time of adding (frozen).
    pub name: String,
    /// Unit price at time of adding (frozen).
    pub unit_price: Money,
    quantity: i64,
    line_total: Money,
}

impl LineItem {
    /// Snapshots `product` with the given quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            line_total: product.price.multiply_quantity(quantity),
        }
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.line_total = self.unit_price.multiply_quantity(quantity);
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Upi => write!(f, "upi"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec!["cash".into(), "card".into(), "upi".into()],
            }),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed counter sale. Never modified after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub lines: Vec<LineItem>,
    pub subtotal: Money,
    pub discount: Money,
    /// `subtotal - discount`, not clamped at zero.
    pub final_total: Money,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub staff_id: String,
    pub staff_name: String,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity()).sum()
    }
}

// =============================================================================
// Bulk Order
// =============================================================================

/// Lifecycle of a bulk order. Any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BulkOrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for BulkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulkOrderStatus::Pending => write!(f, "pending"),
            BulkOrderStatus::Confirmed => write!(f, "confirmed"),
            BulkOrderStatus::Completed => write!(f, "completed"),
            BulkOrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for BulkOrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BulkOrderStatus::Pending),
            "confirmed" => Ok(BulkOrderStatus::Confirmed),
            "completed" => Ok(BulkOrderStatus::Completed),
            "cancelled" => Ok(BulkOrderStatus::Cancelled),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec![
                    "pending".into(),
                    "confirmed".into(),
                    "completed".into(),
                    "cancelled".into(),
                ],
            }),
        }
    }
}

/// A catering / party order taken ahead of delivery.
///
/// Everything except `status` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BulkOrder {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub lines: Vec<LineItem>,
    pub total: Money,
    pub advance_paid: Money,
    /// `total - advance_paid`.
    pub balance: Money,
    #[ts(as = "String")]
    pub delivery_date: NaiveDate,
    pub status: BulkOrderStatus,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Company
// =============================================================================

/// Business details printed on receipts and shown in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub gst: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
