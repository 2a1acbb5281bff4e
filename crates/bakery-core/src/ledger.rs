//! # Ledgers
//!
//! Append-only, newest-first lists of recorded sales and bulk orders.
//!
//! ## Checkout
//! ```text
//! Cart (mutable) ──► SalesLedger::checkout ──► Sale (immutable snapshot)
//!                         │                         │
//!                         ├── cart empty? → EmptyCart, nothing recorded
//!                         │                         ▼
//!                         └── cart cleared     ledger.sales[0]
//! ```
//!
//! Product stock is deliberately left alone here: a completed sale does not
//! decrement stock and a cancelled bulk order does not restore it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::auth::{Permission, Session};
use crate::cart::{Cart, OrderDraft};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Account, BulkOrder, BulkOrderStatus, PaymentMethod, Sale};
use crate::validation::validate_amount;
use crate::MAX_ORDER_VALUE;

/// Treats blank optional text as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Sales
// =============================================================================

/// The checkout form submitted with the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub discount: Money,
    pub payment_method: PaymentMethod,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

/// Recorded counter sales, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

impl SalesLedger {
    pub fn new() -> Self {
        SalesLedger { sales: Vec::new() }
    }

    /// Freezes `cart` into a Sale attributed to `staff`.
    ///
    /// On success the sale is prepended and the cart cleared. An empty cart
    /// fails with [`CoreError::EmptyCart`] and changes nothing; so does a
    /// negative discount or one above [`MAX_ORDER_VALUE`].
    pub fn checkout(
        &mut self,
        cart: &mut Cart,
        request: CheckoutRequest,
        staff: &Account,
        now: DateTime<Utc>,
    ) -> CoreResult<&Sale> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        validate_amount("discount", request.discount)?;

        let totals = cart.compute_totals(request.discount);
        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            lines: cart.take_lines(),
            subtotal: totals.subtotal,
            discount: totals.discount,
            final_total: totals.final_total,
            customer_name: non_blank(request.customer_name),
            customer_phone: non_blank(request.customer_phone),
            staff_id: staff.id.clone(),
            staff_name: staff.name.clone(),
            payment_method: request.payment_method,
            created_at: now,
        };

        self.sales.insert(0, sale);
        Ok(&self.sales[0])
    }

    /// All sales, newest first.
    pub fn all(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// The `limit` most recent sales.
    pub fn recent(&self, limit: usize) -> &[Sale] {
        &self.sales[..limit.min(self.sales.len())]
    }

    /// Sales the session may list.
    ///
    /// `view_all_sales` sees everything, `view_own_sales` only the sales
    /// attributed to the signed-in account; anyone else sees nothing.
    pub fn visible_to<'a>(&'a self, session: &Session) -> Vec<&'a Sale> {
        let Some(account) = session.account() else {
            return Vec::new();
        };
        if session.has_permission(Permission::ViewAllSales) {
            self.sales.iter().collect()
        } else if session.has_permission(Permission::ViewOwnSales) {
            self.sales.iter().filter(|s| s.staff_id == account.id).collect()
        } else {
            Vec::new()
        }
    }
}

// =============================================================================
// Bulk Orders
// =============================================================================

/// Header fields of the "New Bulk Order" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewBulkOrder {
    pub customer_name: String,
    pub customer_phone: String,
    #[ts(as = "Option<String>")]
    pub delivery_date: Option<NaiveDate>,
    pub advance_paid: Money,
    pub notes: Option<String>,
}

/// Recorded bulk orders, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOrderBook {
    orders: Vec<BulkOrder>,
}

impl BulkOrderBook {
    pub fn new() -> Self {
        BulkOrderBook { orders: Vec::new() }
    }

    /// Records a new pending order from `fields` and the draft items.
    ///
    /// Customer name, phone, delivery date and at least one item are
    /// required; all missing ones are reported together. The advance must
    /// not be negative or above [`MAX_ORDER_VALUE`]; it may exceed the total,
    /// so the balance may go negative.
    pub fn create(
        &mut self,
        fields: NewBulkOrder,
        draft: &OrderDraft,
        now: DateTime<Utc>,
    ) -> CoreResult<&BulkOrder> {
        let mut missing = Vec::new();
        if fields.customer_name.trim().is_empty() {
            missing.push("customer name".to_string());
        }
        if fields.customer_phone.trim().is_empty() {
            missing.push("customer phone".to_string());
        }
        if fields.delivery_date.is_none() {
            missing.push("delivery date".to_string());
        }
        if draft.is_empty() {
            missing.push("items".to_string());
        }
        let delivery_date = match fields.delivery_date {
            Some(date) if missing.is_empty() => date,
            _ => return Err(ValidationError::MissingFields { fields: missing }.into()),
        };
        validate_amount("advance", fields.advance_paid)?;

        let total = draft.total();
        let order = BulkOrder {
            id: Uuid::new_v4().to_string(),
            customer_name: fields.customer_name.trim().to_string(),
            customer_phone: fields.customer_phone.trim().to_string(),
            lines: draft.lines().to_vec(),
            total,
            advance_paid: fields.advance_paid,
            balance: total - fields.advance_paid,
            delivery_date,
            status: BulkOrderStatus::Pending,
            notes: non_blank(fields.notes),
            created_at: now,
        };

        self.orders.insert(0, order);
        Ok(&self.orders[0])
    }

    /// Overwrites the status. Every transition is allowed.
    pub fn update_status(&mut self, id: &str, status: BulkOrderStatus) -> CoreResult<&BulkOrder> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))?;
        order.status = status;
        Ok(order)
    }

    pub fn get(&self, id: &str) -> Option<&BulkOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// All orders, newest first.
    pub fn all(&self) -> &[BulkOrder] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Orders matching `search` (customer name, case-insensitive, or phone
    /// substring) and, when given, `status`.
    pub fn filter(&self, search: &str, status: Option<BulkOrderStatus>) -> Vec<&BulkOrder> {
        let needle = search.trim().to_lowercase();
        self.orders
            .iter()
            .filter(|o| {
                needle.is_empty()
                    || o.customer_name.to_lowercase().contains(&needle)
                    || o.customer_phone.contains(search.trim())
            })
            .filter(|o| status.map_or(true, |s| o.status == s))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.orders
            .iter()
            .filter(|o| o.status == BulkOrderStatus::Pending)
            .count()
    }

    /// Σ order totals, across every status.
    pub fn total_value(&self) -> Money {
        self.orders.iter().map(|o| o.total).sum()
    }

    /// Σ balances still to be collected, across every status.
    pub fn outstanding_balance(&self) -> Money {
        self.orders.iter().map(|o| o.balance).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::types::Product;

    fn product(id: &str, rupees: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Item {}", id),
            category: "Cakes".to_string(),
            description: String::new(),
            price: Money::from_rupees(rupees),
            stock,
            min_stock: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn account(id: &str, role: Role) -> Account {
        Account {
            id: id.to_string(),
            name: format!("User {}", id),
            email: format!("{}@bakery.com", id),
            role,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_checkout_records_snapshot_and_clears_cart() {
        let mut ledger = SalesLedger::new();
        let mut cart = Cart::new();
        let a = product("a", 50, 10);
        cart.add_line(&a, 2).unwrap();
        cart.add_line(&product("b", 30, 10), 1).unwrap();
        let staff = account("3", Role::Staff);

        let request = CheckoutRequest {
            discount: Money::from_rupees(10),
            payment_method: PaymentMethod::Upi,
            customer_name: Some("Priya".to_string()),
            customer_phone: Some("   ".to_string()),
        };
        let sale = ledger.checkout(&mut cart, request, &staff, Utc::now()).unwrap();

        assert_eq!(sale.subtotal, Money::from_rupees(130));
        assert_eq!(sale.final_total, Money::from_rupees(120));
        assert_eq!(sale.item_count(), 3);
        assert_eq!(sale.staff_id, "3");
        assert_eq!(sale.customer_name.as_deref(), Some("Priya"));
        assert_eq!(sale.customer_phone, None);
        assert_eq!(sale.payment_method, PaymentMethod::Upi);
        assert!(cart.is_empty());
        assert_eq!(ledger.len(), 1);
        // stock is not touched by a sale
        assert_eq!(a.stock, 10);
    }

    #[test]
    fn test_checkout_empty_cart_records_nothing() {
        let mut ledger = SalesLedger::new();
        let mut cart = Cart::new();
        let err = ledger
            .checkout(
                &mut cart,
                CheckoutRequest::default(),
                &account("1", Role::Admin),
                Utc::now(),
            )
            .unwrap_err();

        assert!(matches!(err, CoreError::EmptyCart));
        assert_eq!(ledger.len(), 0);
    }

    #[test]
    fn test_checkout_rejects_out_of_range_discount() {
        let mut ledger = SalesLedger::new();
        let mut cart = Cart::new();
        cart.add_line(&product("a", 50, 10), 1).unwrap();
        let staff = account("3", Role::Staff);

        for discount in [Money::from_paise(-1), Money::from_paise(i64::MAX)] {
            let request = CheckoutRequest {
                discount,
                ..CheckoutRequest::default()
            };
            let err = ledger
                .checkout(&mut cart, request, &staff, Utc::now())
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
        assert_eq!(ledger.len(), 0);
        assert_eq!(cart.line_count(), 1);

        // a discount above the subtotal is still accepted
        let request = CheckoutRequest {
            discount: Money::from_rupees(80),
            ..CheckoutRequest::default()
        };
        let sale = ledger.checkout(&mut cart, request, &staff, Utc::now()).unwrap();
        assert_eq!(sale.final_total, Money::from_rupees(-30));
    }

    #[test]
    fn test_newest_sale_first() {
        let mut ledger = SalesLedger::new();
        let staff = account("3", Role::Staff);
        let p = product("a", 10, 100);

        let mut ids = Vec::new();
        for _ in 0..3 {
            let mut cart = Cart::new();
            cart.add_line(&p, 1).unwrap();
            let id = ledger
                .checkout(&mut cart, CheckoutRequest::default(), &staff, Utc::now())
                .unwrap()
                .id
                .clone();
            ids.push(id);
        }

        assert_eq!(ledger.all()[0].id, ids[2]);
        assert_eq!(ledger.recent(2).len(), 2);
        assert_eq!(ledger.recent(10).len(), 3);
    }

    #[test]
    fn test_visible_sales_by_role() {
        let mut ledger = SalesLedger::new();
        let p = product("a", 10, 100);
        let mike = account("3", Role::Staff);
        let sarah = account("2", Role::Manager);

        for staff in [&mike, &sarah, &mike] {
            let mut cart = Cart::new();
            cart.add_line(&p, 1).unwrap();
            ledger
                .checkout(&mut cart, CheckoutRequest::default(), staff, Utc::now())
                .unwrap();
        }

        assert_eq!(ledger.visible_to(&Session::signed_in(sarah)).len(), 3);
        assert_eq!(ledger.visible_to(&Session::signed_in(mike)).len(), 2);
        assert!(ledger.visible_to(&Session::anonymous()).is_empty());
    }

    #[test]
    fn test_bulk_order_balance_and_status() {
        let mut book = BulkOrderBook::new();
        let mut draft = OrderDraft::new();
        draft.add_item(&product("cake", 500, 0)).unwrap();
        draft.set_quantity("cake", 2).unwrap();

        let fields = NewBulkOrder {
            customer_name: "Anita Rao".to_string(),
            customer_phone: "9876543210".to_string(),
            delivery_date: Some(date(2026, 11, 2)),
            advance_paid: Money::from_rupees(400),
            notes: Some(String::new()),
        };
        let order = book.create(fields, &draft, Utc::now()).unwrap();
        assert_eq!(order.total, Money::from_rupees(1000));
        assert_eq!(order.balance, Money::from_rupees(600));
        assert_eq!(order.status, BulkOrderStatus::Pending);
        assert_eq!(order.notes, None);
        let id = order.id.clone();

        let updated = book.update_status(&id, BulkOrderStatus::Completed).unwrap();
        assert_eq!(updated.status, BulkOrderStatus::Completed);
        assert_eq!(book.get(&id).unwrap().status, BulkOrderStatus::Completed);

        // any status is reachable from any status
        book.update_status(&id, BulkOrderStatus::Pending).unwrap();
        book.update_status(&id, BulkOrderStatus::Cancelled).unwrap();
        assert_eq!(book.get(&id).unwrap().status, BulkOrderStatus::Cancelled);
    }

    #[test]
    fn test_bulk_order_missing_fields() {
        let mut book = BulkOrderBook::new();
        let err = book
            .create(NewBulkOrder::default(), &OrderDraft::new(), Utc::now())
            .unwrap_err();

        match err {
            CoreError::Validation(ValidationError::MissingFields { fields }) => {
                assert_eq!(
                    fields,
                    vec!["customer name", "customer phone", "delivery date", "items"]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(book.is_empty());
    }

    #[test]
    fn test_bulk_order_rejects_out_of_range_advance() {
        let mut book = BulkOrderBook::new();
        let mut draft = OrderDraft::new();
        draft.add_item(&product("cake", 500, 0)).unwrap();

        for advance in [Money::from_paise(-100), Money::from_paise(i64::MAX)] {
            let fields = NewBulkOrder {
                customer_name: "Anita Rao".to_string(),
                customer_phone: "9876543210".to_string(),
                delivery_date: Some(date(2026, 11, 2)),
                advance_paid: advance,
                notes: None,
            };
            let err = book.create(fields, &draft, Utc::now()).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
        assert!(book.is_empty());
    }

    #[test]
    fn test_bulk_order_filters_and_stats() {
        let mut book = BulkOrderBook::new();
        let mut draft = OrderDraft::new();
        draft.add_item(&product("cookie", 20, 0)).unwrap();

        for (name, phone) in [("Anita Rao", "98450"), ("Rahul Mehta", "99001")] {
            book.create(
                NewBulkOrder {
                    customer_name: name.to_string(),
                    customer_phone: phone.to_string(),
                    delivery_date: Some(date(2026, 12, 1)),
                    advance_paid: Money::from_rupees(5),
                    notes: None,
                },
                &draft,
                Utc::now(),
            )
            .unwrap();
        }
        let rahul = book.all()[0].id.clone();
        book.update_status(&rahul, BulkOrderStatus::Confirmed).unwrap();

        assert_eq!(book.filter("anita", None).len(), 1);
        assert_eq!(book.filter("9900", None).len(), 1);
        assert_eq!(book.filter("", Some(BulkOrderStatus::Pending)).len(), 1);
        assert_eq!(book.filter("", None).len(), 2);
        assert_eq!(book.pending_count(), 1);
        assert_eq!(book.total_value(), Money::from_rupees(40));
        assert_eq!(book.outstanding_balance(), Money::from_rupees(30));
    }

    #[test]
    fn test_update_unknown_order() {
        let mut book = BulkOrderBook::new();
        assert!(matches!(
            book.update_status("nope", BulkOrderStatus::Confirmed),
            Err(CoreError::OrderNotFound(_))
        ));
    }
}
