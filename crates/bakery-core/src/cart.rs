//! # Cart and Order Drafts
//!
//! Line-item arithmetic for the counter cart and for bulk-order drafts.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Tap product ───────► add_line(product, 1)                             │
//! │                         ├── stock == 0?         → OutOfStock           │
//! │                         ├── merged qty > stock? → InsufficientStock    │
//! │                         ├── already in cart?    → quantity += qty      │
//! │                         └── otherwise           → push new line        │
//! │                                                                         │
//! │  +/- buttons ───────► set_line_quantity(product, qty)                  │
//! │                         ├── qty == 0            → remove line          │
//! │                         ├── qty > stock?        → InsufficientStock    │
//! │                         └── otherwise           → replace, recompute   │
//! │                                                                         │
//! │  Checkout ──────────► SalesLedger::checkout (ledger.rs)                │
//! │                                                                         │
//! │  Every rejected call leaves the cart exactly as it was.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never touches product stock; it only reads it for the checks.
//!
//! ```rust
//! use bakery_core::cart::Cart;
//! use bakery_core::money::Money;
//! # use bakery_core::types::Product;
//! # use chrono::Utc;
//! # fn product(id: &str, rupees: i64) -> Product {
//! #     Product {
//! #         id: id.into(), name: id.into(), category: "Bread".into(),
//! #         description: String::new(), price: Money::from_rupees(rupees),
//! #         stock: 10, min_stock: 2, created_at: Utc::now(), updated_at: Utc::now(),
//! #     }
//! # }
//!
//! let mut cart = Cart::new();
//! cart.add_line(&product("a", 50), 2).unwrap();
//! cart.add_line(&product("b", 30), 1).unwrap();
//!
//! let totals = cart.compute_totals(Money::from_rupees(10));
//! assert_eq!(totals.subtotal, Money::from_rupees(130));
//! assert_eq!(totals.final_total, Money::from_rupees(120));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{LineItem, Product};
use crate::validation::{validate_cart_size, validate_quantity};
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart
// =============================================================================

/// The in-progress counter transaction.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding again merges)
/// - Every line quantity is between 1 and MAX_ITEM_QUANTITY
/// - No line quantity exceeds the product stock seen when it was set
/// - `subtotal()` is always Σ quantity × unit price
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds `qty` units of `product`, merging into an existing line.
    pub fn add_line(&mut self, product: &Product, qty: i64) -> CoreResult<()> {
        validate_quantity(qty)?;

        if product.stock <= 0 {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let new_qty = line.quantity() + qty;
            check_stock(product, new_qty)?;
            check_max_quantity(new_qty)?;
            line.set_quantity(new_qty);
            return Ok(());
        }

        check_stock(product, qty)?;
        validate_cart_size(self.lines.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_LINES,
        })?;

        self.lines.push(LineItem::from_product(product, qty));
        Ok(())
    }

    /// Sets the quantity of the line for `product`.
    ///
    /// `qty == 0` removes the line. The unit price stays the one frozen when
    /// the line was first added.
    pub fn set_line_quantity(&mut self, product: &Product, qty: i64) -> CoreResult<()> {
        if qty == 0 {
            return self.remove_line(&product.id);
        }
        if qty < 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        check_stock(product, qty)?;
        check_max_quantity(qty)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
            .ok_or_else(|| CoreError::LineNotInCart(product.name.clone()))?;
        line.set_quantity(qty);
        Ok(())
    }

    /// Removes the line for `product_id`.
    pub fn remove_line(&mut self, product_id: &str) -> CoreResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() == before {
            Err(CoreError::LineNotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Takes the lines out, leaving the cart empty.
    pub(crate) fn take_lines(&mut self) -> Vec<LineItem> {
        std::mem::take(&mut self.lines)
    }

    pub fn line(&self, product_id: &str) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity()).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Subtotal and final total for `discount`.
    ///
    /// The discount is not clamped: a discount above the subtotal yields a
    /// negative final total.
    pub fn compute_totals(&self, discount: Money) -> CartTotals {
        let subtotal = self.subtotal();
        CartTotals {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            subtotal,
            discount,
            final_total: subtotal - discount,
        }
    }
}

fn check_stock(product: &Product, requested: i64) -> CoreResult<()> {
    if requested > product.stock {
        return Err(CoreError::InsufficientStock {
            name: product.name.clone(),
            available: product.stock,
            requested,
        });
    }
    Ok(())
}

fn check_max_quantity(requested: i64) -> CoreResult<()> {
    if requested > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub discount: Money,
    pub final_total: Money,
}

// =============================================================================
// Order Draft
// =============================================================================

/// Items being picked for a bulk order.
///
/// Same line arithmetic as [`Cart`] but without stock checks: bulk orders
/// are baked to order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    lines: Vec<LineItem>,
}

impl OrderDraft {
    pub fn new() -> Self {
        OrderDraft { lines: Vec::new() }
    }

    /// Adds one unit of `product`, merging into an existing line.
    pub fn add_item(&mut self, product: &Product) -> CoreResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let new_qty = line.quantity() + 1;
            check_max_quantity(new_qty)?;
            line.set_quantity(new_qty);
        } else {
            validate_cart_size(self.lines.len()).map_err(|_| CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            })?;
            self.lines.push(LineItem::from_product(product, 1));
        }
        Ok(())
    }

    /// Sets a line quantity; `0` removes the line.
    pub fn set_quantity(&mut self, product_id: &str, qty: i64) -> CoreResult<()> {
        if qty == 0 {
            let before = self.lines.len();
            self.lines.retain(|l| l.product_id != product_id);
            if self.lines.len() == before {
                return Err(CoreError::LineNotInCart(product_id.to_string()));
            }
            return Ok(());
        }
        validate_quantity(qty)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::LineNotInCart(product_id.to_string()))?;
        line.set_quantity(qty);
        Ok(())
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, rupees: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Item {}", id),
            category: "Pastries".to_string(),
            description: String::new(),
            price: Money::from_rupees(rupees),
            stock,
            min_stock: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assert_subtotal_invariant(cart: &Cart) {
        let expected: i64 = cart
            .lines()
            .iter()
            .map(|l| l.quantity() * l.unit_price.paise())
            .sum();
        assert_eq!(cart.subtotal().paise(), expected);
    }

    #[test]
    fn test_two_line_example_with_discount() {
        let mut cart = Cart::new();
        cart.add_line(&product("a", 50, 10), 2).unwrap();
        cart.add_line(&product("b", 30, 10), 1).unwrap();

        let totals = cart.compute_totals(Money::from_rupees(10));
        assert_eq!(totals.subtotal, Money::from_rupees(130));
        assert_eq!(totals.final_total, Money::from_rupees(120));
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 3);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        let p = product("a", 45, 10);

        cart.add_line(&p, 1).unwrap();
        cart.add_line(&p, 1).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line("a").unwrap().quantity(), 2);
        assert_eq!(cart.subtotal(), Money::from_rupees(90));
    }

    #[test]
    fn test_out_of_stock_never_changes_cart() {
        let mut cart = Cart::new();
        cart.add_line(&product("a", 50, 5), 1).unwrap();
        let before = cart.clone();

        let err = cart.add_line(&product("z", 20, 0), 1).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_beyond_stock_rejected() {
        let mut cart = Cart::new();
        let p = product("a", 50, 2);
        cart.add_line(&p, 1).unwrap();
        cart.add_line(&p, 1).unwrap();
        let before = cart.clone();

        let err = cart.add_line(&p, 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            }
        ));
        assert_eq!(cart, before);

        let err = Cart::new().add_line(&p, 3).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
    }

    #[test]
    fn test_set_quantity_above_stock_rejected() {
        let mut cart = Cart::new();
        let p = product("a", 50, 4);
        cart.add_line(&p, 2).unwrap();

        assert!(cart.set_line_quantity(&p, 5).is_err());
        assert_eq!(cart.line("a").unwrap().quantity(), 2);
        assert_eq!(cart.line("a").unwrap().line_total(), Money::from_rupees(100));
    }

    #[test]
    fn test_set_quantity_replaces_and_recomputes() {
        let mut cart = Cart::new();
        let p = product("a", 50, 10);
        cart.add_line(&p, 2).unwrap();

        cart.set_line_quantity(&p, 4).unwrap();
        assert_eq!(cart.line("a").unwrap().quantity(), 4);
        assert_eq!(cart.subtotal(), Money::from_rupees(200));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let a = product("a", 50, 10);
        cart.add_line(&a, 2).unwrap();
        cart.add_line(&product("b", 30, 10), 1).unwrap();

        cart.set_line_quantity(&a, 0).unwrap();
        assert!(cart.line("a").is_none());
        assert_eq!(cart.subtotal(), Money::from_rupees(30));
    }

    #[test]
    fn test_set_quantity_for_missing_line() {
        let mut cart = Cart::new();
        let err = cart.set_line_quantity(&product("a", 50, 10), 2).unwrap_err();
        assert!(matches!(err, CoreError::LineNotInCart(_)));
        assert!(cart.set_line_quantity(&product("a", 50, 10), -1).is_err());
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut p = product("a", 50, 10);
        cart.add_line(&p, 1).unwrap();

        p.price = Money::from_rupees(80);
        cart.set_line_quantity(&p, 2).unwrap();
        assert_eq!(cart.subtotal(), Money::from_rupees(100));
    }

    #[test]
    fn test_discount_is_not_clamped() {
        let mut cart = Cart::new();
        cart.add_line(&product("a", 50, 10), 1).unwrap();

        let totals = cart.compute_totals(Money::from_rupees(80));
        assert_eq!(totals.final_total, Money::from_rupees(-30));

        let totals = Cart::new().compute_totals(Money::from_paise(i64::MIN));
        assert_eq!(totals.final_total, Money::from_paise(i64::MAX));
    }

    #[test]
    fn test_subtotal_invariant_over_mixed_operations() {
        let mut cart = Cart::new();
        let a = product("a", 50, 6);
        let b = product("b", 30, 3);
        let c = product("c", 15, 0);

        let _ = cart.add_line(&a, 2);
        assert_subtotal_invariant(&cart);
        let _ = cart.add_line(&b, 1);
        assert_subtotal_invariant(&cart);
        let _ = cart.add_line(&c, 1);
        assert_subtotal_invariant(&cart);
        let _ = cart.set_line_quantity(&b, 9);
        assert_subtotal_invariant(&cart);
        let _ = cart.set_line_quantity(&a, 5);
        assert_subtotal_invariant(&cart);
        let _ = cart.add_line(&a, 3);
        assert_subtotal_invariant(&cart);
        let _ = cart.set_line_quantity(&b, 0);
        assert_subtotal_invariant(&cart);

        assert_eq!(cart.subtotal(), Money::from_rupees(250));
    }

    #[test]
    fn test_cart_line_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_LINES {
            cart.add_line(&product(&i.to_string(), 10, 5), 1).unwrap();
        }
        let err = cart.add_line(&product("extra", 10, 5), 1).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_line(&product("a", 50, 10), 2).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_order_draft_ignores_stock() {
        let mut draft = OrderDraft::new();
        let cake = product("cake", 500, 0);

        draft.add_item(&cake).unwrap();
        draft.add_item(&cake).unwrap();
        draft.set_quantity("cake", 20).unwrap();

        assert_eq!(draft.lines().len(), 1);
        assert_eq!(draft.total(), Money::from_rupees(10_000));

        draft.set_quantity("cake", 0).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_order_draft_line_limit() {
        let mut draft = OrderDraft::new();
        for i in 0..MAX_CART_LINES {
            draft.add_item(&product(&i.to_string(), 10, 0)).unwrap();
        }
        let err = draft.add_item(&product("extra", 10, 0)).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));

        // existing lines still merge
        draft.add_item(&product("0", 10, 0)).unwrap();
        assert_eq!(draft.lines().len(), MAX_CART_LINES);
    }
}
