//! # Checkout Form State
//!
//! Everything on the POS screen that is not yet a sale: the cart plus the
//! customer, discount and payment fields next to it.

use bakery_core::{Cart, CartTotals, CheckoutRequest, Money, PaymentMethod};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub cart: Cart,
    pub customer_name: String,
    pub customer_phone: String,
    pub discount: Money,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    pub fn new() -> Self {
        CheckoutForm::default()
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.compute_totals(self.discount)
    }

    /// The form fields as submitted at checkout. The cart is passed
    /// separately.
    pub fn request(&self) -> CheckoutRequest {
        CheckoutRequest {
            discount: self.discount,
            payment_method: self.payment_method,
            customer_name: Some(self.customer_name.clone()),
            customer_phone: Some(self.customer_phone.clone()),
        }
    }

    /// Empties the cart and resets every field to its default.
    pub fn clear(&mut self) {
        *self = CheckoutForm::default();
    }
}
