//! # Inventory Catalogue
//!
//! The in-memory product list behind the Inventory screen.
//!
//! ## Stock Levels
//! ```text
//!   stock == 0               → Out   (red badge, cannot be added to cart)
//!   0 < stock <= min_stock   → Low   (amber badge, counted in low_stock())
//!   stock > min_stock        → Good
//! ```
//!
//! Stock only changes through [`Catalogue::set_stock`] or a product edit.
//! Sales never decrement it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_category, validate_price, validate_product_name, validate_stock};

/// Fields of the add/edit product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub min_stock: i64,
}

/// A draft that has passed validation.
struct CheckedDraft {
    name: String,
    category: String,
    description: String,
    price: Money,
    stock: i64,
    min_stock: i64,
}

impl ProductDraft {
    fn check(self) -> CoreResult<CheckedDraft> {
        let name = validate_product_name(&self.name)?;
        let category = validate_category(&self.category)?;
        validate_price(self.price)?;
        validate_stock("stock", self.stock)?;
        validate_stock("min stock", self.min_stock)?;

        Ok(CheckedDraft {
            name,
            category,
            description: self.description.trim().to_string(),
            price: self.price,
            stock: self.stock,
            min_stock: self.min_stock,
        })
    }
}

/// The product catalogue, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    products: Vec<Product>,
}

impl Catalogue {
    pub fn new() -> Self {
        Catalogue {
            products: Vec::new(),
        }
    }

    /// Validates `draft` and appends it as a new product.
    pub fn add_product(&mut self, draft: ProductDraft, now: DateTime<Utc>) -> CoreResult<&Product> {
        let checked = draft.check()?;
        self.products.push(Product {
            id: Uuid::new_v4().to_string(),
            name: checked.name,
            category: checked.category,
            description: checked.description,
            price: checked.price,
            stock: checked.stock,
            min_stock: checked.min_stock,
            created_at: now,
            updated_at: now,
        });

        let last = self.products.len() - 1;
        Ok(&self.products[last])
    }

    /// Replaces the editable fields of product `id`.
    pub fn update_product(
        &mut self,
        id: &str,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> CoreResult<&Product> {
        let checked = draft.check()?;
        let product = self.get_mut(id)?;

        product.name = checked.name;
        product.category = checked.category;
        product.description = checked.description;
        product.price = checked.price;
        product.stock = checked.stock;
        product.min_stock = checked.min_stock;
        product.updated_at = now;
        Ok(product)
    }

    /// Removes product `id`. Recorded sales keep their snapshots.
    pub fn remove_product(&mut self, id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        Ok(self.products.remove(index))
    }

    /// Overwrites the stock level of product `id`.
    pub fn set_stock(&mut self, id: &str, stock: i64, now: DateTime<Utc>) -> CoreResult<&Product> {
        validate_stock("stock", stock)?;
        let product = self.get_mut(id)?;
        product.stock = stock;
        product.updated_at = now;
        Ok(product)
    }

    pub fn get(&self, id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products at or below their reorder threshold.
    pub fn low_stock(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    /// Products whose name or category contains `search` (case-insensitive),
    /// restricted to `category` when given.
    pub fn filter(&self, search: &str, category: Option<&str>) -> Vec<&Product> {
        let needle = search.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .filter(|p| category.map_or(true, |c| p.category.eq_ignore_ascii_case(c)))
            .collect()
    }

    /// Σ price × stock over the whole catalogue.
    pub fn stock_value(&self) -> Money {
        self.products.iter().map(|p| p.stock_value()).sum()
    }

    /// Number of distinct categories in use.
    pub fn category_count(&self) -> usize {
        self.categories().len()
    }

    /// Product count per category, sorted by category name.
    pub fn categories(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.products {
            *counts.entry(p.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
