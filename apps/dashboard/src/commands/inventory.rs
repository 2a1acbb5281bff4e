//! # Inventory Commands
//!
//! Product catalogue browsing and management.
//!
//! ## Access
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_products / low_stock_products / inventory_summary                 │
//! │      any of: manage_items, view_stock, make_sales, manage_sales         │
//! │      (the POS product grid reads the catalogue too)                     │
//! │                                                                         │
//! │  add_product / update_product / delete_product / update_stock           │
//! │      manage_items                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bakery_core::validation::validate_search_query;
use bakery_core::{Money, Permission, Product, ProductDraft, StockStatus, CATEGORIES};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::{require, require_any};

const BROWSE: &[Permission] = &[
    Permission::ManageItems,
    Permission::ViewStock,
    Permission::MakeSales,
    Permission::ManageSales,
];

/// A product row with its stock badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(flatten)]
    pub product: Product,
    pub stock_status: StockStatus,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        ProductDto {
            stock_status: product.stock_status(),
            product: product.clone(),
        }
    }
}

/// Cards above the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub stock_value: Money,
    pub category_count: usize,
}

/// Products matching the search box and category tab.
///
/// `category` of `None` or `"all"` means every category.
pub fn list_products(
    state: &AppState,
    search: &str,
    category: Option<&str>,
) -> Result<Vec<ProductDto>, ApiError> {
    debug!(search = %search, category = ?category, "list_products command");
    require_any(state, BROWSE, "list_products")?;
    let search = validate_search_query(search)?;

    let category = category.filter(|c| !c.eq_ignore_ascii_case("all"));
    Ok(state
        .catalogue
        .filter(&search, category)
        .into_iter()
        .map(ProductDto::from)
        .collect())
}

/// Categories offered by the product form.
pub fn list_categories() -> Vec<String> {
    CATEGORIES.iter().map(|c| c.to_string()).collect()
}

pub fn get_product(state: &AppState, product_id: &str) -> Result<ProductDto, ApiError> {
    debug!(product_id = %product_id, "get_product command");
    require_any(state, BROWSE, "get_product")?;

    Ok(state.catalogue.get(product_id)?.into())
}

pub fn add_product(state: &mut AppState, draft: ProductDraft) -> Result<ProductDto, ApiError> {
    debug!(name = %draft.name, "add_product command");
    let staff = require(state, Permission::ManageItems, "add_product")?;

    let product = state.catalogue.add_product(draft, Utc::now())?;
    info!(
        product_id = %product.id,
        name = %product.name,
        staff_id = %staff.id,
        "Product added"
    );
    Ok(product.into())
}

/// Replaces every editable field of a product.
pub fn update_product(
    state: &mut AppState,
    product_id: &str,
    draft: ProductDraft,
) -> Result<ProductDto, ApiError> {
    debug!(product_id = %product_id, "update_product command");
    let staff = require(state, Permission::ManageItems, "update_product")?;

    let product = state
        .catalogue
        .update_product(product_id, draft, Utc::now())?;
    info!(product_id = %product.id, staff_id = %staff.id, "Product updated");
    Ok(product.into())
}

/// Removes a product. Recorded sales keep their line snapshots.
pub fn delete_product(state: &mut AppState, product_id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "delete_product command");
    let staff = require(state, Permission::ManageItems, "delete_product")?;

    let removed = state.catalogue.remove_product(product_id)?;
    info!(
        product_id = %removed.id,
        name = %removed.name,
        staff_id = %staff.id,
        "Product deleted"
    );
    Ok(removed)
}

/// Sets the units on hand.
pub fn update_stock(state: &mut AppState, product_id: &str, stock: i64) -> Result<ProductDto, ApiError> {
    debug!(product_id = %product_id, stock = %stock, "update_stock command");
    let staff = require(state, Permission::ManageItems, "update_stock")?;

    let product = state.catalogue.set_stock(product_id, stock, Utc::now())?;
    info!(
        product_id = %product.id,
        stock = product.stock,
        staff_id = %staff.id,
        "Stock updated"
    );
    Ok(product.into())
}

/// Products at or below their reorder threshold.
pub fn low_stock_products(state: &AppState) -> Result<Vec<ProductDto>, ApiError> {
    debug!("low_stock_products command");
    require_any(state, BROWSE, "low_stock_products")?;

    Ok(state
        .catalogue
        .low_stock()
        .into_iter()
        .map(ProductDto::from)
        .collect())
}

pub fn inventory_summary(state: &AppState) -> Result<InventorySummary, ApiError> {
    debug!("inventory_summary command");
    require_any(state, BROWSE, "inventory_summary")?;

    Ok(InventorySummary {
        total_products: state.catalogue.len(),
        low_stock_count: state.catalogue.low_stock().len(),
        stock_value: state.catalogue.stock_value(),
        category_count: state.catalogue.category_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::testing::{demo_state, signed_in};

    fn draft(name: &str, rupees: i64, stock: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: "Bread".to_string(),
            description: String::new(),
            price: Money::from_rupees(rupees),
            stock,
            min_stock: 5,
        }
    }

    #[test]
    fn test_list_and_filter() {
        let state = signed_in("staff");
        assert_eq!(list_products(&state, "", None).unwrap().len(), 8);
        assert_eq!(list_products(&state, "", Some("all")).unwrap().len(), 8);
        assert_eq!(list_products(&state, "", Some("Cakes")).unwrap().len(), 2);

        let found = list_products(&state, "chocolate", None).unwrap();
        assert_eq!(found.len(), 2);

        let donut = list_products(&state, "donut", None).unwrap();
        assert_eq!(donut[0].stock_status, StockStatus::Out);
    }

    #[test]
    fn test_search_is_trimmed_and_bounded() {
        let state = signed_in("staff");
        assert_eq!(list_products(&state, "  veg puff  ", None).unwrap().len(), 1);

        let err = list_products(&state, &"a".repeat(101), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_product_dto_serializes_flat() {
        let state = signed_in("manager");
        let dto = &list_products(&state, "Veg Puff", None).unwrap()[0];
        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(json["name"], "Veg Puff");
        assert_eq!(json["minStock"], 15);
        assert_eq!(json["stockStatus"], "good");
    }

    #[test]
    fn test_manager_adds_updates_and_deletes() {
        let mut state = signed_in("manager");

        let added = add_product(&mut state, draft("Multigrain Loaf", 55, 20)).unwrap();
        assert_eq!(state.catalogue.len(), 9);

        let updated = update_product(&mut state, &added.product.id, draft("Multigrain Loaf", 60, 4))
            .unwrap();
        assert_eq!(updated.product.price, Money::from_rupees(60));
        assert_eq!(updated.stock_status, StockStatus::Low);

        let restocked = update_stock(&mut state, &added.product.id, 30).unwrap();
        assert_eq!(restocked.stock_status, StockStatus::Good);

        delete_product(&mut state, &added.product.id).unwrap();
        assert_eq!(state.catalogue.len(), 8);
        assert_eq!(
            get_product(&state, &added.product.id).unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_invalid_product_rejected() {
        let mut state = signed_in("admin");
        let err = add_product(&mut state, draft("  ", 10, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingInformation);
        let id = state.catalogue.all()[0].id.clone();
        assert!(update_stock(&mut state, &id, -1).is_err());
    }

    #[test]
    fn test_staff_cannot_edit_catalogue() {
        let mut state = signed_in("staff");
        let id = state.catalogue.all()[0].id.clone();
        assert_eq!(
            update_stock(&mut state, &id, 99).unwrap_err().code,
            ErrorCode::PermissionDenied
        );
        assert_eq!(
            add_product(&mut state, draft("Rusk", 30, 10)).unwrap_err().code,
            ErrorCode::PermissionDenied
        );
        assert!(list_products(&demo_state(), "", None).is_err());
    }

    #[test]
    fn test_summary_and_low_stock() {
        let state = signed_in("manager");
        let summary = inventory_summary(&state).unwrap();
        assert_eq!(summary.total_products, 8);
        assert_eq!(summary.low_stock_count, 3);
        assert_eq!(summary.category_count, 6);
        // 5400 + 800 + 1350 + 1500 + 4800 + 420 + 0 + 1250
        assert_eq!(summary.stock_value, Money::from_rupees(15_520));
        assert_eq!(low_stock_products(&state).unwrap().len(), 3);
        assert_eq!(list_categories().len(), 7);
    }
}
