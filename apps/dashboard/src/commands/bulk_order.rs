//! # Bulk Order Commands
//!
//! Composing, recording and tracking catering / party orders.
//!
//! All commands require the Bulk Orders screen (manage_bulk_orders OR
//! manage_sales). Drafts ignore stock: bulk orders are baked to order.

use bakery_core::validation::validate_search_query;
use bakery_core::{BulkOrder, BulkOrderStatus, LineItem, Money, NewBulkOrder, Screen};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::require_screen;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub lines: Vec<LineItem>,
    pub total: Money,
}

/// Cards above the order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOrderStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub total_value: Money,
    pub outstanding_balance: Money,
}

fn draft_response(state: &AppState) -> DraftResponse {
    DraftResponse {
        lines: state.order_draft.lines().to_vec(),
        total: state.order_draft.total(),
    }
}

pub fn get_order_draft(state: &AppState) -> Result<DraftResponse, ApiError> {
    debug!("get_order_draft command");
    require_screen(state, Screen::BulkOrders, "get_order_draft")?;
    Ok(draft_response(state))
}

/// Adds one unit of a product to the draft.
pub fn add_draft_item(state: &mut AppState, product_id: &str) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, "add_draft_item command");
    require_screen(state, Screen::BulkOrders, "add_draft_item")?;

    let product = state.catalogue.get(product_id)?;
    state.order_draft.add_item(product)?;
    Ok(draft_response(state))
}

/// Sets a draft line quantity; 0 removes the line.
pub fn update_draft_item(
    state: &mut AppState,
    product_id: &str,
    quantity: i64,
) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_draft_item command");
    require_screen(state, Screen::BulkOrders, "update_draft_item")?;

    state.order_draft.set_quantity(product_id, quantity)?;
    Ok(draft_response(state))
}

pub fn clear_order_draft(state: &mut AppState) -> Result<DraftResponse, ApiError> {
    debug!("clear_order_draft command");
    require_screen(state, Screen::BulkOrders, "clear_order_draft")?;

    state.order_draft.clear();
    Ok(draft_response(state))
}

/// Records the draft as a pending bulk order and clears the draft.
pub fn create_bulk_order(state: &mut AppState, fields: NewBulkOrder) -> Result<BulkOrder, ApiError> {
    debug!(customer = %fields.customer_name, "create_bulk_order command");
    require_screen(state, Screen::BulkOrders, "create_bulk_order")?;

    let order = match state
        .bulk_orders
        .create(fields, &state.order_draft, Utc::now())
    {
        Ok(order) => order.clone(),
        Err(e) => {
            warn!(error = %e, "create_bulk_order rejected");
            return Err(e.into());
        }
    };
    state.order_draft.clear();

    info!(
        order_id = %order.id,
        total = %order.total,
        balance = %order.balance,
        delivery_date = %order.delivery_date,
        "Bulk order created"
    );
    Ok(order)
}

/// Overwrites an order's status. Any transition is allowed.
pub fn update_bulk_order_status(
    state: &mut AppState,
    order_id: &str,
    status: &str,
) -> Result<BulkOrder, ApiError> {
    debug!(order_id = %order_id, status = %status, "update_bulk_order_status command");
    require_screen(state, Screen::BulkOrders, "update_bulk_order_status")?;

    let status: BulkOrderStatus = status.parse()?;
    let order = state.bulk_orders.update_status(order_id, status)?.clone();

    info!(order_id = %order.id, status = %order.status, "Bulk order status updated");
    Ok(order)
}

/// Orders matching the search box and status filter.
///
/// `status` of `None` or `"all"` means every status.
pub fn list_bulk_orders(
    state: &AppState,
    search: &str,
    status: Option<&str>,
) -> Result<Vec<BulkOrder>, ApiError> {
    debug!(search = %search, status = ?status, "list_bulk_orders command");
    require_screen(state, Screen::BulkOrders, "list_bulk_orders")?;
    let search = validate_search_query(search)?;

    let status = match status {
        None | Some("all") => None,
        Some(s) => Some(s.parse::<BulkOrderStatus>()?),
    };
    Ok(state
        .bulk_orders
        .filter(&search, status)
        .into_iter()
        .cloned()
        .collect())
}

pub fn bulk_order_stats(state: &AppState) -> Result<BulkOrderStats, ApiError> {
    debug!("bulk_order_stats command");
    require_screen(state, Screen::BulkOrders, "bulk_order_stats")?;

    Ok(BulkOrderStats {
        total_orders: state.bulk_orders.len(),
        pending_orders: state.bulk_orders.pending_count(),
        total_value: state.bulk_orders.total_value(),
        outstanding_balance: state.bulk_orders.outstanding_balance(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::testing::signed_in;
    use chrono::NaiveDate;

    fn fields(advance: i64) -> NewBulkOrder {
        NewBulkOrder {
            customer_name: "Kavya Iyer".to_string(),
            customer_phone: "9900112233".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2026, 12, 24),
            advance_paid: Money::from_rupees(advance),
            notes: Some("Christmas party".to_string()),
        }
    }

    #[test]
    fn test_compose_and_create_order() {
        let mut state = signed_in("manager");
        let cake = state.catalogue.all()[0].id.clone();
        let before = state.bulk_orders.len();

        add_draft_item(&mut state, &cake).unwrap();
        add_draft_item(&mut state, &cake).unwrap();
        let draft = update_draft_item(&mut state, &cake, 20).unwrap();
        assert_eq!(draft.total, Money::from_rupees(9000));

        let order = create_bulk_order(&mut state, fields(4000)).unwrap();
        assert_eq!(order.balance, Money::from_rupees(5000));
        assert_eq!(order.status, BulkOrderStatus::Pending);
        assert_eq!(state.bulk_orders.len(), before + 1);
        assert_eq!(state.bulk_orders.all()[0].id, order.id);
        assert!(get_order_draft(&state).unwrap().lines.is_empty());
    }

    #[test]
    fn test_out_of_stock_product_can_be_ordered() {
        let mut state = signed_in("manager");
        let donut = state
            .catalogue
            .all()
            .iter()
            .find(|p| p.stock == 0)
            .unwrap()
            .id
            .clone();
        assert!(add_draft_item(&mut state, &donut).is_ok());
    }

    #[test]
    fn test_missing_information() {
        let mut state = signed_in("manager");
        let err = create_bulk_order(&mut state, fields(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingInformation);
        assert_eq!(err.title, "Missing Information");
    }

    #[test]
    fn test_negative_advance_keeps_draft() {
        let mut state = signed_in("manager");
        let cake = state.catalogue.all()[0].id.clone();
        let before = state.bulk_orders.len();
        add_draft_item(&mut state, &cake).unwrap();

        let err = create_bulk_order(&mut state, fields(-100)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.bulk_orders.len(), before);
        assert_eq!(get_order_draft(&state).unwrap().lines.len(), 1);
    }

    #[test]
    fn test_status_update_and_filters() {
        let mut state = signed_in("admin");
        let id = state.bulk_orders.all()[0].id.clone();

        let order = update_bulk_order_status(&mut state, &id, "completed").unwrap();
        assert_eq!(order.status, BulkOrderStatus::Completed);
        assert!(update_bulk_order_status(&mut state, &id, "shipped").is_err());
        assert!(update_bulk_order_status(&mut state, "missing", "pending").is_err());

        let completed = list_bulk_orders(&state, "", Some("completed")).unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(list_bulk_orders(&state, "", Some("all")).unwrap().len(), 2);
        assert_eq!(list_bulk_orders(&state, "priya", None).unwrap().len(), 1);

        let err = list_bulk_orders(&state, &"9".repeat(101), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_stats() {
        let state = signed_in("manager");
        let stats = bulk_order_stats(&state).unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.pending_orders, 1);
        // 2100 + 9750, advances 500 + 2000
        assert_eq!(stats.total_value, Money::from_rupees(11_850));
        assert_eq!(stats.outstanding_balance, Money::from_rupees(9_350));
    }

    #[test]
    fn test_staff_cannot_open_bulk_orders() {
        let state = signed_in("staff");
        assert_eq!(
            list_bulk_orders(&state, "", None).unwrap_err().code,
            ErrorCode::PermissionDenied
        );
    }
}
