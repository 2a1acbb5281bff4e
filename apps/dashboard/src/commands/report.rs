//! # Report Commands
//!
//! Dashboard cards and the Reports screen.

use bakery_core::reports;
use bakery_core::{DashboardStats, Permission, ReportPeriod, SalesReport, Screen};
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

use super::inventory::ProductDto;
use super::{require, require_screen};

/// The dashboard screen: stat cards plus the low stock alert list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    /// Products at or below their minimum stock. Empty when
    /// `show_low_stock_alerts` is off.
    pub low_stock_alerts: Vec<ProductDto>,
}

/// Revenue cards, stock counts, the 7-day chart, top sellers and, when
/// enabled in the config, the low stock alerts.
pub fn dashboard_stats(state: &AppState) -> Result<DashboardResponse, ApiError> {
    debug!("dashboard_stats command");
    require_screen(state, Screen::Dashboard, "dashboard_stats")?;

    let stats = reports::dashboard_stats(
        state.sales.all(),
        &state.catalogue,
        &state.users,
        Utc::now(),
    );
    let low_stock_alerts = if state.config.show_low_stock_alerts {
        state
            .catalogue
            .low_stock()
            .into_iter()
            .map(ProductDto::from)
            .collect()
    } else {
        Vec::new()
    };

    Ok(DashboardResponse {
        stats,
        low_stock_alerts,
    })
}

/// Sales report for `period` ("daily", "weekly", "monthly" or "yearly").
/// Defaults to monthly.
pub fn sales_report(state: &AppState, period: Option<&str>) -> Result<SalesReport, ApiError> {
    debug!(period = ?period, "sales_report command");
    require(state, Permission::ViewReports, "sales_report")?;

    let period = match period {
        Some(token) => token.parse()?,
        None => ReportPeriod::default(),
    };
    Ok(reports::sales_report(
        state.sales.all(),
        &state.catalogue,
        period,
        Utc::now(),
    ))
}
