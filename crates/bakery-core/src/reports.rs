//! # Reports
//!
//! Dashboard statistics and report aggregates, computed from the ledgers
//! at a given instant.
//!
//! ## Time Windows
//! ```text
//!                    now - 30d          now - 7d        today 00:00   now
//!  ────────────────────┼──────────────────┼────────────────┼───────────┼──►
//!                      │                  │                └─ today ───┘
//!                      │                  └──────── weekly ────────────┘
//!                      └─────────────────────────── monthly ───────────┘
//! ```
//!
//! All windows are UTC and include both ends. Amounts are Σ final totals,
//! so discounts are already subtracted.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::inventory::Catalogue;
use crate::money::Money;
use crate::types::Sale;
use crate::users::UserDirectory;

/// Days shown in the dashboard sales chart.
pub const DAILY_CHART_DAYS: i64 = 7;

/// Rows in the "Top Selling Items" table.
pub const TOP_ITEMS_LIMIT: usize = 5;

/// Category used for lines whose product no longer exists.
pub const FALLBACK_CATEGORY: &str = "Other";

// =============================================================================
// Report Rows
// =============================================================================

/// One bar of the daily sales chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub sales_count: usize,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffPerformance {
    pub staff_id: String,
    pub staff_name: String,
    pub sales_count: usize,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub category: String,
    pub quantity: i64,
    pub revenue: Money,
    /// Share of line revenue in whole percent, rounded down.
    pub share_percent: i64,
}

/// Numbers behind the dashboard cards and charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today_sales: Money,
    pub weekly_sales: Money,
    pub monthly_sales: Money,
    pub total_items: usize,
    pub low_stock_items: usize,
    pub total_staff: usize,
    pub daily_sales: Vec<DailySales>,
    pub top_selling_items: Vec<TopItem>,
}

// =============================================================================
// Report Period
// =============================================================================

/// Period picker on the Reports screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl ReportPeriod {
    /// Earliest instant included in the period ending at `now`.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ReportPeriod::Daily => start_of_day(now),
            ReportPeriod::Weekly => now - Duration::days(7),
            ReportPeriod::Monthly => now - Duration::days(30),
            ReportPeriod::Yearly => now - Duration::days(365),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportPeriod::Daily => write!(f, "daily"),
            ReportPeriod::Weekly => write!(f, "weekly"),
            ReportPeriod::Monthly => write!(f, "monthly"),
            ReportPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(ReportPeriod::Daily),
            "weekly" => Ok(ReportPeriod::Weekly),
            "monthly" => Ok(ReportPeriod::Monthly),
            "yearly" => Ok(ReportPeriod::Yearly),
            _ => Err(ValidationError::NotAllowed {
                field: "period".to_string(),
                allowed: vec![
                    "daily".into(),
                    "weekly".into(),
                    "monthly".into(),
                    "yearly".into(),
                ],
            }),
        }
    }
}

/// Everything on the Reports screen for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period: ReportPeriod,
    pub total_revenue: Money,
    pub sales_count: usize,
    /// Revenue / sales count, rounded down to the paisa. Zero with no sales.
    pub average_sale: Money,
    pub total_discount: Money,
    pub active_items: usize,
    pub daily_sales: Vec<DailySales>,
    pub staff_performance: Vec<StaffPerformance>,
    pub category_performance: Vec<CategoryPerformance>,
    pub top_selling_items: Vec<TopItem>,
}

// =============================================================================
// Aggregations
// =============================================================================

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(now)
}

/// Sales with `from <= created_at <= to`.
pub fn sales_between<'a>(
    sales: &'a [Sale],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> impl Iterator<Item = &'a Sale> + 'a {
    sales
        .iter()
        .filter(move |s| s.created_at >= from && s.created_at <= to)
}

/// Σ final totals of the sales in `[from, to]`.
pub fn revenue_between(sales: &[Sale], from: DateTime<Utc>, to: DateTime<Utc>) -> Money {
    sales_between(sales, from, to).map(|s| s.final_total).sum()
}

/// One entry per calendar day for the `days` days ending today, oldest
/// first. Days without sales are present with zero revenue.
pub fn daily_sales(sales: &[Sale], now: DateTime<Utc>, days: i64) -> Vec<DailySales> {
    let today = now.date_naive();
    let mut rows: Vec<DailySales> = (0..days)
        .rev()
        .map(|offset| DailySales {
            date: today - Duration::days(offset),
            sales_count: 0,
            revenue: Money::zero(),
        })
        .collect();

    for sale in sales {
        let date = sale.created_at.date_naive();
        if let Some(row) = rows.iter_mut().find(|r| r.date == date) {
            row.sales_count += 1;
            row.revenue += sale.final_total;
        }
    }
    rows
}

/// Best sellers by units sold, then by line revenue.
pub fn top_selling_items<'a>(sales: impl IntoIterator<Item = &'a Sale>, limit: usize) -> Vec<TopItem> {
    let mut by_product: HashMap<&str, TopItem> = HashMap::new();
    for line in sales.into_iter().flat_map(|s| s.lines.iter()) {
        let item = by_product
            .entry(line.product_id.as_str())
            .or_insert_with(|| TopItem {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                quantity: 0,
                revenue: Money::zero(),
            });
        item.quantity += line.quantity();
        item.revenue += line.line_total();
    }

    let mut items: Vec<TopItem> = by_product.into_values().collect();
    items.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then(b.revenue.cmp(&a.revenue))
            .then(a.name.cmp(&b.name))
    });
    items.truncate(limit);
    items
}

/// Sales count and revenue per staff member, highest revenue first.
pub fn staff_performance<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Vec<StaffPerformance> {
    let mut by_staff: HashMap<&str, StaffPerformance> = HashMap::new();
    for sale in sales {
        let row = by_staff
            .entry(sale.staff_id.as_str())
            .or_insert_with(|| StaffPerformance {
                staff_id: sale.staff_id.clone(),
                staff_name: sale.staff_name.clone(),
                sales_count: 0,
                revenue: Money::zero(),
            });
        row.sales_count += 1;
        row.revenue += sale.final_total;
    }

    let mut rows: Vec<StaffPerformance> = by_staff.into_values().collect();
    rows.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then(a.staff_name.cmp(&b.staff_name))
    });
    rows
}

/// Line revenue per product category, highest revenue first.
///
/// Lines are attributed to the product's current category; lines whose
/// product has been removed fall under [`FALLBACK_CATEGORY`].
pub fn category_performance<'a>(
    sales: impl IntoIterator<Item = &'a Sale>,
    catalogue: &Catalogue,
) -> Vec<CategoryPerformance> {
    let mut by_category: HashMap<String, (i64, Money)> = HashMap::new();
    for line in sales.into_iter().flat_map(|s| s.lines.iter()) {
        let category = catalogue
            .get(&line.product_id)
            .map(|p| p.category.clone())
            .unwrap_or_else(|_| FALLBACK_CATEGORY.to_string());
        let entry = by_category.entry(category).or_insert((0, Money::zero()));
        entry.0 += line.quantity();
        entry.1 += line.line_total();
    }

    let total: i64 = by_category.values().map(|(_, revenue)| revenue.paise()).sum();
    let mut rows: Vec<CategoryPerformance> = by_category
        .into_iter()
        .map(|(category, (quantity, revenue))| CategoryPerformance {
            share_percent: if total > 0 {
                revenue.paise() * 100 / total
            } else {
                0
            },
            category,
            quantity,
            revenue,
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue).then(a.category.cmp(&b.category)));
    rows
}

/// Builds the dashboard numbers at `now`.
pub fn dashboard_stats(
    sales: &[Sale],
    catalogue: &Catalogue,
    users: &UserDirectory,
    now: DateTime<Utc>,
) -> DashboardStats {
    DashboardStats {
        today_sales: revenue_between(sales, ReportPeriod::Daily.start(now), now),
        weekly_sales: revenue_between(sales, ReportPeriod::Weekly.start(now), now),
        monthly_sales: revenue_between(sales, ReportPeriod::Monthly.start(now), now),
        total_items: catalogue.len(),
        low_stock_items: catalogue.low_stock().len(),
        total_staff: users.active_count(),
        daily_sales: daily_sales(sales, now, DAILY_CHART_DAYS),
        top_selling_items: top_selling_items(sales, TOP_ITEMS_LIMIT),
    }
}

/// Builds the Reports screen for `period` ending at `now`.
pub fn sales_report(
    sales: &[Sale],
    catalogue: &Catalogue,
    period: ReportPeriod,
    now: DateTime<Utc>,
) -> SalesReport {
    let from = period.start(now);
    let in_period: Vec<&Sale> = sales_between(sales, from, now).collect();

    let total_revenue: Money = in_period.iter().map(|s| s.final_total).sum();
    let sales_count = in_period.len();
    let average_sale = if sales_count == 0 {
        Money::zero()
    } else {
        Money::from_paise(total_revenue.paise() / sales_count as i64)
    };
    let chart_days = (now.date_naive() - from.date_naive()).num_days() + 1;

    SalesReport {
        period,
        total_revenue,
        sales_count,
        average_sale,
        total_discount: in_period.iter().map(|s| s.discount).sum(),
        active_items: catalogue.all().iter().filter(|p| p.stock > 0).count(),
        daily_sales: daily_sales(sales, now, chart_days),
        staff_performance: staff_performance(in_period.iter().copied()),
        category_performance: category_performance(in_period.iter().copied(), catalogue),
        top_selling_items: top_selling_items(in_period.iter().copied(), TOP_ITEMS_LIMIT),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::cart::Cart;
    use crate::inventory::ProductDraft;
    use crate::ledger::{CheckoutRequest, SalesLedger};
    use crate::types::{Account, Product};
    use crate::users::NewAccount;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 15, 0, 0).unwrap()
    }

    fn catalogue() -> Catalogue {
        let mut catalogue = Catalogue::new();
        for (name, category, rupees) in [
            ("Chocolate Cake", "Cakes", 450),
            ("Croissant", "Pastries", 60),
            ("Sourdough", "Bread", 120),
        ] {
            catalogue
                .add_product(
                    ProductDraft {
                        name: name.to_string(),
                        category: category.to_string(),
                        description: String::new(),
                        price: Money::from_rupees(rupees),
                        stock: 50,
                        min_stock: 5,
                    },
                    now(),
                )
                .unwrap();
        }
        catalogue
    }

    fn staff(id: &str, name: &str) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@bakery.com", id),
            role: Role::Staff,
            is_active: true,
            created_at: now(),
        }
    }

    fn sell(
        ledger: &mut SalesLedger,
        items: &[(&Product, i64)],
        discount: i64,
        who: &Account,
        at: DateTime<Utc>,
    ) {
        let mut cart = Cart::new();
        for (product, qty) in items {
            cart.add_line(product, *qty).unwrap();
        }
        let request = CheckoutRequest {
            discount: Money::from_rupees(discount),
            ..CheckoutRequest::default()
        };
        ledger.checkout(&mut cart, request, who, at).unwrap();
    }

    /// Sales today, three days ago, twenty days ago and sixty days ago.
    fn ledger(catalogue: &Catalogue) -> SalesLedger {
        let cake = &catalogue.all()[0];
        let croissant = &catalogue.all()[1];
        let bread = &catalogue.all()[2];
        let mike = staff("3", "Mike Staff");
        let sarah = staff("2", "Sarah Manager");

        let mut ledger = SalesLedger::new();
        sell(&mut ledger, &[(cake, 1)], 0, &sarah, now() - Duration::days(60));
        sell(&mut ledger, &[(bread, 2)], 0, &mike, now() - Duration::days(20));
        sell(&mut ledger, &[(croissant, 4)], 0, &mike, now() - Duration::days(3));
        sell(&mut ledger, &[(cake, 1), (croissant, 1)], 10, &sarah, now() - Duration::hours(2));
        ledger
    }

    #[test]
    fn test_dashboard_windows() {
        let catalogue = catalogue();
        let ledger = ledger(&catalogue);
        let mut users = UserDirectory::new();
        users
            .add_account(
                NewAccount {
                    name: "Mike Staff".to_string(),
                    email: "staff@bakery.com".to_string(),
                    role: Role::Staff,
                },
                now(),
            )
            .unwrap();

        let stats = dashboard_stats(ledger.all(), &catalogue, &users, now());
        assert_eq!(stats.today_sales, Money::from_rupees(500));
        assert_eq!(stats.weekly_sales, Money::from_rupees(740));
        assert_eq!(stats.monthly_sales, Money::from_rupees(980));
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.low_stock_items, 0);
        assert_eq!(stats.total_staff, 1);
    }

    #[test]
    fn test_daily_sales_zero_filled_oldest_first() {
        let catalogue = catalogue();
        let ledger = ledger(&catalogue);

        let rows = daily_sales(ledger.all(), now(), DAILY_CHART_DAYS);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2026, 10, 13).unwrap());
        assert_eq!(rows[6].date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(rows[6].revenue, Money::from_rupees(500));
        assert_eq!(rows[3].revenue, Money::from_rupees(240));
        assert_eq!(rows[1].sales_count, 0);
        assert_eq!(rows[1].revenue, Money::zero());
    }

    #[test]
    fn test_top_items_by_quantity_then_revenue() {
        let catalogue = catalogue();
        let ledger = ledger(&catalogue);

        let top = top_selling_items(ledger.all(), TOP_ITEMS_LIMIT);
        let names: Vec<&str> = top.iter().map(|t| t.name.as_str()).collect();
        // croissant 5 units; cake and bread 2 units each, cake earns more
        assert_eq!(names, vec!["Croissant", "Chocolate Cake", "Sourdough"]);
        assert_eq!(top[0].quantity, 5);
        assert_eq!(top[1].revenue, Money::from_rupees(900));

        assert_eq!(top_selling_items(ledger.all(), 1).len(), 1);
    }

    #[test]
    fn test_staff_performance_by_revenue() {
        let catalogue = catalogue();
        let ledger = ledger(&catalogue);

        let rows = staff_performance(ledger.all());
        assert_eq!(rows[0].staff_name, "Sarah Manager");
        assert_eq!(rows[0].sales_count, 2);
        assert_eq!(rows[0].revenue, Money::from_rupees(950));
        assert_eq!(rows[1].revenue, Money::from_rupees(480));
    }

    #[test]
    fn test_category_performance_with_removed_product() {
        let mut catalogue = catalogue();
        let ledger = ledger(&catalogue);
        let bread_id = catalogue.all()[2].id.clone();
        catalogue.remove_product(&bread_id).unwrap();

        let rows = category_performance(ledger.all(), &catalogue);
        let cakes = rows.iter().find(|r| r.category == "Cakes").unwrap();
        assert_eq!(cakes.revenue, Money::from_rupees(900));
        let other = rows.iter().find(|r| r.category == FALLBACK_CATEGORY).unwrap();
        assert_eq!(other.revenue, Money::from_rupees(240));
        assert_eq!(rows[0].category, "Cakes");
        // 900 / 1440 of line revenue
        assert_eq!(cakes.share_percent, 62);
    }

    #[test]
    fn test_weekly_report() {
        let catalogue = catalogue();
        let ledger = ledger(&catalogue);

        let report = sales_report(ledger.all(), &catalogue, ReportPeriod::Weekly, now());
        assert_eq!(report.sales_count, 2);
        assert_eq!(report.total_revenue, Money::from_rupees(740));
        assert_eq!(report.average_sale, Money::from_rupees(370));
        assert_eq!(report.total_discount, Money::from_rupees(10));
        assert_eq!(report.active_items, 3);
        assert_eq!(report.daily_sales.len(), 8);
        assert_eq!(report.staff_performance.len(), 2);
    }

    #[test]
    fn test_empty_report() {
        let report = sales_report(&[], &Catalogue::new(), ReportPeriod::Daily, now());
        assert_eq!(report.sales_count, 0);
        assert_eq!(report.average_sale, Money::zero());
        assert_eq!(report.daily_sales.len(), 1);
        assert!(report.category_performance.is_empty());
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("Yearly".parse::<ReportPeriod>().unwrap(), ReportPeriod::Yearly);
        assert!("hourly".parse::<ReportPeriod>().is_err());
        assert_eq!(ReportPeriod::default(), ReportPeriod::Monthly);
    }
}
