//! Dashboard display conversion.
//!
//! The dashboard is a single read-only fetch: whatever aggregates the
//! backend supplies get formatted for the terminal. Nothing is recomputed
//! client-side - the 30-day expiry window, the growth percent, and the
//! margin all come asserted by backend data.

use medipos_core::format_inr;

use crate::api::DashboardSummary;

/// One day of the weekly revenue series, formatted for display.
#[derive(Debug, Clone)]
pub struct DailyRevenueView {
    /// Short weekday name ("Mon", "Tue", ...).
    pub day: String,
    pub revenue: String,
}

/// One top-selling product row.
#[derive(Debug, Clone)]
pub struct TopProductView {
    pub name: String,
    pub total_sold: u32,
}

/// One expiring-soon row.
#[derive(Debug, Clone)]
pub struct ExpiringView {
    pub name: String,
    pub expiry: String,
}

/// Dashboard KPIs with every figure preformatted for the terminal.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub total_revenue: String,
    pub total_profit: String,
    pub profit_margin: String,
    pub today_revenue: String,
    pub today_profit: String,
    pub today_sales_count: u32,
    pub weekly_growth: String,
    pub weekly_revenue: Vec<DailyRevenueView>,
    pub top_products: Vec<TopProductView>,
    pub expiring_soon: Vec<ExpiringView>,
}

impl From<&DashboardSummary> for DashboardView {
    fn from(summary: &DashboardSummary) -> Self {
        Self {
            total_revenue: format_inr(summary.total_revenue),
            total_profit: format_inr(summary.total_profit),
            profit_margin: format!("{}%", summary.profit_margin_percent),
            today_revenue: format_inr(summary.today_revenue),
            today_profit: format_inr(summary.today_profit),
            today_sales_count: summary.today_sales_count,
            weekly_growth: format!("{}%", summary.weekly_growth_percent),
            weekly_revenue: summary
                .weekly_revenue
                .iter()
                .map(|day| DailyRevenueView {
                    day: day.date.format("%a").to_string(),
                    revenue: format_inr(day.revenue),
                })
                .collect(),
            top_products: summary
                .top_products
                .iter()
                .map(|p| TopProductView {
                    name: p.name.clone(),
                    total_sold: p.total_sold,
                })
                .collect(),
            expiring_soon: summary
                .expiring_soon
                .iter()
                .map(|p| ExpiringView {
                    name: p.name.clone(),
                    expiry: p
                        .expiry_date
                        .map_or_else(|| "-".to_owned(), |d| d.to_string()),
                })
                .collect(),
        }
    }
}
