//! Dashboard command: one read-only fetch, rendered as terminal sections.

use medipos_client::AppError;
use medipos_client::dashboard::DashboardView;

use super::Context;

/// Fetch and print the aggregate KPIs.
///
/// A rejected fetch clears the stored token, the same as every other
/// protected view.
pub async fn show() -> Result<(), AppError> {
    let ctx = Context::from_env()?;
    let credential = ctx.store.require()?;

    let summary = ctx
        .store
        .invalidate_on(ctx.api.dashboard(&credential.token).await)?;
    let view = DashboardView::from(&summary);

    if let Some(user) = credential.user {
        println!("{}\n", user.company);
    }

    println!("Revenue (total):   {}", view.total_revenue);
    println!("Profit (total):    {}", view.total_profit);
    println!("Profit margin:     {}", view.profit_margin);
    println!("Revenue (today):   {}", view.today_revenue);
    println!("Profit (today):    {}", view.today_profit);
    println!("Sales today:       {}", view.today_sales_count);
    println!("Weekly growth:     {}", view.weekly_growth);

    if !view.weekly_revenue.is_empty() {
        println!("\nLast 7 days");
        for day in &view.weekly_revenue {
            println!("  {:<4} {}", day.day, day.revenue);
        }
    }

    if !view.top_products.is_empty() {
        println!("\nTop products");
        for product in &view.top_products {
            println!("  {:<30} {} sold", product.name, product.total_sold);
        }
    }

    if !view.expiring_soon.is_empty() {
        println!("\nExpiring within 30 days");
        for item in &view.expiring_soon {
            println!("  {:<30} {}", item.name, item.expiry);
        }
    }

    Ok(())
}
