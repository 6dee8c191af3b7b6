//! Sales history command: one read-only fetch, one block per sale.

use medipos_client::AppError;
use medipos_client::sales::SaleView;

use super::Context;

/// Fetch and print past transactions, newest as the backend orders them.
pub async fn show() -> Result<(), AppError> {
    let ctx = Context::from_env()?;
    let credential = ctx.store.require()?;

    let sales = ctx
        .store
        .invalidate_on(ctx.api.list_sales(&credential.token).await)?;

    if sales.is_empty() {
        println!("No sales recorded yet.");
        return Ok(());
    }

    for view in sales.iter().map(SaleView::from) {
        println!("Product:  {}", view.product_name);
        println!("Quantity: {}", view.quantity);
        println!("Customer: {}", view.customer_name);
        println!("Phone:    {}", view.customer_phone);
        println!("Date:     {}", view.sold_at);
        println!("Total:    {}", view.total);
        println!();
    }

    Ok(())
}
