//! Point-of-sale commands.
//!
//! # Usage
//!
//! ```bash
//! # Two units of product 3, one of product 7
//! medipos pos sell -i 3:2 -i 7 -c "Asha" --phone 9876543210
//!
//! # Browse what the POS screen would offer
//! medipos pos items --search para
//! ```
//!
//! `sell` runs one whole cart session: build the cart against a fresh
//! stock snapshot, check out, write the invoice, then re-fetch the list so
//! the printed stock reflects the sale.

use clap::Subcommand;
use medipos_client::AppError;
use medipos_client::pos::{Invoice, PosSession};
use medipos_core::{ProductId, format_inr};

use super::Context;

#[derive(Subcommand)]
pub enum PosAction {
    /// Sell a cart of items and generate the invoice
    Sell {
        /// Item to sell, as `<product-id>` or `<product-id>:<quantity>`;
        /// repeatable
        #[arg(short, long = "item", value_parser = parse_item, required = true)]
        items: Vec<(ProductId, u32)>,

        /// Customer name
        #[arg(short, long)]
        customer: String,

        /// Customer phone
        #[arg(long)]
        phone: String,
    },
    /// List the products the POS screen would offer
    Items {
        /// Case-insensitive substring match on the name
        #[arg(long, default_value = "")]
        search: String,
    },
}

pub async fn run(action: PosAction) -> Result<(), AppError> {
    let ctx = Context::from_env()?;
    let credential = ctx.store.require()?;
    let token = credential.token;

    let products = ctx
        .store
        .invalidate_on(ctx.api.list_products(&token).await)?;
    let mut pos = PosSession::new(&products);

    match action {
        PosAction::Sell {
            items,
            customer,
            phone,
        } => {
            for (id, quantity) in items {
                pos.add_to_cart(id)?;
                if quantity > 1 {
                    pos.set_quantity(id, quantity)?;
                }
            }
            pos.set_customer(&customer, &phone);

            let totals = pos.totals();
            println!("Cart");
            for line in pos.cart() {
                println!(
                    "  {:<30} {:>3} x {:>10} = {:>10}",
                    line.name,
                    line.quantity,
                    format_inr(line.unit_price),
                    format_inr(line.line_total()),
                );
            }
            println!("  Subtotal: {}", format_inr(totals.subtotal));
            println!("  GST 18%:  {}", format_inr(totals.gst));
            println!("  Total:    {}", format_inr(totals.total));

            let receipt = pos.checkout(&ctx.api, &token).await?;

            let invoice = Invoice::generate(&ctx.config.store_name, &receipt);
            let path = invoice.write_to(&ctx.config.invoice_dir)?;
            println!("\nSale completed. Invoice: {}", path.display());

            // Pick up the depleted stock the backend now reports.
            pos.refresh(&ctx.api, &token).await?;
            println!("\nRemaining stock");
            for line in &receipt.lines {
                if let Some(item) = pos.items().iter().find(|i| i.id == line.product_id) {
                    println!("  {:<30} {:>6}", item.name, item.stock);
                }
            }
        }
        PosAction::Items { search } => {
            println!(
                "{:<5} {:<30} {:>6} {:>10}",
                "ID", "Name", "Stock", "Price"
            );
            for item in pos.search(&search) {
                println!(
                    "{:<5} {:<30} {:>6} {:>10}",
                    item.id,
                    item.name,
                    item.stock,
                    format_inr(item.price),
                );
            }
        }
    }

    Ok(())
}

/// Parse `<product-id>` or `<product-id>:<quantity>`.
fn parse_item(raw: &str) -> Result<(ProductId, u32), String> {
    let (id, quantity) = match raw.split_once(':') {
        Some((id, quantity)) => (
            id,
            quantity
                .parse::<u32>()
                .map_err(|e| format!("invalid quantity in '{raw}': {e}"))?,
        ),
        None => (raw, 1),
    };

    let id = id
        .parse::<ProductId>()
        .map_err(|e| format!("invalid product id in '{raw}': {e}"))?;
    Ok((id, quantity))
}
