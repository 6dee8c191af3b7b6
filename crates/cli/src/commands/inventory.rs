//! Inventory commands: stock CRUD and the client-side filter.
//!
//! # Usage
//!
//! ```bash
//! medipos inventory list --search para --expired-only
//! medipos inventory add -n "Paracetamol 500mg" -s 40 -p 2.50 -x 2027-03-31
//! medipos inventory update 3 -n "Paracetamol 650mg" -s 25 -p 3.00
//! medipos inventory delete 3
//! ```

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use medipos_client::AppError;
use medipos_client::api::Product;
use medipos_client::inventory::{InventoryFilter, InventoryManager, ItemEdit, NewItem};
use medipos_core::{ProductId, format_inr};
use rust_decimal::Decimal;

use super::Context;

#[derive(Subcommand)]
pub enum InventoryAction {
    /// List stock items
    List {
        /// Case-insensitive substring match on the name
        #[arg(long, default_value = "")]
        search: String,

        /// Only items whose expiry date has passed
        #[arg(long)]
        expired_only: bool,
    },
    /// Add a stock item
    Add {
        /// Medicine name
        #[arg(short, long)]
        name: String,

        /// On-hand quantity
        #[arg(short, long)]
        stock: u32,

        /// Price, used as both buy and sell price
        #[arg(short, long)]
        price: Decimal,

        /// Expiry date (YYYY-MM-DD)
        #[arg(short = 'x', long)]
        expiry: Option<NaiveDate>,
    },
    /// Update a stock item by id
    Update {
        /// Product id
        id: ProductId,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        stock: u32,

        #[arg(short, long)]
        price: Decimal,

        #[arg(short = 'x', long)]
        expiry: Option<NaiveDate>,

        /// Batch number (placeholder when omitted)
        #[arg(long)]
        batch: Option<String>,

        /// Supplier (placeholder when omitted)
        #[arg(long)]
        supplier: Option<String>,
    },
    /// Delete a stock item by id
    Delete {
        /// Product id
        id: ProductId,
    },
}

pub async fn run(action: InventoryAction) -> Result<(), AppError> {
    let ctx = Context::from_env()?;
    let credential = ctx.store.require()?;
    let token = credential.token;
    let manager = InventoryManager::new(ctx.api.clone());

    match action {
        InventoryAction::List {
            search,
            expired_only,
        } => {
            let products = ctx.store.invalidate_on(manager.list(&token).await)?;
            let filter = InventoryFilter {
                search,
                expired_only,
            };

            print_table(&filter.apply(&products, Local::now().date_naive()));
        }
        InventoryAction::Add {
            name,
            stock,
            price,
            expiry,
        } => {
            manager
                .create(
                    &token,
                    &NewItem {
                        name,
                        stock,
                        price,
                        expiry,
                    },
                )
                .await?;

            // Refresh-on-success: show the list the backend now has.
            let products = ctx.store.invalidate_on(manager.list(&token).await)?;
            println!("Medicine added.\n");
            print_table(&products.iter().collect::<Vec<_>>());
        }
        InventoryAction::Update {
            id,
            name,
            stock,
            price,
            expiry,
            batch,
            supplier,
        } => {
            manager
                .update(
                    &token,
                    &ItemEdit {
                        id,
                        name,
                        stock,
                        price,
                        expiry,
                        batch_number: batch,
                        supplier,
                    },
                )
                .await?;

            let products = ctx.store.invalidate_on(manager.list(&token).await)?;
            println!("Medicine updated.\n");
            print_table(&products.iter().collect::<Vec<_>>());
        }
        InventoryAction::Delete { id } => {
            manager.delete(&token, id).await?;

            let products = ctx.store.invalidate_on(manager.list(&token).await)?;
            println!("Medicine deleted.\n");
            print_table(&products.iter().collect::<Vec<_>>());
        }
    }

    Ok(())
}

/// Plain-text stock table. An empty list is an empty table, not an error.
fn print_table(products: &[&Product]) {
    println!(
        "{:<5} {:<30} {:>6} {:>10} {:>10} {:<12} {:<20}",
        "ID", "Name", "Qty", "Buy", "Sell", "Expiry", "Supplier"
    );

    for product in products {
        println!(
            "{:<5} {:<30} {:>6} {:>10} {:>10} {:<12} {:<20}",
            product.id,
            product.name,
            product.quantity,
            format_inr(product.buy_price),
            format_inr(product.sell_price),
            product
                .expiry_date
                .map_or_else(|| "-".to_owned(), |d| d.to_string()),
            product.supplier,
        );
    }
}
