//! MediPOS CLI - Terminal frontend for the medical-store backend.
//!
//! # Usage
//!
//! ```bash
//! # Create a store account, then log in
//! medipos register -c "Asha Pharmacy" -e owner@example.com -p secret1
//! medipos login -e owner@example.com -p secret1 --remember
//!
//! # Inventory
//! medipos inventory list --search para
//! medipos inventory add -n "Paracetamol 500mg" -s 40 -p 2.50 -x 2027-03-31
//!
//! # Sell two units of product 3 and one of product 7
//! medipos pos sell -i 3:2 -i 7 -c "Asha" --phone 9876543210
//!
//! # Reports
//! medipos dashboard
//! medipos sales
//! ```
//!
//! # Commands
//!
//! - `login` / `register` / `logout` - Session lifecycle
//! - `dashboard` - Aggregate KPIs
//! - `inventory` - Stock CRUD and the search/expired filter
//! - `pos sell` - Cart checkout with invoice generation
//! - `sales` - Sales history

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "medipos")]
#[command(author, version, about = "MediPOS medical-store terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the issued session token
    Login {
        /// Account email (defaults to the remembered one)
        #[arg(short, long)]
        email: Option<String>,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Remember the email for the next login
        #[arg(long)]
        remember: bool,
    },
    /// Create a tenant/company account
    Register {
        /// Company / store name
        #[arg(short, long)]
        company: String,

        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (at least 6 characters)
        #[arg(short, long)]
        password: String,

        /// Password confirmation (defaults to the password)
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Drop the stored session token
    Logout,
    /// Show the sales/inventory dashboard
    Dashboard,
    /// Manage stock items
    Inventory {
        #[command(subcommand)]
        action: commands::inventory::InventoryAction,
    },
    /// Point-of-sale flows
    Pos {
        #[command(subcommand)]
        action: commands::pos::PosAction,
    },
    /// Show the sales history
    Sales,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login {
            email,
            password,
            remember,
        } => commands::auth::login(email, &password, remember).await?,
        Commands::Register {
            company,
            email,
            password,
            confirm,
        } => commands::auth::register(&company, &email, &password, confirm.as_deref()).await?,
        Commands::Logout => commands::auth::logout()?,
        Commands::Dashboard => commands::dashboard::show().await?,
        Commands::Inventory { action } => commands::inventory::run(action).await?,
        Commands::Pos { action } => commands::pos::run(action).await?,
        Commands::Sales => commands::sales::show().await?,
    }
    Ok(())
}
