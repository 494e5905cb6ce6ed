//! # Shoebox CLI
//!
//! Terminal front end for the cart store.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (file, then environment)
//! 3. Open cart storage (SQLite file, or memory with `--memory`)
//! 4. Open the cart store (restores the persisted cart)
//! 5. Run one command, print the cart, close

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shoebox_cart::{
    CartActions, CartOptions, CartStorage, CartStore, ConsoleNotifier, HttpInventoryClient,
    MemoryStorage, Outcome, ShoeboxConfig, SqliteStorage,
};
use shoebox_core::{Cart, ProductId};
use shoebox_db::{Database, DbConfig};

#[derive(Parser, Debug)]
#[command(name = "shoebox", version, about = "Shopping cart backed by a remote inventory")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Keep the cart in memory for this run only
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product from the cart
    Remove { product_id: ProductId },
    /// Set the amount of a product already in the cart
    Set {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ShoeboxConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    let storage = open_storage(&config, cli.memory).await?;
    let inventory = Arc::new(
        HttpInventoryClient::new(&config.inventory).context("Failed to build inventory client")?,
    );
    info!(url = %inventory.base_url(), "Inventory client ready");

    let store = CartStore::open(inventory, storage, CartOptions::from(&config))
        .await
        .context("Failed to open cart")?;
    let store = Arc::new(store);
    let actions = CartActions::new(Arc::clone(&store), Arc::new(ConsoleNotifier));

    let outcome = match cli.command.unwrap_or(Command::Show) {
        Command::Show => Outcome::Unchanged,
        Command::Add { product_id } => actions.add_product(product_id).await,
        Command::Remove { product_id } => actions.remove_product(product_id).await,
        Command::Set { product_id, amount } => {
            actions.update_product_amount(product_id, amount).await
        }
    };

    if let Outcome::Committed {
        persisted: false, ..
    } = outcome
    {
        warn!("Cart changed but could not be saved; it will be lost on exit");
    }

    print_cart(&actions.snapshot());

    drop(actions);
    match Arc::try_unwrap(store) {
        Ok(store) => store.close().await,
        Err(_) => warn!("Cart store still shared at exit, skipping close"),
    }

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shoebox=trace` - Trace shoebox crates only
/// - Default: `info,shoebox=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shoebox=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn open_storage(config: &ShoeboxConfig, memory: bool) -> Result<Arc<dyn CartStorage>> {
    if memory {
        info!("Using in-memory cart storage");
        return Ok(Arc::new(MemoryStorage::new()));
    }

    let path = config.storage.resolve_database_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let db = Database::new(DbConfig::new(&path))
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))?;

    if !db.health_check().await {
        anyhow::bail!("Database at {} is not answering queries", path.display());
    }

    Ok(Arc::new(SqliteStorage::new(db)))
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    let mut total = 0.0;
    for item in cart.items() {
        let subtotal = item.price * item.amount as f64;
        total += subtotal;
        println!(
            "{:>6}  {:<40} x{:<4} {:>10.2}",
            item.id, item.title, item.amount, subtotal
        );
    }

    let summary = cart.summary();
    println!(
        "{} products, {} units, total {:.2}",
        summary.line_count, summary.total_quantity, total
    );
}
