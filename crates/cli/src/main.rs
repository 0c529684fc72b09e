//! Africlothing CLI - Drive the persisted cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products and variants in a saved catalog response
//! afc --catalog products.json catalog list
//!
//! # Add two units of a variant
//! afc --catalog products.json cart add --product 12 --variant awd-s --quantity 2
//!
//! # Change a quantity (0 or less removes the line)
//! afc cart set --product 12 --variant awd-s --quantity 1
//!
//! # Show the cart and the order summary
//! afc cart show
//! afc cart summary
//! ```
//!
//! # Commands
//!
//! - `catalog list` - List products from a catalog file
//! - `cart show|add|remove|set|clear|summary` - Cart operations
//!
//! Storage location, key and summary rates come from the `AFRICLOTHING_*`
//! environment variables (see `africlothing_cart::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::num::NonZeroU32;
use std::path::PathBuf;

use africlothing_core::{ProductId, VariantId};
use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "afc")]
#[command(author, version, about = "Africlothing cart tools")]
struct Cli {
    /// Catalog JSON file (a product array or a paginated API response)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the catalog file
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Operate on the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products and their variants
    List,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and total
    Show,
    /// Add units of a product variant (requires --catalog)
    Add {
        /// Product ID
        #[arg(short, long)]
        product: ProductId,

        /// Variant ID
        #[arg(short, long)]
        variant: VariantId,

        /// Units to add
        #[arg(short, long, default_value = "1")]
        quantity: NonZeroU32,
    },
    /// Remove a line
    Remove {
        /// Product ID
        #[arg(short, long)]
        product: ProductId,

        /// Variant ID
        #[arg(short, long)]
        variant: VariantId,
    },
    /// Set a line's quantity; 0 or less removes it
    Set {
        /// Product ID
        #[arg(short, long)]
        product: ProductId,

        /// Variant ID
        #[arg(short, long)]
        variant: VariantId,

        /// New quantity
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
    /// Show subtotal, shipping, tax and total
    Summary,
}

fn main() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "africlothing_cli=info,africlothing_cart=warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => {
                let catalog = commands::catalog::load(cli.catalog.as_deref())?;
                commands::catalog::list(&catalog);
            }
        },
        Commands::Cart { action } => {
            let config = africlothing_cart::CartConfig::from_env()?;
            let mut cart = commands::cart::open(&config)?;

            match action {
                CartAction::Show => commands::cart::show(&cart),
                CartAction::Add {
                    product,
                    variant,
                    quantity,
                } => {
                    let catalog = commands::catalog::load(cli.catalog.as_deref())?;
                    commands::cart::add(&mut cart, &catalog, product, &variant, quantity)?;
                }
                CartAction::Remove { product, variant } => {
                    commands::cart::remove(&mut cart, product, &variant);
                }
                CartAction::Set {
                    product,
                    variant,
                    quantity,
                } => commands::cart::set_quantity(&mut cart, product, &variant, quantity),
                CartAction::Clear => commands::cart::clear(&mut cart),
                CartAction::Summary => commands::cart::summary(&cart, &config.rates),
            }

            commands::cart::report_persistence(&cart)?;
        }
    }
    Ok(())
}
