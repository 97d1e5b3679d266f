//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storefront_core::{ProductId, SortOrder};

/// storefront - browse the catalog and manage a persistent cart
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to storefront.toml (platform config dir by default)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Use the built-in catalog instead of fetching
    #[arg(long, global = true)]
    pub offline: bool,

    /// Directory holding the cart file
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // === Catalog ===
    /// List products, optionally filtered and sorted
    #[command(alias = "ls")]
    Products(ProductArgs),

    /// List product categories
    Categories,

    /// Show product details
    Show {
        /// Product id
        id: ProductId,
    },

    // === Cart ===
    /// Add a product to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Units to add
        #[arg(default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a product from the cart
    #[command(alias = "rm")]
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Set the quantity of a cart line (0 or less removes it)
    Set {
        /// Product id
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Show the cart with totals
    Cart,

    /// Empty the cart
    Clear,

    // === Session ===
    /// Interactive shell with debounced search
    Shell,

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Filters for `products`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductArgs {
    /// Case-insensitive name search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact category ("all" for every category)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Price sort: default, low-to-high (asc), high-to-low (desc)
    #[arg(long)]
    pub sort: Option<SortOrder>,
}
