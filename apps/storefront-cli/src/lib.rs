//! # Storefront CLI
//!
//! Terminal front end over the storefront crates.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        storefront (binary)                              │
//! │                                                                         │
//! │  main.rs ────► parse args, init tracing, run(), map errors to exit code│
//! │                                                                         │
//! │  lib.rs ─────► config ─► catalog load ─► cart store ─► Session         │
//! │                                                                         │
//! │  commands/ ──► products, categories, show, add, remove, set,           │
//! │                cart, clear, shell                                       │
//! │                                                                         │
//! │  state/ ─────► ListingState, SearchDebouncer, Session                  │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │ storefront-core  │ │ storefront-store │ │ storefront-catalog   │    │
//! │  │ cart + filters   │ │ <data_dir>/      │ │ GET /products or     │    │
//! │  │                  │ │   cart.json      │ │ built-in fallback    │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (defaults, file, environment, flags)
//! 3. Load the catalog (remote with fallback, or static when offline)
//! 4. Open the cart store and hydrate the cart
//! 5. Dispatch the command

use std::io::{self, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_catalog::{CatalogLoad, CatalogSource, RemoteCatalogSource, StaticCatalogSource};
use storefront_store::{CartStore, FileStore, KeyValueStore};

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use cli::{Cli, Command};
use commands::{cart, emit, product, shell};
use config::AppConfig;
use error::CliResult;
use state::{SearchDebouncer, Session};

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Logs go to stderr so command
/// output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,storefront=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolves the effective configuration for `cli`.
///
/// Command-line flags override file and environment values.
pub fn resolve_config(cli: &Cli) -> CliResult<AppConfig> {
    let mut config = AppConfig::load(cli.config.clone())?;

    if cli.offline {
        config.offline = true;
    }
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }

    Ok(config)
}

/// Loads the catalog for `config`.
pub async fn load_catalog(config: &AppConfig) -> CliResult<CatalogLoad> {
    if config.offline {
        return Ok(StaticCatalogSource.load().await);
    }

    let source = RemoteCatalogSource::new(config.catalog.clone())?;
    Ok(source.load().await)
}

/// Runs one CLI invocation.
pub async fn run(cli: Cli) -> CliResult<()> {
    let config = resolve_config(&cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Command::Config { init } = cli.command {
        return show_config(&config, cli.config.clone(), init, &mut out, cli.json);
    }

    let load = load_catalog(&config).await?;
    let storage = FileStore::new(config.data_dir()?);
    storage.path_for(&config.storage.cart_key)?;
    let store = CartStore::open_with_key(storage, config.storage.cart_key.clone());
    let mut session = Session::new(load, store);

    info!(command = ?cli.command, "Running command");
    execute(&mut session, cli.command, &config, &mut out, cli.json).await
}

/// Dispatches `command` against an already assembled session.
pub async fn execute<S, W>(
    session: &mut Session<S>,
    command: Command,
    config: &AppConfig,
    out: &mut W,
    json: bool,
) -> CliResult<()>
where
    S: KeyValueStore,
    W: Write,
{
    match command {
        Command::Products(args) => {
            product::apply_args(&mut session.listing, &args);
            emit(out, &product::list_products(session), json)
        }
        Command::Categories => emit(out, &product::list_categories(session), json),
        Command::Show { id } => emit(out, &product::show_product(session, id)?, json),
        Command::Add { id, quantity } => emit(out, &cart::add_to_cart(session, id, quantity)?, json),
        Command::Remove { id } => emit(out, &cart::remove_from_cart(session, id), json),
        Command::Set { id, quantity } => emit(out, &cart::set_quantity(session, id, quantity), json),
        Command::Cart => emit(out, &cart::get_cart(session), json),
        Command::Clear => emit(out, &cart::clear_cart(session), json),
        Command::Shell => {
            let debouncer = SearchDebouncer::new(config.search.debounce());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run_shell(session, debouncer, stdin, out, json).await
        }
        Command::Config { init } => show_config(config, None, init, out, json),
    }
}

fn show_config<W: Write>(
    config: &AppConfig,
    path: Option<std::path::PathBuf>,
    init: bool,
    out: &mut W,
    json: bool,
) -> CliResult<()> {
    if init {
        let written = config.save(path)?;
        if !json {
            writeln!(out, "Wrote {}", written.display())?;
            return Ok(());
        }
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
    } else {
        write!(out, "{}", toml::to_string_pretty(config)?)?;
    }
    Ok(())
}
