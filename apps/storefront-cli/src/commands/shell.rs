//! # Interactive Shell
//!
//! Line-oriented session over one catalog load and one cart.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin lines ─────────┐                                                 │
//! │                       ▼                                                 │
//! │               ┌───────────────┐  "search <text>"  ┌─────────────────┐   │
//! │               │ tokio::select!│──────────────────►│ SearchDebouncer │   │
//! │               │               │◄──────────────────│ (quiet period)  │   │
//! │               └───────────────┘   settled text    └─────────────────┘   │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │       other verbs run immediately against the Session                   │
//! │                                                                         │
//! │  EOF or `quit` drops the debounce handle. Pending search text is        │
//! │  flushed and rendered before the loop ends.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use clap::Parser;
use storefront_core::{ProductId, SortOrder};
use storefront_store::KeyValueStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use super::{cart, emit, product};
use crate::error::CliResult;
use crate::state::{DebounceHandle, SearchDebouncer, Session};

/// Verbs accepted inside the shell. `search` is handled before parsing so
/// its text is kept verbatim.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "shell", no_binary_name = true)]
enum ShellCommand {
    /// Show products under the current filters
    #[command(alias = "ls")]
    List,

    /// List categories
    Categories,

    /// Select a category ("all" for every category)
    Category { name: String },

    /// Price sort: default, asc, desc
    Sort { order: SortOrder },

    /// Reset search, category and sort
    ClearFilters,

    /// Product details
    Show { id: ProductId },

    /// Add units to the cart
    Add {
        id: ProductId,
        #[arg(default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a product from the cart
    #[command(alias = "rm")]
    Remove { id: ProductId },

    /// Set a line's quantity (0 or less removes it)
    Set {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Show the cart
    Cart,

    /// Empty the cart
    Clear,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// What the loop should do after a line.
enum Flow {
    Continue,
    Quit,
}

/// Runs the shell until EOF or `quit`.
pub async fn run_shell<S, R, W>(
    session: &mut Session<S>,
    debouncer: SearchDebouncer,
    input: R,
    out: &mut W,
    json: bool,
) -> CliResult<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!(delay_ms = debouncer.delay().as_millis() as u64, "Shell started");

    if !json {
        writeln!(
            out,
            "{} products loaded ({}). Type `help` for commands.",
            session.catalog().len(),
            session.origin()
        )?;
    }

    let (handle, mut settled) = debouncer.start();
    let mut handle = Some(handle);
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line(), if handle.is_some() => {
                let flow = match line? {
                    Some(line) => handle_line(session, handle.as_ref(), &line, out, json).await?,
                    None => Flow::Quit,
                };
                if let Flow::Quit = flow {
                    debug!("Shell input closed");
                    handle = None;
                }
            }
            text = settled.recv() => {
                match text {
                    Some(text) => {
                        session.listing.set_search(text);
                        emit(out, &product::list_products(session), json)?;
                    }
                    None => break,
                }
            }
        }
    }

    info!(cart_items = session.store.cart().total_item_count(), "Shell finished");
    Ok(())
}

async fn handle_line<S, W>(
    session: &mut Session<S>,
    handle: Option<&DebounceHandle>,
    line: &str,
    out: &mut W,
    json: bool,
) -> CliResult<Flow>
where
    S: KeyValueStore,
    W: Write,
{
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(Flow::Continue);
    }

    if let Some(text) = search_text(trimmed) {
        if let Some(handle) = handle {
            handle.push(text).await?;
        }
        return Ok(Flow::Continue);
    }

    let command = match ShellCommand::try_parse_from(trimmed.split_whitespace()) {
        Ok(command) => command,
        Err(e) => {
            write!(out, "{}", e.render())?;
            return Ok(Flow::Continue);
        }
    };

    if command == ShellCommand::Quit {
        return Ok(Flow::Quit);
    }

    if let Err(e) = dispatch(session, command, out, json) {
        if json {
            writeln!(out, "{}", serde_json::to_string(&e)?)?;
        } else {
            writeln!(out, "error: {}", e)?;
        }
    }

    Ok(Flow::Continue)
}

/// Text after a leading `search` word, untrimmed apart from one separator.
fn search_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("search")?;
    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix(' ')
    }
}

fn dispatch<S, W>(session: &mut Session<S>, command: ShellCommand, out: &mut W, json: bool) -> CliResult<()>
where
    S: KeyValueStore,
    W: Write,
{
    match command {
        ShellCommand::List => emit(out, &product::list_products(session), json),
        ShellCommand::Categories => emit(out, &product::list_categories(session), json),
        ShellCommand::Category { name } => {
            session.listing.set_category(name);
            emit(out, &product::list_products(session), json)
        }
        ShellCommand::Sort { order } => {
            session.listing.set_sort(order);
            if !json {
                writeln!(out, "Sort: {}", product::sort_label(order))?;
            }
            emit(out, &product::list_products(session), json)
        }
        ShellCommand::ClearFilters => {
            session.listing.clear_filters();
            emit(out, &product::list_products(session), json)
        }
        ShellCommand::Show { id } => emit(out, &product::show_product(session, id)?, json),
        ShellCommand::Add { id, quantity } => emit(out, &cart::add_to_cart(session, id, quantity)?, json),
        ShellCommand::Remove { id } => emit(out, &cart::remove_from_cart(session, id), json),
        ShellCommand::Set { id, quantity } => emit(out, &cart::set_quantity(session, id, quantity), json),
        ShellCommand::Cart => emit(out, &cart::get_cart(session), json),
        ShellCommand::Clear => emit(out, &cart::clear_cart(session), json),
        ShellCommand::Quit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use storefront_catalog::CatalogLoad;
    use storefront_store::{CartStore, MemoryStore};

    fn session() -> Session<MemoryStore> {
        Session::new(CatalogLoad::fallback(), CartStore::open(MemoryStore::new()))
    }

    async fn run(session: &mut Session<MemoryStore>, script: &str) -> String {
        let mut out = Vec::new();
        run_shell(
            session,
            SearchDebouncer::new(Duration::from_millis(50)),
            script.as_bytes(),
            &mut out,
            false,
        )
        .await
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_search_text_is_verbatim() {
        assert_eq!(search_text("search lap"), Some("lap"));
        assert_eq!(search_text("search  lap "), Some(" lap "));
        assert_eq!(search_text("search"), Some(""));
        assert_eq!(search_text("searching"), None);
        assert_eq!(search_text("list"), None);
    }

    #[test]
    fn test_parse_shell_commands() {
        let parse = |line: &str| ShellCommand::try_parse_from(line.split_whitespace());

        assert_eq!(parse("ls").unwrap(), ShellCommand::List);
        assert_eq!(
            parse("sort desc").unwrap(),
            ShellCommand::Sort { order: SortOrder::PriceDescending }
        );
        assert_eq!(
            parse("set 2 -1").unwrap(),
            ShellCommand::Set { id: ProductId::new(2), quantity: -1 }
        );
        assert_eq!(parse("clear-filters").unwrap(), ShellCommand::ClearFilters);
        assert_eq!(parse("exit").unwrap(), ShellCommand::Quit);
        assert!(parse("add banana").is_err());
    }

    #[tokio::test]
    async fn test_cart_session() {
        let mut session = session();
        let output = run(&mut session, "add 9 2\nadd 19 6\ncart\nquit\nadd 10\n").await;

        assert!(output.contains("Added 2 x Book to cart"));
        assert!(output.contains("Rejected: only 5 in stock, requested 6"));
        assert!(output.contains("Total Items: 2"));
        assert_eq!(session.store.quantity_of(ProductId::new(9)), 2);
        assert_eq!(session.store.quantity_of(ProductId::new(10)), 0);
    }

    #[tokio::test]
    async fn test_search_flushed_on_eof() {
        let mut session = session();
        let output = run(&mut session, "search l\nsearch la\nsearch lap\n").await;

        assert_eq!(session.listing.criteria().search, "lap");
        assert!(output.contains("Laptop"));
        assert!(output.contains("1 of 20 products"));
    }

    #[tokio::test]
    async fn test_filters_and_errors_keep_running() {
        let mut session = session();
        let output = run(&mut session, "category home\nsort asc\nshow 404\nfrobnicate\nclear-filters\n").await;

        assert!(output.contains("Sort: Price: Low to High"));
        assert!(output.contains("error: Product not found: 404"));
        assert!(!session.listing.has_active_filters());
        assert!(output.contains("20 of 20 products"));
    }
}
