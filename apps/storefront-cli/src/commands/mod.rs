//! # Commands Module
//!
//! Handlers behind each CLI subcommand and shell verb.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (output helper)
//! ├── product.rs  ◄─── Listing, categories, detail view
//! ├── cart.rs     ◄─── Cart view and mutations
//! └── shell.rs    ◄─── Interactive loop with debounced search
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  storefront add 3 2 --json                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  cart::add_to_cart(&mut session, id, qty) ─► CartMutationResponse       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  emit(out, &response, json)                                             │
//! │         │                                                               │
//! │         ├── json ──► serde_json::to_string_pretty                       │
//! │         └── text ──► Display                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers take the session by reference and return serializable
//! responses, so they run the same way from the shell and from tests.

use std::fmt::Display;
use std::io::Write;

use serde::Serialize;

use crate::error::CliResult;

pub mod cart;
pub mod product;
pub mod shell;

/// Writes a response as pretty JSON or as its text rendering.
pub fn emit<T, W>(out: &mut W, response: &T, json: bool) -> CliResult<()>
where
    T: Serialize + Display,
    W: Write,
{
    if json {
        let encoded = serde_json::to_string_pretty(response)?;
        writeln!(out, "{}", encoded)?;
    } else {
        write!(out, "{}", response)?;
    }
    Ok(())
}
