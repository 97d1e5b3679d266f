//! # Storefront Entry Point
//!
//! Parses arguments, sets up logging and hands off to [`storefront_cli::run`].
//! The setup lives in lib.rs so it can be tested without a process.
//!
//! ## Exit Codes
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! | 0    | Success (including rejected cart mutations) |
//! | 1    | Internal error                   |
//! | 2    | Invalid input                    |
//! | 3    | Product not found                |
//! | 4    | Configuration error              |
//! | 5    | Storage error                    |
//! | 6    | Catalog error                    |

use std::process::ExitCode;

use clap::Parser;
use storefront_cli::cli::Cli;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    storefront_cli::init_tracing();

    let json = cli.json;
    match storefront_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(code = ?e.code, error = %e, "Command failed");
            if json {
                match serde_json::to_string(&e) {
                    Ok(encoded) => println!("{}", encoded),
                    Err(_) => eprintln!("error: {}", e),
                }
            } else {
                eprintln!("error: {}", e);
            }
            ExitCode::from(e.code.exit_code())
        }
    }
}
