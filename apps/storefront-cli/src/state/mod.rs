//! # State Module
//!
//! Session state for the storefront front end.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Session                                    │   │
//! │  │  catalog: Arc<Catalog>  (read-only, shared)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ ListingState │  │  CartStore   │  │ SearchDebouncer  │              │
//! │  │              │  │              │  │                  │              │
//! │  │  criteria    │  │  Cart        │  │  quiet period    │              │
//! │  │  visible()   │  │  persisted   │  │  latest text     │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • Session is owned by the running command and passed by &mut         │
//! │  • Catalog is shared read-only with CartStore via Arc                  │
//! │  • SearchDebouncer runs as its own task, talking over channels         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod listing;
mod search;
mod session;

pub use listing::ListingState;
pub use search::{DebounceHandle, SearchDebouncer};
pub use session::Session;
