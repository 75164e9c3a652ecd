//! dashdocs: offline documentation search over installed Dash docsets.
//!
//! A docset is a directory bundle holding a SQLite index plus the HTML
//! pages it points at. This library resolves which docsets are active,
//! queries each index with a user pattern, and maps the ranked matches to
//! browsable URLs.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 SearchEngine                 │
//! │   min-length check, narrowing, aggregation   │
//! └────────┬──────────────────────────┬──────────┘
//!          │                          │
//! ┌────────▼───────────┐     ┌────────▼───────────┐
//! │ ConnectionRegistry │     │   format / url     │
//! │  common + local    │     │  candidates, URLs  │
//! └────────┬───────────┘     └────────┬───────────┘
//!          │                          │
//! ┌────────▼───────────┐     ┌────────▼───────────┐
//! │  IndexDb + query   │     │   DocsetLocator    │
//! │  legacy / modern   │     │   <name>.docset    │
//! └────────┬───────────┘     └────────────────────┘
//!          │
//! ┌────────▼─────────────────────────────────────┐
//! │   docSet.dsidx (read-only SQLite via r2d2)   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous and single-threaded: opening an index and
//! running a query block the caller.

pub mod config;
pub mod db;
pub mod error;
#[doc(hidden)]
pub mod fixtures;
pub mod fmt;
pub mod locator;
pub mod query;
pub mod registry;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{DbError, DocsetError, Error, Result, SearchError};
pub use locator::DocsetLocator;
pub use registry::{ConnectionRegistry, DocsetConnection, DocsetFailure};
pub use services::{SearchContext, SearchEngine, SearchOutcome};
pub use types::{Candidate, Dialect, IndexRow};

use std::path::PathBuf;

/// Default docsets directory, `~/.docsets`.
///
/// Falls back to `./.docsets` when no home directory is known.
#[must_use]
pub fn default_docsets_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".docsets")
}
