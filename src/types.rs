//! Core domain types for dashdocs.
//!
//! These types are shared by the query builder, the registry and the
//! search engine, and are what callers receive back from a search.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index database schema used by a docset.
///
/// Docset indexes come in exactly two fixed layouts, so this is a closed
/// set and every dialect-dependent decision is an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Flat `searchIndex(id, name, type, path)` table written by Dash-style
    /// docset generators.
    Legacy,
    /// Core Data schema (`ZTOKEN`, `ZTOKENTYPE`, `ZFILEPATH`,
    /// `ZTOKENMETAINFORMATION`) written by Apple-style generators.
    Modern,
}

impl Dialect {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Modern => "modern",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single match read from a docset index, normalized across dialects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    /// Entry type, e.g. `Function`, `Class`, `Command`.
    pub entry_type: String,
    /// Entry name the search terms matched against.
    pub name: String,
    /// Path relative to the docset's `Documents` directory. Legacy indexes
    /// may embed `<dash_entry_...>` markers and a `#fragment` here.
    pub path: String,
    /// Anchor within the page (modern indexes only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

/// A search result paired with the docset it came from.
///
/// Keeps the raw row so the URL can be resolved later without querying
/// the index again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Text rendered from the configured candidate format.
    pub display: String,
    pub docset: String,
    #[serde(flatten)]
    pub row: IndexRow,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

// Compile-time assertions for thread safety.
#[cfg(test)]
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Dialect>();
    assert_send_sync::<IndexRow>();
    assert_send_sync::<Candidate>();
};
