//! Error types for dashdocs.
//!
//! Uses thiserror for ergonomic error handling with proper
//! error chain propagation. Every failure that concerns a single docset
//! carries the docset name so callers can report it without aborting
//! work on the other docsets.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Docset error: {0}")]
    Docset(#[from] DocsetError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors resolving or classifying a docset on disk.
#[derive(Error, Debug)]
pub enum DocsetError {
    /// No directory under the docsets root resolves for this name.
    /// Also covers docsets removed from disk after they were registered.
    #[error("Docset not found: {name}")]
    NotFound { name: String },

    /// The docset directory exists but has no index database.
    #[error("Docset {name} has no index database at {}", path.display())]
    IndexMissing { name: String, path: PathBuf },

    /// The index database matches neither known dialect.
    #[error("Docset {name} has an unrecognized index schema")]
    SchemaUnrecognized { name: String },

    #[error("Failed to open index for docset {name}: {source}")]
    Open {
        name: String,
        #[source]
        source: DbError,
    },
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

/// Search operation errors.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The index query failed (corrupt, locked or unreadable database).
    #[error("Query failed for docset {docset}: {source}")]
    QueryExecution {
        docset: String,
        #[source]
        source: DbError,
    },
}

/// Result type alias for top-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for database operations.
pub type DbResult<T> = std::result::Result<T, DbError>;

/// Result type alias for docset resolution.
pub type DocsetResult<T> = std::result::Result<T, DocsetError>;

// Error code implementations for machine-readable error responses
impl Error {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Docset(e) => e.code(),
            Self::Database(e) => e.code(),
            Self::Search(e) => e.code(),
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl DocsetError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "DOCSET_NOT_FOUND",
            Self::IndexMissing { .. } => "INDEX_MISSING",
            Self::SchemaUnrecognized { .. } => "SCHEMA_UNRECOGNIZED",
            Self::Open { source, .. } => source.code(),
        }
    }

    /// Name of the docset this error concerns.
    #[must_use]
    pub fn docset(&self) -> &str {
        match self {
            Self::NotFound { name }
            | Self::IndexMissing { name, .. }
            | Self::SchemaUnrecognized { name }
            | Self::Open { name, .. } => name,
        }
    }
}

impl DbError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "SQLITE_ERROR",
            Self::Pool(_) => "POOL_ERROR",
        }
    }
}

impl SearchError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::QueryExecution { .. } => "QUERY_FAILED",
        }
    }
}
