//! Per-docset connection registry.
//!
//! Holds at most one open [`IndexDb`] per docset name, together with the
//! dialect detected when it was opened. Entries are created on demand and
//! only ever discarded all together by [`ConnectionRegistry::reset`].
//!
//! Connections come from two tiers that are merged per search:
//! - the common tier, docsets searched in every context, built from empty
//!   and then left alone until the next reset
//! - the buffer-local tier, docsets a particular caller context activates,
//!   added whenever a name is not registered yet
//!
//! The registry is plain owned state with `&mut self` mutation. A host that
//! shares it between threads must wrap it in its own lock.

use crate::db::IndexDb;
use crate::error::{DocsetError, DocsetResult, Error};
use crate::locator::DocsetLocator;
use crate::types::Dialect;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// An open docset index.
#[derive(Debug)]
pub struct DocsetConnection {
    name: String,
    db_path: PathBuf,
    dialect: Dialect,
    db: IndexDb,
}

impl DocsetConnection {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Dialect detected when the connection was opened; never re-detected.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    #[must_use]
    pub fn db(&self) -> &IndexDb {
        &self.db
    }
}

/// A docset that could not be registered or searched.
#[derive(Debug)]
pub struct DocsetFailure {
    pub docset: String,
    pub error: Error,
}

impl DocsetFailure {
    pub fn new(docset: impl Into<String>, error: impl Into<Error>) -> Self {
        Self {
            docset: docset.into(),
            error: error.into(),
        }
    }
}

impl From<DocsetError> for DocsetFailure {
    fn from(error: DocsetError) -> Self {
        Self::new(error.docset().to_string(), error)
    }
}

/// Registry of open docset connections, keyed by docset name.
#[derive(Debug)]
pub struct ConnectionRegistry {
    locator: DocsetLocator,
    entries: HashMap<String, DocsetConnection>,
    common_built: bool,
}

impl ConnectionRegistry {
    pub fn new(locator: DocsetLocator) -> Self {
        Self {
            locator,
            entries: HashMap::new(),
            common_built: false,
        }
    }

    #[must_use]
    pub fn locator(&self) -> &DocsetLocator {
        &self.locator
    }

    /// Registers the common docsets.
    ///
    /// Builds the common tier once after construction or
    /// [`reset`](Self::reset). Later calls are no-ops while the registry
    /// holds entries, so registered docsets are never re-opened or
    /// re-detected. While it is still empty the tier is built again, which
    /// picks up common docsets installed after an earlier attempt. A docset
    /// that fails to register is reported and skipped without affecting the
    /// rest of the batch.
    pub fn ensure_common(&mut self, names: &[String]) -> Vec<DocsetFailure> {
        if self.common_built && !self.entries.is_empty() {
            return Vec::new();
        }
        self.common_built = true;
        self.register_all(names)
    }

    /// Registers every buffer-local docset that is not registered yet.
    ///
    /// Additive only: existing entries, common ones included, are kept.
    pub fn ensure_buffer_local(&mut self, names: &[String]) -> Vec<DocsetFailure> {
        self.register_all(names)
    }

    /// Returns the connection for `name`, opening it if needed.
    ///
    /// # Errors
    ///
    /// Returns a `DocsetError` if the docset cannot be resolved, opened or
    /// classified.
    pub fn ensure(&mut self, name: &str) -> DocsetResult<&DocsetConnection> {
        if !self.entries.contains_key(name) {
            let conn = self.open(name)?;
            self.entries.insert(name.to_string(), conn);
        }
        self.entries
            .get(name)
            .ok_or_else(|| DocsetError::NotFound {
                name: name.to_string(),
            })
    }

    /// Drops every connection. Safe to call at any time, including on an
    /// empty registry; the next search re-creates connections on demand.
    pub fn reset(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.common_built = false;
        tracing::info!("Connection registry reset ({dropped} connections dropped)");
    }

    /// Registered connections whose name is in `local ∪ common`.
    ///
    /// Ordered local names first, then common names, each at its first
    /// occurrence; names that are not registered are left out.
    #[must_use]
    pub fn filtered_for(&self, common: &[String], local: &[String]) -> Vec<&DocsetConnection> {
        let mut seen = HashSet::new();
        local
            .iter()
            .chain(common)
            .filter(|name| seen.insert(name.as_str()))
            .filter_map(|name| self.entries.get(name))
            .collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DocsetConnection> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn dialect_of(&self, name: &str) -> Option<Dialect> {
        self.entries.get(name).map(DocsetConnection::dialect)
    }

    /// Registered docset names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn register_all(&mut self, names: &[String]) -> Vec<DocsetFailure> {
        let mut failures = Vec::new();
        for name in names {
            if let Err(e) = self.ensure(name) {
                tracing::warn!("Skipping docset {name}: {e}");
                failures.push(DocsetFailure::from(e));
            }
        }
        failures
    }

    fn open(&self, name: &str) -> DocsetResult<DocsetConnection> {
        let db_path = self.locator.db_path(name)?;
        if !db_path.is_file() {
            return Err(DocsetError::IndexMissing {
                name: name.to_string(),
                path: db_path,
            });
        }

        let db = IndexDb::open(&db_path).map_err(|source| DocsetError::Open {
            name: name.to_string(),
            source,
        })?;
        let dialect = db
            .detect_dialect()
            .map_err(|source| DocsetError::Open {
                name: name.to_string(),
                source,
            })?
            .ok_or_else(|| DocsetError::SchemaUnrecognized {
                name: name.to_string(),
            })?;

        tracing::debug!("Registered docset {name} ({dialect})");

        Ok(DocsetConnection {
            name: name.to_string(),
            db_path,
            dialect,
            db,
        })
    }
}
