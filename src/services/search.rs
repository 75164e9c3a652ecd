//! Search across the active docsets.
//!
//! A search runs synchronously, one docset after another:
//!
//! 1. patterns shorter than `min_length` return nothing without touching
//!    any connection
//! 2. the common and buffer-local docsets are registered as needed
//! 3. a pattern starting with `"<docset> "` narrows the search to that one
//!    docset, and the prefix is dropped from the pattern
//! 4. each selected docset is queried in its own dialect
//!
//! Results are concatenated in docset order and never re-sorted across
//! docsets. A docset that fails is reported in [`SearchOutcome::failures`]
//! and the remaining docsets are still searched.

use crate::config::Config;
use crate::error::{DocsetError, Error, SearchError};
use crate::locator::DocsetLocator;
use crate::query;
use crate::registry::{ConnectionRegistry, DocsetConnection, DocsetFailure};
use crate::services::format::format_candidate;
use crate::services::url::resolve_url;
use crate::types::Candidate;

/// Per-call search context: the docsets the caller's context activates
/// on top of the common ones.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    pub docsets: Vec<String>,
}

impl SearchContext {
    pub fn new<I, S>(docsets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            docsets: docsets.into_iter().map(Into::into).collect(),
        }
    }
}

/// Candidates of one search plus the docsets that could not be searched.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub candidates: Vec<Candidate>,
    pub failures: Vec<DocsetFailure>,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Strips a leading `"<docset> "` from `pattern`, comparing case-insensitively.
///
/// Returns the rest of the pattern, or `None` if it does not start with the
/// docset name followed by a space.
#[must_use]
pub fn strip_docset_prefix<'p>(pattern: &'p str, docset: &str) -> Option<&'p str> {
    let mut chars = pattern.char_indices();
    for expected in docset.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    match chars.next() {
        Some((idx, ' ')) => Some(&pattern[idx + 1..]),
        _ => None,
    }
}

/// Picks the docsets to query for `pattern` and the pattern each one sees.
///
/// The first active docset whose name prefixes the pattern wins and is
/// searched alone; otherwise every active docset gets the full pattern.
fn narrow<'a, 'p>(
    active: &[&'a DocsetConnection],
    pattern: &'p str,
) -> Vec<(&'a DocsetConnection, &'p str)> {
    for conn in active {
        if let Some(rest) = strip_docset_prefix(pattern, conn.name()) {
            tracing::debug!("Narrowed search to docset {}", conn.name());
            return vec![(*conn, rest)];
        }
    }
    active.iter().map(|conn| (*conn, pattern)).collect()
}

/// Search engine over an owned connection registry.
#[derive(Debug)]
pub struct SearchEngine {
    registry: ConnectionRegistry,
    config: Config,
}

impl SearchEngine {
    /// Creates an engine with an empty registry rooted at `config.docsets_root`.
    pub fn new(config: Config) -> Self {
        let registry = ConnectionRegistry::new(DocsetLocator::new(&config.docsets_root));
        Self { registry, config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn locator(&self) -> &DocsetLocator {
        self.registry.locator()
    }

    /// Drops every open connection. See [`ConnectionRegistry::reset`].
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    fn too_short(&self, pattern: &str) -> bool {
        pattern.chars().count() < self.config.min_length
    }

    /// Searches the common docsets plus the docsets of `context`.
    pub fn search(&mut self, pattern: &str, context: &SearchContext) -> SearchOutcome {
        if self.too_short(pattern) {
            return SearchOutcome::default();
        }

        let mut failures = self.registry.ensure_common(&self.config.common_docsets);
        failures.extend(self.registry.ensure_buffer_local(&context.docsets));

        let active = self
            .registry
            .filtered_for(&self.config.common_docsets, &context.docsets);

        let mut candidates = Vec::new();
        for (conn, effective) in narrow(&active, pattern) {
            match self.search_connection(conn, effective) {
                Ok(found) => candidates.extend(found),
                Err(e) => {
                    tracing::warn!("Search failed for docset {}: {e}", conn.name());
                    failures.push(DocsetFailure::new(conn.name(), e));
                }
            }
        }

        tracing::debug!(
            "Search {pattern:?}: {} candidates, {} failed docsets",
            candidates.len(),
            failures.len()
        );

        SearchOutcome {
            candidates,
            failures,
        }
    }

    /// Searches exactly one docset, opening it if needed. No narrowing
    /// happens, but a leading `"<docset> "` is still dropped.
    ///
    /// # Errors
    ///
    /// Returns `Error::Docset` if the docset cannot be registered and
    /// `Error::Search` if its query fails.
    pub fn search_docset(&mut self, pattern: &str, docset: &str) -> Result<Vec<Candidate>, Error> {
        if self.too_short(pattern) {
            return Ok(Vec::new());
        }

        self.registry.ensure(docset)?;
        let conn = self
            .registry
            .get(docset)
            .ok_or_else(|| DocsetError::NotFound {
                name: docset.to_string(),
            })?;
        let effective = strip_docset_prefix(pattern, docset).unwrap_or(pattern);
        self.search_connection(conn, effective)
    }

    /// Resolves a candidate to a URL. See [`resolve_url`].
    ///
    /// # Errors
    ///
    /// Returns `DocsetError::NotFound` if the docset no longer resolves on disk.
    pub fn resolve(&self, candidate: &Candidate) -> Result<String, Error> {
        Ok(resolve_url(
            self.locator(),
            &candidate.docset,
            &candidate.row.path,
            candidate.row.anchor.as_deref(),
        )?)
    }

    fn search_connection(
        &self,
        conn: &DocsetConnection,
        pattern: &str,
    ) -> Result<Vec<Candidate>, Error> {
        // An open handle outlives the file on most platforms, so a removed
        // docset is only noticed by looking at the disk again.
        if !conn.db_path().is_file() {
            return Err(DocsetError::NotFound {
                name: conn.name().to_string(),
            }
            .into());
        }

        let query = query::build(conn.dialect(), pattern, self.config.row_limit());
        let rows = conn
            .db()
            .fetch_rows(&query)
            .map_err(|source| SearchError::QueryExecution {
                docset: conn.name().to_string(),
                source,
            })?;

        Ok(rows
            .into_iter()
            .map(|row| Candidate {
                display: format_candidate(&self.config.candidate_format, conn.name(), &row),
                docset: conn.name().to_string(),
                row,
            })
            .collect())
    }

    /// Active docsets for `context` that are currently registered, in
    /// search order.
    #[must_use]
    pub fn active_docsets(&self, context: &SearchContext) -> Vec<&str> {
        self.registry
            .filtered_for(&self.config.common_docsets, &context.docsets)
            .into_iter()
            .map(DocsetConnection::name)
            .collect()
    }
}
