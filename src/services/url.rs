//! Resolution of index rows to browsable URLs.

use crate::error::DocsetResult;
use crate::locator::DocsetLocator;
use crate::types::Candidate;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// `<dash_entry_...>` markers some legacy indexes embed in paths.
fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"<dash_entry_[^>]*>").expect("valid marker regex"))
}

/// Strips every `<dash_entry_...>` marker from an index path.
///
/// Markers are removed verbatim; their contents are not interpreted.
#[must_use]
pub fn clean_path(path: &str) -> Cow<'_, str> {
    marker_regex().replace_all(path, "")
}

fn is_remote(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Resolves an index row of `docset` to a URL.
///
/// Remote `http(s)://` paths are returned as-is (plus `#anchor` when one is
/// given). Local paths become
/// `file:///<docset>/Contents/Resources/Documents/<path>[#anchor]` with
/// spaces percent-encoded.
///
/// # Errors
///
/// Returns `DocsetError::NotFound` if the docset no longer resolves on disk.
pub fn resolve_url(
    locator: &DocsetLocator,
    docset: &str,
    path: &str,
    anchor: Option<&str>,
) -> DocsetResult<String> {
    let cleaned = clean_path(path);
    let fragment = anchor.map(|a| format!("#{a}")).unwrap_or_default();

    if is_remote(&cleaned) {
        return Ok(format!("{cleaned}{fragment}"));
    }

    let documents = locator.documents_dir(docset)?;
    let documents = documents.to_string_lossy().replace('\\', "/");
    let url = format!(
        "file:///{}/{}{fragment}",
        documents.trim_matches('/'),
        cleaned.trim_start_matches('/'),
    );

    Ok(url.replace(' ', "%20"))
}

impl Candidate {
    /// Resolves this candidate's URL. See [`resolve_url`].
    ///
    /// # Errors
    ///
    /// Returns `DocsetError::NotFound` if the docset no longer resolves on disk.
    pub fn url(&self, locator: &DocsetLocator) -> DocsetResult<String> {
        resolve_url(locator, &self.docset, &self.row.path, self.row.anchor.as_deref())
    }
}
