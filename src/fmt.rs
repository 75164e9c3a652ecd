//! Human-friendly CLI output formatters.
//!
//! Each `fmt_*` function formats one command's output for terminal display.
//! When `color` is true, ANSI escape codes are emitted via `owo_colors`.

use crate::error::Error;
use crate::locator::DocsetLocator;
use crate::registry::DocsetFailure;
use crate::types::{Candidate, Dialect};
use owo_colors::OwoColorize;
use std::io::{self, Write};

// ── search ──────────────────────────────────────────────────────────────────

/// Prints one candidate per line, followed by its URL when `locator` is given.
pub fn fmt_search(
    w: &mut impl Write,
    candidates: &[Candidate],
    locator: Option<&DocsetLocator>,
    color: bool,
) -> io::Result<()> {
    for candidate in candidates {
        let entry_type = format!("{:<10}", candidate.row.entry_type);
        if color {
            writeln!(w, "{} {}", entry_type.dimmed(), candidate.display.bold())?;
        } else {
            writeln!(w, "{entry_type} {}", candidate.display)?;
        }

        if let Some(locator) = locator {
            match candidate.url(locator) {
                Ok(url) if color => writeln!(w, "           {}", url.cyan())?,
                Ok(url) => writeln!(w, "           {url}")?,
                Err(e) if color => writeln!(w, "           {}", e.to_string().red())?,
                Err(e) => writeln!(w, "           {e}")?,
            }
        }
    }

    Ok(())
}

// ── failures ────────────────────────────────────────────────────────────────

/// The wrapped error without the top-level category prefix.
fn failure_message(error: &Error) -> String {
    match error {
        Error::Docset(e) => e.to_string(),
        Error::Database(e) => e.to_string(),
        Error::Search(e) => e.to_string(),
        other => other.to_string(),
    }
}

/// Prints per-docset failures, one line each with the error code.
pub fn fmt_failures(w: &mut impl Write, failures: &[DocsetFailure], color: bool) -> io::Result<()> {
    for failure in failures {
        let code = failure.error.code();
        let message = failure_message(&failure.error);
        if color {
            writeln!(w, "{} {message} ({})", "skipped".yellow(), code.dimmed())?;
        } else {
            writeln!(w, "skipped {message} ({code})")?;
        }
    }
    Ok(())
}

// ── list ────────────────────────────────────────────────────────────────────

/// Prints installed docsets with their dialect, or `?` when the index could
/// not be classified.
pub fn fmt_list(
    w: &mut impl Write,
    docsets: &[(String, Option<Dialect>)],
    color: bool,
) -> io::Result<()> {
    for (name, dialect) in docsets {
        let dialect = dialect.map_or("?", Dialect::as_str);
        if color {
            writeln!(w, "{:<32} {}", name.bold(), dialect.dimmed())?;
        } else {
            writeln!(w, "{name:<32} {dialect}")?;
        }
    }

    if docsets.is_empty() {
        writeln!(w, "No docsets installed")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DbError, DocsetError, SearchError};
    use crate::types::IndexRow;

    fn candidate() -> Candidate {
        Candidate {
            display: "Redis BLPOP".to_string(),
            docset: "Redis".to_string(),
            row: IndexRow {
                entry_type: "Command".to_string(),
                name: "BLPOP".to_string(),
                path: "commands/blpop.html".to_string(),
                anchor: None,
            },
        }
    }

    #[test]
    fn test_fmt_search_plain() {
        let mut out = Vec::new();
        fmt_search(&mut out, &[candidate()], None, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Command    Redis BLPOP\n");
    }

    #[test]
    fn test_fmt_search_with_unresolvable_url() {
        let mut out = Vec::new();
        let locator = DocsetLocator::new("/nonexistent/root");
        fmt_search(&mut out, &[candidate()], Some(&locator), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Docset not found: Redis"));
    }

    #[test]
    fn test_fmt_failures() {
        let mut out = Vec::new();
        let failures = vec![DocsetFailure::from(DocsetError::NotFound {
            name: "Go".to_string(),
        })];
        fmt_failures(&mut out, &failures, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "skipped Docset not found: Go (DOCSET_NOT_FOUND)\n"
        );
    }

    #[test]
    fn test_fmt_failures_query_error() {
        let mut out = Vec::new();
        let failures = vec![DocsetFailure::new(
            "Redis",
            SearchError::QueryExecution {
                docset: "Redis".to_string(),
                source: DbError::Sqlite(rusqlite::Error::InvalidQuery),
            },
        )];
        fmt_failures(&mut out, &failures, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("skipped Query failed for docset Redis: "));
        assert!(!text.contains("Search error:"));
        assert!(text.ends_with("(QUERY_FAILED)\n"));
    }

    #[test]
    fn test_fmt_list() {
        let mut out = Vec::new();
        let docsets = vec![
            ("Go".to_string(), Some(Dialect::Modern)),
            ("Broken".to_string(), None),
        ];
        fmt_list(&mut out, &docsets, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().next().unwrap().ends_with("modern"));
        assert!(text.lines().nth(1).unwrap().ends_with('?'));

        let mut out = Vec::new();
        fmt_list(&mut out, &[], false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No docsets installed\n");
    }
}
