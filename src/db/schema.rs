//! Docset index schemas and dialect detection.

use crate::error::DbResult;
use crate::types::Dialect;
use rusqlite::Connection;

/// Flat search table of the legacy dialect.
pub const LEGACY_TABLE: &str = "searchIndex";

/// Tables that make up the modern (Core Data) dialect.
pub const MODERN_TABLES: [&str; 4] = [
    "ZTOKEN",
    "ZTOKENTYPE",
    "ZFILEPATH",
    "ZTOKENMETAINFORMATION",
];

/// Classifies an index database by its table catalogue.
///
/// Runs a single query against `sqlite_master`. A `searchIndex` table means
/// [`Dialect::Legacy`]; otherwise all four modern tables must be present for
/// [`Dialect::Modern`]. Anything else is unrecognized (`None`): guessing a
/// dialect would produce malformed queries or silently empty results.
///
/// # Errors
///
/// Returns `DbError::Sqlite` if the catalogue cannot be read (e.g. the file
/// is not a SQLite database).
pub fn detect_dialect(conn: &Connection) -> DbResult<Option<Dialect>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let has = |wanted: &str| tables.iter().any(|t| t.eq_ignore_ascii_case(wanted));

    if has(LEGACY_TABLE) {
        Ok(Some(Dialect::Legacy))
    } else if MODERN_TABLES.iter().all(|t| has(t)) {
        Ok(Some(Dialect::Modern))
    } else {
        Ok(None)
    }
}
