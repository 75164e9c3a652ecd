//! Builders for on-disk docsets used by tests and benchmarks.
//!
//! Writes index databases in both dialects with the same table layout
//! real docset generators produce, so the read path is exercised against
//! genuine SQLite files.

use crate::error::{DbResult, Result};
use crate::locator::INDEX_FILE;
use crate::types::Dialect;
use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};

/// One entry to write into a fixture index.
#[derive(Debug, Clone)]
pub struct Entry {
    pub entry_type: String,
    pub name: String,
    pub path: String,
    pub anchor: Option<String>,
}

impl Entry {
    pub fn new(entry_type: &str, name: &str, path: &str) -> Self {
        Self {
            entry_type: entry_type.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            anchor: None,
        }
    }

    /// Sets the anchor. Legacy indexes have no anchor column, so the
    /// anchor is folded into the path as a `#fragment` there.
    #[must_use]
    pub fn with_anchor(mut self, anchor: &str) -> Self {
        self.anchor = Some(anchor.to_string());
        self
    }
}

/// Creates the flat legacy `searchIndex` table.
///
/// # Errors
///
/// Returns `DbError::Sqlite` if table creation fails.
pub fn create_legacy_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS searchIndex (
            id INTEGER PRIMARY KEY,
            name TEXT,
            type TEXT,
            path TEXT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS anchor ON searchIndex (name, type, path);
        ",
    )?;
    Ok(())
}

/// Creates the Core Data tables of the modern dialect.
///
/// # Errors
///
/// Returns `DbError::Sqlite` if table creation fails.
pub fn create_modern_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS ZTOKENTYPE (
            Z_PK INTEGER PRIMARY KEY,
            ZTYPENAME VARCHAR
        );
        CREATE TABLE IF NOT EXISTS ZFILEPATH (
            Z_PK INTEGER PRIMARY KEY,
            ZPATH VARCHAR
        );
        CREATE TABLE IF NOT EXISTS ZTOKEN (
            Z_PK INTEGER PRIMARY KEY,
            ZTOKENNAME VARCHAR,
            ZTOKENTYPE INTEGER,
            ZMETAINFORMATION INTEGER
        );
        CREATE TABLE IF NOT EXISTS ZTOKENMETAINFORMATION (
            Z_PK INTEGER PRIMARY KEY,
            ZTOKEN INTEGER,
            ZFILE INTEGER,
            ZANCHOR VARCHAR
        );
        ",
    )?;
    Ok(())
}

/// Writes a fresh index database at `path` in the given dialect.
///
/// # Errors
///
/// Returns `DbError::Sqlite` if the database cannot be written.
pub fn write_index(path: &Path, dialect: Dialect, entries: &[Entry]) -> DbResult<()> {
    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;

    match dialect {
        Dialect::Legacy => {
            create_legacy_schema(&tx)?;
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO searchIndex (name, type, path) VALUES (?1, ?2, ?3)",
            )?;
            for entry in entries {
                let path = match &entry.anchor {
                    Some(anchor) => format!("{}#{anchor}", entry.path),
                    None => entry.path.clone(),
                };
                stmt.execute(params![entry.name, entry.entry_type, path])?;
            }
        }
        Dialect::Modern => {
            create_modern_schema(&tx)?;
            for (i, entry) in entries.iter().enumerate() {
                let pk = i64::try_from(i).unwrap_or(i64::MAX) + 1;
                tx.execute(
                    "INSERT INTO ZTOKENTYPE (Z_PK, ZTYPENAME) VALUES (?1, ?2)",
                    params![pk, entry.entry_type],
                )?;
                tx.execute(
                    "INSERT INTO ZFILEPATH (Z_PK, ZPATH) VALUES (?1, ?2)",
                    params![pk, entry.path],
                )?;
                tx.execute(
                    "INSERT INTO ZTOKEN (Z_PK, ZTOKENNAME, ZTOKENTYPE, ZMETAINFORMATION) \
                     VALUES (?1, ?2, ?1, ?1)",
                    params![pk, entry.name],
                )?;
                tx.execute(
                    "INSERT INTO ZTOKENMETAINFORMATION (Z_PK, ZTOKEN, ZFILE, ZANCHOR) \
                     VALUES (?1, ?1, ?1, ?2)",
                    params![pk, entry.anchor],
                )?;
            }
        }
    }

    tx.commit()?;
    Ok(())
}

/// Creates `<root>/<name>.docset` with an index in `dialect` and an empty
/// `Documents` directory. Returns the docset directory.
///
/// # Errors
///
/// Returns `Error::Io` if the directories cannot be created and
/// `Error::Database` if the index cannot be written.
pub fn create_docset(
    root: &Path,
    name: &str,
    dialect: Dialect,
    entries: &[Entry],
) -> Result<PathBuf> {
    let docset = root.join(format!("{name}.docset"));
    create_docset_at(&docset, dialect, entries)?;
    Ok(docset)
}

/// Like [`create_docset`] but at an arbitrary `.docset` directory, for the
/// nested install layouts.
///
/// # Errors
///
/// Returns `Error::Io` if the directories cannot be created and
/// `Error::Database` if the index cannot be written.
pub fn create_docset_at(docset: &Path, dialect: Dialect, entries: &[Entry]) -> Result<()> {
    let resources = docset.join("Contents").join("Resources");
    fs::create_dir_all(resources.join("Documents"))?;
    write_index(&resources.join(INDEX_FILE), dialect, entries)?;
    Ok(())
}

/// A small Redis-like command set.
#[must_use]
pub fn redis_entries() -> Vec<Entry> {
    vec![
        Entry::new("Command", "BLPOP", "commands/blpop.html"),
        Entry::new("Command", "BRPOP", "commands/brpop.html"),
        Entry::new("Command", "LPUSH", "commands/lpush.html"),
        Entry::new("Command", "LPUSHX", "commands/lpushx.html"),
        Entry::new("Command", "RPUSH", "commands/rpush.html"),
        Entry::new("Command", "GET", "commands/get.html"),
        Entry::new("Guide", "Redis persistence", "topics/persistence.html"),
    ]
}

/// A small Go-like symbol set.
#[must_use]
pub fn go_entries() -> Vec<Entry> {
    vec![
        Entry::new("Function", "strings.Split", "strings/index.html").with_anchor("Split"),
        Entry::new("Function", "strings.SplitN", "strings/index.html").with_anchor("SplitN"),
        Entry::new("Type", "strings.Builder", "strings/index.html").with_anchor("Builder"),
        Entry::new("Function", "bytes.Split", "bytes/index.html").with_anchor("Split"),
        Entry::new("Function", "redis.Dial", "third_party/redis.html"),
    ]
}
