//! `SQLite` PRAGMA configuration for read-only index access.

use crate::error::DbResult;
use rusqlite::Connection;

/// Executes a single SQL statement that may return rows (PRAGMAs).
fn exec_stmt(conn: &Connection, sql: &str) -> rusqlite::Result<()> {
    conn.prepare(sql)?.query([])?.next()?;
    Ok(())
}

/// Applies read-tuned PRAGMA settings (raw rusqlite version).
///
/// Installed as the pool's connection initializer so every pooled
/// connection gets them. Returns raw `rusqlite::Result` for compatibility
/// with r2d2's error types.
///
/// Journal mode is left alone: docset indexes are opened read-only and
/// switching to WAL would need write access.
pub fn apply_pragmas_raw(conn: &Connection) -> rusqlite::Result<()> {
    // Refuse any statement that would modify the index
    exec_stmt(conn, "PRAGMA query_only = ON")?;
    // 8MB page cache (2000 pages * 4KB default page size)
    exec_stmt(conn, "PRAGMA cache_size = -8000")?;
    // 64MB memory-mapped I/O for faster LIKE scans
    exec_stmt(conn, "PRAGMA mmap_size = 67108864")?;
    // Docset installers may still hold the file briefly
    exec_stmt(conn, "PRAGMA busy_timeout = 5000")?;
    // Sorting by name length spills to temp storage on big indexes
    exec_stmt(conn, "PRAGMA temp_store = MEMORY")?;

    Ok(())
}

/// Applies read-tuned PRAGMA settings.
///
/// # Errors
///
/// Returns `DbError::Sqlite` if any PRAGMA statement fails.
pub fn apply_pragmas(conn: &Connection) -> DbResult<()> {
    apply_pragmas_raw(conn)?;
    Ok(())
}
