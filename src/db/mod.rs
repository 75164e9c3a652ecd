//! Read-only access to docset index databases.

mod pragmas;
mod schema;

pub use pragmas::{apply_pragmas, apply_pragmas_raw};
pub use schema::{detect_dialect, LEGACY_TABLE, MODERN_TABLES};

use crate::error::{DbError, DbResult};
use crate::query::IndexQuery;
use crate::types::{Dialect, IndexRow};
use r2d2::{ManageConnection, Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Handle to one docset's index database.
///
/// Uses r2d2 because `rusqlite::Connection` is NOT Sync. Searches run one
/// at a time, so the pool holds a single connection that stays open for
/// the lifetime of the handle.
///
/// The file is opened with `SQLITE_OPEN_READ_ONLY` and `query_only` set:
/// docset indexes are never written.
pub struct IndexDb {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl IndexDb {
    /// Opens an existing index database read-only.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Sqlite` if the file cannot be opened or initialized,
    /// and `DbError::Pool` if the pool cannot be built afterwards.
    pub fn open(path: &Path) -> DbResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;
        let manager = SqliteConnectionManager::file(path)
            .with_flags(flags)
            .with_init(|conn| apply_pragmas_raw(conn));

        // The pool retries failed connects until its timeout, so an
        // unreadable file is rejected here first with its own error.
        drop(manager.connect()?);

        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_secs(5))
            .build(manager)?;

        tracing::debug!("Opened index {}", path.display());

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Gets the pooled connection.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Pool` if no connection is available within the timeout.
    pub fn conn(&self) -> DbResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(DbError::from)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Classifies the index schema. See [`detect_dialect`].
    ///
    /// # Errors
    ///
    /// Returns `DbError::Sqlite` if the table catalogue cannot be read.
    pub fn detect_dialect(&self) -> DbResult<Option<Dialect>> {
        let conn = self.conn()?;
        detect_dialect(&conn)
    }

    /// Runs a query built by [`crate::query::build`] and normalizes its rows.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Pool` if no connection is available.
    /// Returns `DbError::Sqlite` if the query execution fails.
    pub fn fetch_rows(&self, query: &IndexQuery) -> DbResult<Vec<IndexRow>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(&query.sql)?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(query.params.iter()), |row| {
                Ok(IndexRow {
                    entry_type: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    path: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    anchor: row
                        .get::<_, Option<String>>(3)?
                        .filter(|anchor| !anchor.is_empty()),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

impl std::fmt::Debug for IndexDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexDb").field("path", &self.path).finish()
    }
}
