mod queries;

use std::path::{Path, PathBuf};

use loadlink_application::{
    ApplicationError, DestinationStore, DestinationTransaction, InsertOutcome, SourceStore,
};
use loadlink_domain::{Link, RecordKind, Thumbnail};
use rusqlite::{Connection, OpenFlags, Row, Transaction, TransactionBehavior};
use tracing::debug;

use crate::migrations::MIGRATIONS;

/// Read-only SQLite store rows are exported from.
pub struct SqliteSourceStore {
    path: PathBuf,
    conn: Connection,
}

impl SqliteSourceStore {
    /// Fails when the database file does not exist; a source is never created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApplicationError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|error| {
            ApplicationError::Connection(format!(
                "failed to open source store {}: {error}",
                path.display()
            ))
        })?;
        debug!(path = %path.display(), "opened source store");

        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }

    fn scan<T>(
        &self,
        kind: RecordKind,
        sql: &str,
        decode: fn(&Row<'_>) -> rusqlite::Result<T>,
        visit: &mut dyn FnMut(T) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError> {
        let scan_error = |error: rusqlite::Error| {
            ApplicationError::Data(format!(
                "failed to scan {} in {}: {error}",
                kind.table_name(),
                self.path.display()
            ))
        };

        let mut stmt = self.conn.prepare(sql).map_err(scan_error)?;
        let mut rows = stmt.query([]).map_err(scan_error)?;
        while let Some(row) = rows.next().map_err(scan_error)? {
            let record = decode(row).map_err(scan_error)?;
            visit(record)?;
        }
        Ok(())
    }
}

impl SourceStore for SqliteSourceStore {
    fn scan_links(
        &self,
        visit: &mut dyn FnMut(Link) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError> {
        self.scan(
            RecordKind::Link,
            queries::SELECT_LINKS,
            queries::link_from_row,
            visit,
        )
    }

    fn scan_thumbnails(
        &self,
        visit: &mut dyn FnMut(Thumbnail) -> Result<(), ApplicationError>,
    ) -> Result<(), ApplicationError> {
        self.scan(
            RecordKind::Thumbnail,
            queries::SELECT_THUMBNAILS,
            queries::thumbnail_from_row,
            visit,
        )
    }
}

/// SQLite store records are imported into.
pub struct SqliteDestinationStore {
    path: PathBuf,
    conn: Connection,
}

impl SqliteDestinationStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApplicationError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ApplicationError::Connection(
                "destination store path must not be empty".to_string(),
            ));
        }

        let conn = Connection::open(path).map_err(|error| {
            ApplicationError::Connection(format!(
                "failed to open destination store {}: {error}",
                path.display()
            ))
        })?;
        debug!(path = %path.display(), "opened destination store");

        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }

    /// Read helpers for checking what an import left behind.
    pub fn find_link(&self, uid: &str) -> Result<Option<Link>, ApplicationError> {
        queries::find_link(&self.conn, uid).map_err(|error| self.read_error(error))
    }

    pub fn find_thumbnail(&self, uid: &str) -> Result<Option<Thumbnail>, ApplicationError> {
        queries::find_thumbnail(&self.conn, uid).map_err(|error| self.read_error(error))
    }

    pub fn count(&self, kind: RecordKind) -> Result<i64, ApplicationError> {
        queries::count_rows(&self.conn, kind.table_name()).map_err(|error| self.read_error(error))
    }

    fn read_error(&self, error: rusqlite::Error) -> ApplicationError {
        ApplicationError::Data(format!("failed to read {}: {error}", self.path.display()))
    }
}

impl DestinationStore for SqliteDestinationStore {
    fn initialize(&self) -> Result<(), ApplicationError> {
        for migration in MIGRATIONS {
            self.conn.execute_batch(migration).map_err(|error| {
                ApplicationError::Connection(format!(
                    "failed to prepare schema in {}: {error}",
                    self.path.display()
                ))
            })?;
        }
        Ok(())
    }

    /// SQLite transactions are serializable. `IMMEDIATE` takes the write lock
    /// up front so no other writer can interleave with the import.
    fn begin(&self) -> Result<Box<dyn DestinationTransaction + '_>, ApplicationError> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)
            .map_err(|error| {
                ApplicationError::Transaction(format!(
                    "failed to begin transaction on {}: {error}",
                    self.path.display()
                ))
            })?;
        Ok(Box::new(SqliteTransaction { tx }))
    }
}

/// Rolls back on drop unless committed.
struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl DestinationTransaction for SqliteTransaction<'_> {
    fn insert_link(&self, link: &Link) -> Result<InsertOutcome, ApplicationError> {
        let written = queries::insert_link(&self.tx, link).map_err(|error| {
            ApplicationError::Transaction(format!("failed to insert link {:?}: {error}", link.uid))
        })?;
        Ok(insert_outcome(written))
    }

    fn insert_thumbnail(&self, thumbnail: &Thumbnail) -> Result<InsertOutcome, ApplicationError> {
        let written = queries::insert_thumbnail(&self.tx, thumbnail).map_err(|error| {
            ApplicationError::Transaction(format!(
                "failed to insert thumbnail {:?}: {error}",
                thumbnail.uid
            ))
        })?;
        Ok(insert_outcome(written))
    }

    fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
        self.tx
            .commit()
            .map_err(|error| ApplicationError::Transaction(format!("failed to commit: {error}")))
    }
}

fn insert_outcome(written: usize) -> InsertOutcome {
    if written == 0 {
        InsertOutcome::Skipped
    } else {
        InsertOutcome::Inserted
    }
}
