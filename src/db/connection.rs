use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::errors::ServerError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(15);

/// Owned handle to the listing store.
///
/// Connections are opened lazily, handed to one operation at a time, and
/// returned to an idle list afterwards. Dropping the handle closes them all.
pub struct Database {
    path: PathBuf,
    busy_timeout: Duration,
    idle: Mutex<Vec<Connection>>,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            idle: Mutex::new(Vec::new()),
        }
    }

    /// How long a statement waits on a locked database before failing.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Opens the store, applies the schema and verifies a connection works.
    pub fn open(path: impl Into<PathBuf>, busy_timeout: Duration) -> Result<Self, ServerError> {
        let db = Self::new(path).with_busy_timeout(busy_timeout);
        init_db(&db)?;
        tracing::info!(path = %db.path.display(), "listing store connected");
        Ok(db)
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        let mut conn = self.checkout()?;
        let result = f(&mut conn);
        self.checkin(conn);
        result
    }

    fn checkout(&self) -> Result<Connection, ServerError> {
        let pooled = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();

        match pooled {
            Some(conn) => Ok(conn),
            None => {
                let conn = Connection::open(&self.path)
                    .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
                conn.busy_timeout(self.busy_timeout)
                    .map_err(|e| ServerError::DbError(format!("Set busy timeout failed: {e}")))?;
                tracing::debug!(path = %self.path.display(), "opened store connection");
                Ok(conn)
            }
        }
    }

    fn checkin(&self, conn: Connection) {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(conn);
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        let idle = self.idle.get_mut().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(connections = idle.len(), "closing listing store");
        idle.clear();
    }
}

/// Apply the schema. Safe to run on every start.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
    })
}
