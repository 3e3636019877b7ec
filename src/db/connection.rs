use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, error};
use rusqlite::Connection;

use crate::error::{StoreError, StoreResult};

/// How long a session waits on a locked file before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the catalog's SQLite file. It holds only the location; every
/// store call opens its own session and drops it before returning, so no
/// connection outlives a single operation.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure the directory that will hold the file exists.
    pub(crate) fn prepare_location(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| {
                error!(
                    "event=db_prepare module=db status=error path={} error={source}",
                    parent.display()
                );
                StoreError::StorageUnavailable {
                    path: parent.to_path_buf(),
                    source: source.into(),
                }
            })?;
        }
        Ok(())
    }

    /// Open a connection scoped to the caller. SQLite creates the file on
    /// first use; the connection closes when the returned value is dropped.
    pub(crate) fn session(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path).inspect_err(|err| {
            error!(
                "event=db_open module=db status=error path={} error={err}",
                self.path.display()
            );
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        debug!(
            "event=db_open module=db status=ok path={}",
            self.path.display()
        );
        Ok(conn)
    }
}
