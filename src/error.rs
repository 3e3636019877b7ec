//! Error taxonomy for the persistence layer. The front-end wraps these in
//! `anyhow` before they reach the footer, but the store API keeps them typed
//! so callers can tell an unreachable database apart from a failed query.

use std::path::PathBuf;

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The SQLite file, or the directory meant to hold it, could not be
    /// opened or created, or its schema could not be applied.
    #[error("storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: UnavailableCause,
    },
    #[error("failed to write to {table}: {source}")]
    StorageWrite {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to read from {table}: {source}")]
    StorageRead {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

/// What went wrong underneath a [`StoreError::StorageUnavailable`].
#[derive(Debug, Error)]
pub enum UnavailableCause {
    #[error("cannot create data directory: {0}")]
    Directory(#[from] std::io::Error),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn unavailable(
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(rusqlite::Error) -> Self {
        let path = path.into();
        move |source| StoreError::StorageUnavailable {
            path,
            source: source.into(),
        }
    }

    pub(crate) fn write(table: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StoreError::StorageWrite { table, source }
    }

    pub(crate) fn read(table: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StoreError::StorageRead { table, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_failure_is_storage_unavailable() {
        let err = StoreError::StorageUnavailable {
            path: PathBuf::from("/nope"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into(),
        };
        assert_eq!(
            err.to_string(),
            "storage unavailable at /nope: cannot create data directory: denied"
        );

        let err = StoreError::write("Books")(rusqlite::Error::QueryReturnedNoRows);
        assert!(!matches!(err, StoreError::StorageUnavailable { .. }));
        assert!(err.to_string().starts_with("failed to write to Books"));
    }
}
