//! Shared fixtures for the store integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use library_catalog::{BookStore, Database, ReaderStore};
use tempfile::TempDir;

/// Temporary catalog directory, removed when the fixture is dropped.
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub db_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("library.db");
        Self { temp_dir, db_path }
    }

    pub fn database(&self) -> Database {
        Database::new(&self.db_path)
    }

    pub fn books(&self) -> BookStore {
        BookStore::open(self.database()).expect("failed to open book store")
    }

    pub fn readers(&self) -> ReaderStore {
        ReaderStore::open(self.database()).expect("failed to open reader store")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
