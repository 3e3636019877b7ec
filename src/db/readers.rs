use rusqlite::types::Value;
use rusqlite::Row;

use super::store::{Record, Repository, SqliteStore};
use crate::error::StoreResult;
use crate::models::{NewReader, Reader, RecordId};

/// Store owning the `Readers` table.
pub type ReaderStore = SqliteStore<Reader>;

impl Record for Reader {
    type Draft = NewReader;

    const TABLE: &'static str = "Readers";
    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS Readers (
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            Email TEXT NOT NULL
        )";
    const SELECT: &'static str = "SELECT Id, Name, Email FROM Readers";
    const INSERT: &'static str = "INSERT INTO Readers (Name, Email) VALUES (?1, ?2)";

    fn bind(draft: &NewReader) -> Vec<Value> {
        vec![
            Value::Text(draft.name.clone()),
            Value::Text(draft.email.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Reader {
            id: row.get("Id")?,
            name: row.get("Name")?,
            email: row.get("Email")?,
        })
    }
}

impl ReaderStore {
    pub fn add_reader(&self, name: &str, email: &str) -> StoreResult<RecordId> {
        self.add(&NewReader::new(name, email))
    }
}
