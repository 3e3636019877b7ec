use rusqlite::types::Value;
use rusqlite::Row;

use super::store::{Record, Repository, SqliteStore};
use crate::error::StoreResult;
use crate::models::{Book, NewBook, RecordId};

/// Store owning the `Books` table.
pub type BookStore = SqliteStore<Book>;

impl Record for Book {
    type Draft = NewBook;

    const TABLE: &'static str = "Books";
    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS Books (
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Title TEXT NOT NULL,
            Author TEXT NOT NULL,
            YearPublished INTEGER NOT NULL
        )";
    const SELECT: &'static str = "SELECT Id, Title, Author, YearPublished FROM Books";
    const INSERT: &'static str =
        "INSERT INTO Books (Title, Author, YearPublished) VALUES (?1, ?2, ?3)";

    fn bind(draft: &NewBook) -> Vec<Value> {
        vec![
            Value::Text(draft.title.clone()),
            Value::Text(draft.author.clone()),
            Value::Integer(i64::from(draft.year_published)),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Book {
            id: row.get("Id")?,
            title: row.get("Title")?,
            author: row.get("Author")?,
            year_published: row.get("YearPublished")?,
        })
    }
}

impl BookStore {
    /// Field-by-field form of [`Repository::add`]. Format checks are the
    /// caller's job; see [`crate::validation`].
    pub fn add_book(&self, title: &str, author: &str, year_published: i32) -> StoreResult<RecordId> {
        self.add(&NewBook::new(title, author, year_published))
    }
}
