//! Domain models that mirror the SQLite schema. They stay plain data holders:
//! persistence lives in `db`, input rules live in `validation`, and the UI only
//! needs `Display` to list them.

use std::fmt;

/// Store-assigned row identifier shared by both tables.
pub type RecordId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A catalogued book. `id` is assigned by SQLite on insert and never changes.
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    /// Entered as four digits, stored as an integer.
    pub year_published: i32,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} by {} ({})",
            self.id, self.title, self.author, self.year_published
        )
    }
}

/// Book fields before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year_published: i32,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year_published: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year_published,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A registered library reader.
pub struct Reader {
    pub id: RecordId,
    pub name: String,
    pub email: String,
}

impl fmt::Display for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} <{}>", self.id, self.name, self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReader {
    pub name: String,
    pub email: String,
}

impl NewReader {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
