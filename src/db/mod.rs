//! Persistence module split across logical submodules.

mod books;
mod connection;
mod readers;
mod store;

pub use books::BookStore;
pub use connection::Database;
pub use readers::ReaderStore;
pub use store::{Record, Repository, SqliteStore};
