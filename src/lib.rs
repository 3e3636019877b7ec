//! Core library surface for the library catalog.
//!
//! `db` owns the two SQLite-backed stores, `validation` holds the input format
//! rules the front-end applies before calling them, and `ui` is the terminal
//! menu that ties both together.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;
pub mod validation;

pub use config::CatalogConfig;
pub use db::{BookStore, Database, ReaderStore, Record, Repository, SqliteStore};
pub use error::{StoreError, StoreResult, UnavailableCause};
pub use logging::init_logging;
pub use models::{Book, NewBook, NewReader, Reader, RecordId};
pub use ui::{run_app, App};
pub use validation::{is_valid_author_name, is_valid_email, is_valid_year};
