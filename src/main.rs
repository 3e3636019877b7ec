//! Binary entry point: resolve the data directory, start file logging, open
//! both stores against the same SQLite file, and hand them to the menu loop.
use anyhow::Context;
use library_catalog::{init_logging, run_app, App, BookStore, CatalogConfig, Database, ReaderStore};

fn main() -> anyhow::Result<()> {
    let config = CatalogConfig::from_home()?;
    let _logger = init_logging(&config)?;

    let db = Database::new(&config.db_path);
    let books = BookStore::open(db.clone()).context("failed to initialize book store")?;
    let readers = ReaderStore::open(db).context("failed to initialize reader store")?;

    let mut app = App::new(books, readers);
    run_app(&mut app)
}
