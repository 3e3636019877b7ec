//! One SQLite-backed repository shared by every table. A table plugs in by
//! implementing [`Record`]; [`SqliteStore`] then provides the whole
//! add/remove/get-one/get-all surface through [`Repository`].

use std::marker::PhantomData;

use log::{debug, error, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::connection::Database;
use crate::error::{StoreError, StoreResult};
use crate::models::RecordId;

/// Describes how one entity type maps onto its table.
pub trait Record: Sized {
    /// Row contents before an id is assigned.
    type Draft;

    /// Table name, also used in log lines and error messages.
    const TABLE: &'static str;
    /// Idempotent `CREATE TABLE IF NOT EXISTS` statement.
    const SCHEMA: &'static str;
    /// `SELECT <columns> FROM <table>` without a trailing clause.
    const SELECT: &'static str;
    /// Parameterized `INSERT` whose placeholders line up with [`Record::bind`].
    const INSERT: &'static str;

    fn bind(draft: &Self::Draft) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// CRUD contract shared by the book and reader stores.
pub trait Repository {
    type Item: Record;

    /// Create the table if needed. Safe to call on every startup.
    fn initialize(&self) -> StoreResult<()>;

    /// Insert a row and return the identifier SQLite assigned to it.
    fn add(&self, draft: &<Self::Item as Record>::Draft) -> StoreResult<RecordId>;

    /// Delete a row. Missing ids are not an error.
    fn remove(&self, id: RecordId) -> StoreResult<()>;

    /// `Ok(None)` when no row has this id.
    fn get_by_id(&self, id: RecordId) -> StoreResult<Option<Self::Item>>;

    /// Every row, ordered by id.
    fn get_all(&self) -> StoreResult<Vec<Self::Item>>;
}

/// [`Repository`] over one table of a [`Database`].
#[derive(Debug, Clone)]
pub struct SqliteStore<R> {
    db: Database,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> SqliteStore<R> {
    /// Wrap the database without touching it.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    /// Wrap the database and make sure the table exists.
    pub fn open(db: Database) -> StoreResult<Self> {
        let store = Self::new(db);
        store.initialize()?;
        Ok(store)
    }
}

impl<R: Record> Repository for SqliteStore<R> {
    type Item = R;

    fn initialize(&self) -> StoreResult<()> {
        self.db.prepare_location()?;

        let conn = self
            .db
            .session()
            .map_err(StoreError::unavailable(self.db.path()))?;
        conn.execute_batch(R::SCHEMA)
            .inspect_err(|err| {
                error!(
                    "event=schema_init module=store table={} status=error error={err}",
                    R::TABLE
                )
            })
            .map_err(StoreError::unavailable(self.db.path()))?;

        info!("event=schema_init module=store table={} status=ok", R::TABLE);
        Ok(())
    }

    fn add(&self, draft: &R::Draft) -> StoreResult<RecordId> {
        let conn = self.db.session().map_err(StoreError::write(R::TABLE))?;
        conn.execute(R::INSERT, params_from_iter(R::bind(draft)))
            .inspect_err(|err| {
                error!(
                    "event=record_add module=store table={} status=error error={err}",
                    R::TABLE
                )
            })
            .map_err(StoreError::write(R::TABLE))?;

        let id = conn.last_insert_rowid();
        info!(
            "event=record_add module=store table={} status=ok id={id}",
            R::TABLE
        );
        Ok(id)
    }

    fn remove(&self, id: RecordId) -> StoreResult<()> {
        let conn = self.db.session().map_err(StoreError::write(R::TABLE))?;
        let deleted = conn
            .execute(&format!("DELETE FROM {} WHERE Id = ?1", R::TABLE), params![id])
            .inspect_err(|err| {
                error!(
                    "event=record_remove module=store table={} status=error id={id} error={err}",
                    R::TABLE
                )
            })
            .map_err(StoreError::write(R::TABLE))?;

        info!(
            "event=record_remove module=store table={} status=ok id={id} deleted={deleted}",
            R::TABLE
        );
        Ok(())
    }

    fn get_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        let conn = self.db.session().map_err(StoreError::read(R::TABLE))?;
        let record = conn
            .query_row(
                &format!("{} WHERE Id = ?1", R::SELECT),
                params![id],
                |row| R::from_row(row),
            )
            .optional()
            .inspect_err(|err| {
                error!(
                    "event=record_get module=store table={} status=error id={id} error={err}",
                    R::TABLE
                )
            })
            .map_err(StoreError::read(R::TABLE))?;

        debug!(
            "event=record_get module=store table={} id={id} found={}",
            R::TABLE,
            record.is_some()
        );
        Ok(record)
    }

    fn get_all(&self) -> StoreResult<Vec<R>> {
        let conn = self.db.session().map_err(StoreError::read(R::TABLE))?;
        let failed = |err: rusqlite::Error| {
            error!(
                "event=record_list module=store table={} status=error error={err}",
                R::TABLE
            );
            StoreError::read(R::TABLE)(err)
        };
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY Id", R::SELECT))
            .map_err(failed)?;

        let records = stmt
            .query_map([], |row| R::from_row(row))
            .map_err(failed)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(failed)?;

        debug!(
            "event=record_list module=store table={} count={}",
            R::TABLE,
            records.len()
        );
        Ok(records)
    }
}
