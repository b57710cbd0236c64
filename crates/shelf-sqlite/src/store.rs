use parking_lot::Mutex;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, OpenFlags};
use shelf_core::{
    error::{Result, ShelfError},
    traits::ItemStore,
    types::{Column, ItemId, Payload, Row, Selection, SortOrder, Value},
    StoreConfig,
};
use std::sync::Arc;

use crate::schema::{self, TABLE_NAME};

/// SQLite-backed item store
///
/// One connection behind a mutex; SQLite serializes writers itself, so the
/// store adds no queueing or transactions of its own.
pub struct SqliteItemStore {
    conn: Arc<Mutex<Connection>>,
    config: StoreConfig,
}

impl SqliteItemStore {
    /// Get the underlying connection (for diagnostics and custom queries)
    pub fn conn(&self) -> &Arc<Mutex<Connection>> {
        &self.conn
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Configure SQLite connection
    fn configure_connection(conn: &Connection, cfg: &StoreConfig) -> Result<()> {
        if cfg.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| ShelfError::Config(e.to_string()))?;
        }

        conn.pragma_update(None, "synchronous", cfg.synchronous.as_pragma())
            .map_err(|e| ShelfError::Config(e.to_string()))?;

        conn.pragma_update(None, "cache_size", cfg.cache_size)
            .map_err(|e| ShelfError::Config(e.to_string()))?;

        Ok(())
    }

    fn select_sql(
        columns: &[Column],
        selection: Option<&Selection>,
        sort: Option<&SortOrder>,
    ) -> String {
        let names: Vec<&str> = columns.iter().map(Column::name).collect();
        let mut sql = format!("SELECT {} FROM {}", names.join(", "), TABLE_NAME);
        push_where(&mut sql, selection);
        if let Some(sort) = sort {
            sql.push_str(" ORDER BY ");
            sql.push_str(&sort.to_sql());
        }
        sql
    }
}

/// Drop a blank selection, arguments included
fn active(selection: Option<&Selection>) -> Option<&Selection> {
    selection.filter(|s| !s.is_empty())
}

fn push_where(sql: &mut String, selection: Option<&Selection>) {
    if let Some(selection) = selection {
        sql.push_str(" WHERE ");
        sql.push_str(selection.clause());
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(v) => SqlValue::Integer(*v),
        Value::Text(s) => SqlValue::Text(s.clone()),
    }
}

/// Only NULL, integers and UTF-8 text have a `Value` form
fn from_sql(column: Column, value: ValueRef<'_>) -> Result<Value> {
    match value {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(v) => Ok(Value::Integer(v)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|s| Value::Text(s.to_string()))
            .map_err(|e| ShelfError::storage(format!("column {}: {}", column, e))),
        ValueRef::Real(f) => Err(ShelfError::storage(format!(
            "column {} holds a real value ({})",
            column, f
        ))),
        ValueRef::Blob(_) => Err(ShelfError::storage(format!(
            "column {} holds a blob",
            column
        ))),
    }
}

fn selection_args(selection: Option<&Selection>) -> impl Iterator<Item = SqlValue> + '_ {
    selection
        .into_iter()
        .flat_map(|s| s.args().iter().map(to_sql))
}

impl ItemStore for SqliteItemStore {
    fn open(cfg: StoreConfig) -> Result<Self> {
        // Create parent directory if needed
        if let Some(parent) = cfg.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            &cfg.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;

        Self::configure_connection(&conn, &cfg)?;

        if schema::init(&conn, cfg.schema_version)? {
            tracing::info!("Created inventory table at {}", cfg.path.display());
        } else {
            tracing::debug!("Reusing inventory table at {}", cfg.path.display());
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config: cfg,
        })
    }

    fn close(&self) -> Result<()> {
        // SQLite connection closes automatically on drop
        Ok(())
    }

    fn query(
        &self,
        projection: Option<&[Column]>,
        selection: Option<&Selection>,
        sort: Option<&SortOrder>,
    ) -> Result<Vec<Row>> {
        let selection = active(selection);
        let columns: Arc<[Column]> = match projection {
            Some(cols) if !cols.is_empty() => Arc::from(cols),
            _ => Arc::from(&Column::ALL[..]),
        };
        let sql = Self::select_sql(&columns, selection, sort);

        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;
        let mut rows = stmt
            .query(params_from_iter(selection_args(selection)))
            .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| ShelfError::StorageFailure(e.to_string()))?
        {
            let mut values = Vec::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let cell = row
                    .get_ref(i)
                    .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;
                values.push(from_sql(*column, cell)?);
            }
            out.push(Row::new(columns.clone(), values));
        }

        Ok(out)
    }

    fn insert(&self, payload: &Payload) -> Result<Option<ItemId>> {
        if payload.is_empty() {
            return Err(ShelfError::InvalidState("insert with no values".into()));
        }

        let names: Vec<&str> = payload.iter().map(|(c, _)| c.name()).collect();
        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE_NAME,
            names.join(", "),
            placeholders
        );

        let conn = self.conn.lock();
        let written = conn
            .execute(&sql, params_from_iter(payload.iter().map(|(_, v)| to_sql(v))))
            .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;

        if written == 0 {
            return Ok(None);
        }
        Ok(Some(conn.last_insert_rowid()))
    }

    fn update(&self, payload: &Payload, selection: Option<&Selection>) -> Result<usize> {
        let selection = active(selection);
        if payload.is_empty() {
            return Err(ShelfError::InvalidState("update with no values".into()));
        }

        let assignments: Vec<String> = payload
            .iter()
            .map(|(c, _)| format!("{} = ?", c.name()))
            .collect();
        let mut sql = format!("UPDATE {} SET {}", TABLE_NAME, assignments.join(", "));
        push_where(&mut sql, selection);

        let params = payload
            .iter()
            .map(|(_, v)| to_sql(v))
            .chain(selection_args(selection));

        let conn = self.conn.lock();
        conn.execute(&sql, params_from_iter(params))
            .map_err(|e| ShelfError::StorageFailure(e.to_string()))
    }

    fn delete(&self, selection: Option<&Selection>) -> Result<usize> {
        let selection = active(selection);
        let mut sql = format!("DELETE FROM {}", TABLE_NAME);
        push_where(&mut sql, selection);

        let conn = self.conn.lock();
        conn.execute(&sql, params_from_iter(selection_args(selection)))
            .map_err(|e| ShelfError::StorageFailure(e.to_string()))
    }

    fn migrate(&self, target_version: u32) -> Result<()> {
        let conn = self.conn.lock();
        schema::migrate(&conn, target_version)
    }

    fn schema_version(&self) -> Result<u32> {
        let conn = self.conn.lock();
        schema::current_version(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::{Category, StockStatus};
    use tempfile::TempDir;

    fn open_store() -> (SqliteItemStore, TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let cfg = StoreConfig::new(temp_dir.path().join("inventory.db"));
        (SqliteItemStore::open(cfg).unwrap(), temp_dir)
    }

    fn item(name: &str, price: i64) -> Payload {
        Payload::new()
            .with_name(name)
            .with_category(Category::Books)
            .with_price(price)
            .with_quantity(1)
            .with_seller("Acme")
            .with_stock(StockStatus::Available)
    }

    #[test]
    fn test_insert_and_query() {
        let (store, _temp) = open_store();

        let id = store.insert(&item("Atlas", 300)).unwrap().unwrap();
        let rows = store.query(None, Some(&Selection::by_id(id)), None).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), Some(id));
        assert_eq!(rows[0].get_str(Column::Name), Some("Atlas"));
        assert_eq!(rows[0].get_i64(Column::Price), Some(300));
    }

    #[test]
    fn test_projection_and_sort() {
        let (store, _temp) = open_store();
        store.insert(&item("B", 2)).unwrap();
        store.insert(&item("A", 1)).unwrap();
        store.insert(&item("C", 3)).unwrap();

        let rows = store
            .query(
                Some(&[Column::Name]),
                None,
                Some(&SortOrder::desc(Column::Price)),
            )
            .unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.get_str(Column::Name).unwrap()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
        assert_eq!(rows[0].columns(), &[Column::Name]);
        assert_eq!(rows[0].id(), None);
    }

    #[test]
    fn test_filtered_update_and_delete() {
        let (store, _temp) = open_store();
        store.insert(&item("cheap", 1)).unwrap();
        store.insert(&item("dear", 100)).unwrap();

        let cheap = Selection::new("price < ?", [Value::Integer(50)]);
        let updated = store
            .update(&Payload::new().with_quantity(9), Some(&cheap))
            .unwrap();
        assert_eq!(updated, 1);

        let rows = store
            .query(None, Some(&Selection::new("qty = ?", [Value::Integer(9)])), None)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str(Column::Name), Some("cheap"));

        assert_eq!(store.delete(None).unwrap(), 2);
        assert!(store.query(None, None, None).unwrap().is_empty());
    }

    #[test]
    fn test_constraint_violation_is_storage_failure() {
        let (store, _temp) = open_store();
        let err = store
            .insert(&Payload::new().with_name("no seller"))
            .unwrap_err();
        assert!(matches!(err, ShelfError::StorageFailure(_)));
    }

    #[test]
    fn test_blank_selection_matches_everything() {
        let (store, _temp) = open_store();
        store.insert(&item("Atlas", 3)).unwrap();
        store.insert(&item("Bestiary", 4)).unwrap();

        let blank = Selection::new("", Vec::<Value>::new());
        let spaces = Selection::new("   ", Vec::<Value>::new());

        assert_eq!(store.query(None, Some(&blank), None).unwrap().len(), 2);
        assert_eq!(store.query(None, Some(&spaces), None).unwrap().len(), 2);
        assert_eq!(
            store
                .update(&Payload::new().with_quantity(7), Some(&spaces))
                .unwrap(),
            2
        );
        assert_eq!(store.delete(Some(&blank)).unwrap(), 2);
        assert!(store.query(None, None, None).unwrap().is_empty());
    }

    #[test]
    fn test_blank_selection_ignores_stray_args() {
        let (store, _temp) = open_store();
        store.insert(&item("Atlas", 3)).unwrap();

        let blank = Selection::new("", [Value::Integer(1)]);
        assert_eq!(store.query(None, Some(&blank), None).unwrap().len(), 1);
    }

    #[test]
    fn test_real_and_blob_cells_are_storage_failures() {
        let (store, _temp) = open_store();
        let id = store.insert(&item("Atlas", 3)).unwrap().unwrap();

        // Column affinity keeps a non-integral real as REAL
        store
            .conn()
            .lock()
            .execute("UPDATE inventory SET price = 2.5 WHERE _id = ?1", [id])
            .unwrap();
        let err = store.query(None, None, None).unwrap_err();
        assert!(matches!(err, ShelfError::StorageFailure(_)));

        store
            .conn()
            .lock()
            .execute("UPDATE inventory SET price = 3, seller = x'00ff' WHERE _id = ?1", [id])
            .unwrap();
        let err = store.query(Some(&[Column::Seller]), None, None).unwrap_err();
        assert!(matches!(err, ShelfError::StorageFailure(_)));

        // Untouched columns still read
        let rows = store.query(Some(&[Column::Name, Column::Price]), None, None).unwrap();
        assert_eq!(rows[0].get_i64(Column::Price), Some(3));
    }

    #[test]
    fn test_reopen_reuses_data() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("inventory.db");

        let id = {
            let store = SqliteItemStore::open(StoreConfig::new(path.clone())).unwrap();
            store.insert(&item("kept", 5)).unwrap().unwrap()
        };

        let store = SqliteItemStore::open(StoreConfig::new(path)).unwrap();
        let rows = store.query(None, Some(&Selection::by_id(id)), None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(store.schema_version().unwrap(), 1);
    }
}
