use rusqlite::{Connection, OptionalExtension};
use shelf_core::error::{Result, ShelfError};

/// Name of the inventory table
pub const TABLE_NAME: &str = "inventory";

const CREATE_INVENTORY_TABLE: &str = "CREATE TABLE IF NOT EXISTS inventory (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category INTEGER NOT NULL,
    price INTEGER NOT NULL,
    qty INTEGER NOT NULL DEFAULT 0,
    seller TEXT NOT NULL,
    in_stock INTEGER NOT NULL DEFAULT 1
)";

/// Create the inventory and metadata tables if they do not exist yet
///
/// Returns `true` when the inventory table was created by this call.
pub fn init(conn: &Connection, schema_version: u32) -> Result<bool> {
    let existed: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [TABLE_NAME],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;

    conn.execute(CREATE_INVENTORY_TABLE, [])
        .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS store_meta (
            id INTEGER PRIMARY KEY CHECK (id = 0),
            schema_version INTEGER NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )
    .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;

    conn.execute(
        "INSERT OR IGNORE INTO store_meta (id, schema_version) VALUES (0, ?1)",
        [schema_version as i64],
    )
    .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;

    Ok(existed.is_none())
}

/// Read the recorded schema version
pub fn current_version(conn: &Connection) -> Result<u32> {
    let stored: i64 = conn
        .query_row(
            "SELECT schema_version FROM store_meta WHERE id = 0",
            [],
            |row| row.get(0),
        )
        .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;

    u32::try_from(stored).map_err(|_| {
        ShelfError::InvalidState(format!("Recorded schema version {} is out of range", stored))
    })
}

/// Record a new schema version
///
/// No upgrade steps exist: the inventory table is left exactly as version 1
/// created it, and only the recorded number moves. Downgrades are refused.
pub fn migrate(conn: &Connection, target_version: u32) -> Result<()> {
    let current_version = current_version(conn)?;

    if target_version < current_version {
        return Err(ShelfError::InvalidState(format!(
            "Cannot downgrade schema version from {} to {}",
            current_version, target_version
        )));
    }

    if current_version == target_version {
        return Ok(());
    }

    tracing::warn!(
        "No upgrade steps from schema v{} to v{}; recording version only",
        current_version,
        target_version
    );

    conn.execute(
        "UPDATE store_meta SET schema_version = ?1, updated_at = datetime('now') WHERE id = 0",
        [target_version as i64],
    )
    .map_err(|e| ShelfError::StorageFailure(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(init(&conn, 1).unwrap());
        assert!(!init(&conn, 1).unwrap());
        assert_eq!(current_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_column_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn, 1).unwrap();
        conn.execute(
            "INSERT INTO inventory (name, category, price, seller) VALUES ('Pen', 0, 10, 'Acme')",
            [],
        )
        .unwrap();

        let (qty, in_stock): (i64, i64) = conn
            .query_row("SELECT qty, in_stock FROM inventory", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(qty, 0);
        assert_eq!(in_stock, 1);
    }

    #[test]
    fn test_required_columns() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn, 1).unwrap();
        let result = conn.execute(
            "INSERT INTO inventory (category, price, seller) VALUES (0, 10, 'Acme')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_version_is_invalid_state() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn, 1).unwrap();

        for stored in [-1i64, i64::from(u32::MAX) + 1] {
            conn.execute(
                "UPDATE store_meta SET schema_version = ?1 WHERE id = 0",
                [stored],
            )
            .unwrap();
            let err = current_version(&conn).unwrap_err();
            assert!(matches!(err, ShelfError::InvalidState(_)));
        }
    }

    #[test]
    fn test_migrate_records_version_only() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn, 1).unwrap();

        migrate(&conn, 2).unwrap();
        assert_eq!(current_version(&conn).unwrap(), 2);

        let err = migrate(&conn, 1).unwrap_err();
        assert!(matches!(err, ShelfError::InvalidState(_)));
    }
}
