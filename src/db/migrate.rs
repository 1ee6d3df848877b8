use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `store_visits` table exists.
fn store_visits_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='store_visits'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `store_visits` table.
fn create_store_visits_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS store_visits (
            id                       INTEGER PRIMARY KEY AUTOINCREMENT,
            visit_date               TEXT NOT NULL,
            visit_time               TEXT NOT NULL,
            sr_name                  TEXT NOT NULL,
            store_name               TEXT NOT NULL,
            visit_type               TEXT NOT NULL CHECK(visit_type IN ('NEW VISIT','RE VISIT')),
            store_category           TEXT NOT NULL CHECK(store_category IN ('MT','HoReCa')),
            phone_number             TEXT NOT NULL,
            lead_type                TEXT NOT NULL CHECK(lead_type IN ('HOT','WARM','COLD','DEAD')),
            follow_up_date           TEXT,
            products                 TEXT NOT NULL,
            order_details            TEXT,
            latitude                 REAL,
            longitude                REAL,
            maps_url                 TEXT,
            location_recorded_answer TEXT NOT NULL CHECK(location_recorded_answer IN ('YES','NO')),
            image_data               TEXT NOT NULL,
            created_at               TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Was the given tracked migration already recorded in `log`?
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn migrate_add_visit_indexes(conn: &Connection) -> Result<(), Error> {
    let version = "20260101_0001_visit_indexes";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_visits_date_time ON store_visits(visit_date, visit_time);
        CREATE INDEX IF NOT EXISTS idx_visits_sr_name  ON store_visits(sr_name);
        "#,
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to create store_visits indexes: {}", e)),
        )
    })?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added date and salesperson indexes')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → indexed store_visits by date and salesperson",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create store_visits if missing
    if !store_visits_table_exists(conn)? {
        create_store_visits_table(conn)?;
        success("Created store_visits table.");
    }

    // 3) Tracked migrations
    migrate_add_visit_indexes(conn)?;

    Ok(())
}
