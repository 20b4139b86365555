//! Embedded database migrations
//!
//! SQL migrations are compiled into the binary, so no migration files are
//! needed at runtime.

use rusqlite::Connection;

use crate::db::DbPool;

/// All migrations in order, each as (filename, sql_content)
pub const MIGRATIONS: &[(&str, &str)] = &[(
    "001_create_exercises.sql",
    include_str!("../migrations/001_create_exercises.sql"),
)];

const CREATE_TRACKING_TABLE: &str = "CREATE TABLE IF NOT EXISTS _migrations (
    name TEXT PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

fn is_applied(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM _migrations WHERE name = ?)",
        [name],
        |row| row.get(0),
    )
}

/// Applies one migration and its tracking row atomically.
fn apply(conn: &mut Connection, name: &str, sql: &str) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(sql)?;
    tx.execute("INSERT INTO _migrations (name) VALUES (?)", [name])?;
    tx.commit()
}

/// Run every migration not yet recorded in `_migrations`. Returns how many
/// were applied.
pub fn run_migrations(pool: &DbPool) -> anyhow::Result<usize> {
    tracing::info!("Running migrations...");

    let mut conn = pool.get()?;
    conn.execute_batch(CREATE_TRACKING_TABLE)?;

    let mut applied = 0;
    for (name, sql) in MIGRATIONS {
        if is_applied(&conn, name)? {
            tracing::debug!("Skipping already applied migration: {}", name);
            continue;
        }

        tracing::info!("Running migration: {}", name);
        apply(&mut conn, name, sql)?;
        applied += 1;
    }

    tracing::info!("Migrations completed ({} applied)", applied);
    Ok(applied)
}

/// Run all migrations without tracking, for fresh in-memory test databases.
pub fn run_migrations_for_tests(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    let conn = pool.get()?;
    for (_name, sql) in MIGRATIONS {
        conn.execute_batch(sql)?;
    }
    Ok(())
}
