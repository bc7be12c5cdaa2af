//! Database schema migrations.

use rusqlite::Connection;
use tracing::info;

use kiosk_core::error::KioskError;

/// Run all pending database migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), KioskError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| KioskError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version = current_version(conn)?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: turn_log");
    }

    if current_version < 2 {
        apply_v2(conn)?;
        info!("Applied migration v2: turn_log_cleared");
    }

    Ok(())
}

/// Highest applied migration, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> Result<i64, KioskError> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(|e| KioskError::Storage(format!("Failed to query migration version: {}", e)))
}

/// Version 1: the turn log.
fn apply_v1(conn: &Connection) -> Result<(), KioskError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS turns (
            seq         INTEGER PRIMARY KEY AUTOINCREMENT,
            id          TEXT NOT NULL UNIQUE,
            user_id     INTEGER NOT NULL,
            user_text   TEXT NOT NULL,
            reply_text  TEXT NOT NULL,
            intent      TEXT NOT NULL,
            product     TEXT,
            created_at  INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_turns_user
            ON turns (user_id, seq DESC);

        INSERT INTO schema_migrations (version, name) VALUES (1, 'turn_log');
        ",
    )
    .map_err(|e| KioskError::Storage(format!("Migration v1 failed: {}", e)))
}

/// Version 2: marks turns that wiped the conversation.
fn apply_v2(conn: &Connection) -> Result<(), KioskError> {
    conn.execute_batch(
        "
        ALTER TABLE turns ADD COLUMN cleared INTEGER NOT NULL DEFAULT 0;

        INSERT INTO schema_migrations (version, name) VALUES (2, 'turn_log_cleared');
        ",
    )
    .map_err(|e| KioskError::Storage(format!("Migration v2 failed: {}", e)))
}
