//! Table definitions for the `resources` table.
//!
//! Statements are idempotent and applied in order at startup. Enum columns
//! hold the upper-case labels and are guarded by CHECK constraints.

use sqlx::SqlitePool;
use tracing::info;

use super::StoreResult;

const SCHEMA_V1: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS resources (
        id                 TEXT PRIMARY KEY NOT NULL,
        name               TEXT NOT NULL,
        type               TEXT NOT NULL CHECK (type IN (
                               'ROOM', 'LAB', 'HALL', 'EQUIPMENT',
                               'CAFETERIA', 'LIBRARY', 'PARKING', 'SPORTS')),
        description        TEXT,
        status             TEXT NOT NULL DEFAULT 'AVAILABLE' CHECK (status IN (
                               'AVAILABLE', 'BOOKED', 'MAINTENANCE', 'UNAVAILABLE')),
        location           TEXT,
        capacity           INTEGER CHECK (capacity IS NULL OR capacity >= 0),
        owner_id           TEXT NOT NULL,
        responsible_person TEXT,
        created_at         TEXT NOT NULL,
        updated_at         TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_resources_type ON resources (type)",
    "CREATE INDEX IF NOT EXISTS idx_resources_status ON resources (status)",
    "CREATE INDEX IF NOT EXISTS idx_resources_type_status ON resources (type, status)",
    "CREATE INDEX IF NOT EXISTS idx_resources_owner ON resources (owner_id)",
];

/// Apply the schema. Safe to call on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    for statement in SCHEMA_V1 {
        sqlx::query(*statement).execute(pool).await?;
    }
    info!(statements = SCHEMA_V1.len(), "Resource schema applied");
    Ok(())
}
