//! Schema definitions and migration runner for SurrealDB.
//!
//! Tables are SCHEMAFULL. Tenant ids are the record keys, stored as
//! strings. Status is stored by its wire name with an ASSERT constraint.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "tenant_metadata",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — tenant metadata
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
DEFINE TABLE tenant SCHEMAFULL;
DEFINE FIELD name ON TABLE tenant TYPE string;
DEFINE FIELD created_at ON TABLE tenant TYPE datetime;
DEFINE FIELD status ON TABLE tenant TYPE string \
    ASSERT $value IN ['PROVISIONING', 'ACTIVE', 'SUSPENDED'];
DEFINE FIELD bucket_name ON TABLE tenant TYPE string;
DEFINE FIELD region ON TABLE tenant TYPE string;
DEFINE FIELD last_updated_at ON TABLE tenant TYPE datetime;
DEFINE FIELD version ON TABLE tenant TYPE int ASSERT $value >= 0;
DEFINE FIELD provisioning_metadata ON TABLE tenant TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE INDEX idx_tenant_bucket_name ON TABLE tenant \
    COLUMNS bucket_name UNIQUE;
DEFINE INDEX idx_tenant_created_at ON TABLE tenant COLUMNS created_at;
";

/// Apply every pending migration.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the highest recorded one.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let applied = applied_version(db).await?;
    let pending = MIGRATIONS.iter().filter(|m| m.version > applied);
    for migration in pending {
        apply(db, migration).await?;
    }

    Ok(())
}

/// Highest recorded migration version, 0 on a fresh database.
async fn applied_version<C: Connection>(db: &Surreal<C>) -> Result<u32, DbError> {
    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    Ok(records.first().map_or(0, |m| m.version))
}

/// Runs the DDL and the tracking insert for one migration.
async fn apply<C: Connection>(db: &Surreal<C>, migration: &Migration) -> Result<(), DbError> {
    info!(
        version = migration.version,
        name = migration.name,
        "Applying migration"
    );

    db.query(migration.sql).await?.check().map_err(|e| {
        DbError::Migration(format!(
            "v{} '{}': {e}",
            migration.version, migration.name
        ))
    })?;

    db.query("CREATE _migration SET version = $version, name = $name")
        .bind(("version", migration.version))
        .bind(("name", migration.name))
        .await?
        .check()
        .map_err(|e| {
            DbError::Migration(format!("recording v{}: {e}", migration.version))
        })?;

    info!(version = migration.version, "Migration applied");
    Ok(())
}
