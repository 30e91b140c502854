//! Embedded SurrealDB connection management.

use std::path::PathBuf;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, SurrealKv};
use tracing::info;

use crate::error::DbError;
use crate::schema::run_migrations;

/// Configuration for the embedded database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// On-disk location of the SurrealKV store.
    pub path: PathBuf,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/mobs.db"),
            namespace: "mobs".into(),
            database: "main".into(),
        }
    }
}

/// Owns a migrated connection to an embedded SurrealDB instance.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Db>,
}

impl DbManager {
    /// Open (or create) the on-disk store described by `config`.
    ///
    /// Selects the configured namespace and database and applies any
    /// pending migrations before returning.
    pub async fn open(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            path = %config.path.display(),
            namespace = %config.namespace,
            database = %config.database,
            "Opening embedded SurrealDB"
        );

        let db = Surreal::new::<SurrealKv>(config.path.to_string_lossy().into_owned()).await?;
        Self::prepare(db, &config.namespace, &config.database).await
    }

    /// Volatile in-memory store, used by tests and dry runs.
    pub async fn in_memory(namespace: &str, database: &str) -> Result<Self, DbError> {
        let db = Surreal::new::<Mem>(()).await?;
        Self::prepare(db, namespace, database).await
    }

    async fn prepare(db: Surreal<Db>, namespace: &str, database: &str) -> Result<Self, DbError> {
        db.use_ns(namespace).use_db(database).await?;
        run_migrations(&db).await?;

        info!("Embedded SurrealDB ready");

        Ok(Self { db })
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Db> {
        &self.db
    }
}
