//! SurrealDB implementation of [`TenantStore`].

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use mobs_core::error::MobsResult;
use mobs_core::models::metadata::{TenantMetadata, TenantRecord};
use mobs_core::models::tenant::{Tenant, TenantStatus};
use mobs_core::repository::TenantStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

use crate::error::DbError;

/// DB-side row struct for queries where the tenant id is already known.
#[derive(Debug, SurrealValue)]
struct TenantRow {
    name: String,
    created_at: DateTime<Utc>,
    status: String,
    bucket_name: String,
    region: String,
    last_updated_at: DateTime<Utc>,
    version: i64,
    provisioning_metadata: serde_json::Value,
}

impl TenantRow {
    /// Rejects rows that break any field rule, e.g. ones written by
    /// another client or under an older schema.
    fn into_metadata(self, tenant_id: String) -> Result<TenantMetadata, DbError> {
        let status: TenantStatus = self
            .status
            .parse()
            .map_err(|e| corrupt(&tenant_id, e))?;
        let provisioning_metadata: HashMap<String, String> =
            serde_json::from_value(self.provisioning_metadata)
                .map_err(|e| corrupt(&tenant_id, format!("provisioning_metadata: {e}")))?;

        let record = TenantRecord {
            tenant_id: tenant_id.clone(),
            name: self.name,
            created_at: self.created_at,
            status,
            bucket_name: self.bucket_name,
            region: self.region,
            last_updated_at: self.last_updated_at,
            version: self.version,
            provisioning_metadata,
        };
        TenantMetadata::restore(record).map_err(|e| corrupt(&tenant_id, e))
    }
}

fn corrupt(tenant_id: &str, err: impl fmt::Display) -> DbError {
    DbError::Decode(format!("tenant {tenant_id}: {err}"))
}

/// DB-side row struct that includes the record key via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TenantRowWithId {
    record_id: String,
    name: String,
    created_at: DateTime<Utc>,
    status: String,
    bucket_name: String,
    region: String,
    last_updated_at: DateTime<Utc>,
    version: i64,
    provisioning_metadata: serde_json::Value,
}

impl TenantRowWithId {
    fn try_into_metadata(self) -> Result<TenantMetadata, DbError> {
        let row = TenantRow {
            name: self.name,
            created_at: self.created_at,
            status: self.status,
            bucket_name: self.bucket_name,
            region: self.region,
            last_updated_at: self.last_updated_at,
            version: self.version,
            provisioning_metadata: self.provisioning_metadata,
        };
        row.into_metadata(self.record_id)
    }
}

/// SurrealDB-backed tenant store.
///
/// Every tenant created through this store is placed in the region the
/// store was constructed with.
#[derive(Clone)]
pub struct SurrealTenantStore<C: Connection> {
    db: Surreal<C>,
    region: String,
}

impl<C: Connection> SurrealTenantStore<C> {
    pub fn new(db: Surreal<C>, region: impl Into<String>) -> Self {
        Self {
            db,
            region: region.into(),
        }
    }
}

impl<C: Connection> TenantStore for SurrealTenantStore<C> {
    async fn create(&self, tenant: Tenant) -> MobsResult<TenantMetadata> {
        let metadata = TenantMetadata::derive_from(Some(&tenant), &self.region)?;
        let tenant_id = metadata.tenant_id().to_string();
        let provisioning = serde_json::to_value(metadata.provisioning_entries())
            .map_err(|e| DbError::Encode(format!("tenant {tenant_id}: {e}")))?;

        let result = self
            .db
            .query(
                "CREATE type::record('tenant', $id) SET \
                 name = $name, created_at = $created_at, status = $status, \
                 bucket_name = $bucket_name, region = $region, \
                 last_updated_at = $last_updated_at, version = $version, \
                 provisioning_metadata = $provisioning_metadata",
            )
            .bind(("id", tenant_id.clone()))
            .bind(("name", metadata.name().to_string()))
            .bind(("created_at", metadata.created_at()))
            .bind(("status", metadata.status().as_str()))
            .bind(("bucket_name", metadata.bucket_name().to_string()))
            .bind(("region", metadata.region().to_string()))
            .bind(("last_updated_at", metadata.last_updated_at()))
            .bind(("version", metadata.version()))
            .bind(("provisioning_metadata", provisioning))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: tenant_id.clone(),
        })?;

        let stored = row.into_metadata(tenant_id)?;
        info!(
            tenant_id = stored.tenant_id(),
            bucket = stored.bucket_name(),
            region = stored.region(),
            "Tenant stored"
        );
        Ok(stored)
    }

    async fn get(&self, tenant_id: &str) -> MobsResult<TenantMetadata> {
        let id_str = tenant_id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('tenant', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str.clone(),
        })?;

        Ok(row.into_metadata(id_str)?)
    }

    async fn list(&self) -> MobsResult<Vec<TenantMetadata>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM tenant \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;
        debug!(count = rows.len(), "Listed tenants");

        let tenants = rows
            .into_iter()
            .map(TenantRowWithId::try_into_metadata)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(tenants)
    }

    async fn delete(&self, tenant_id: &str) -> MobsResult<()> {
        let id_str = tenant_id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('tenant', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "tenant".into(),
                id: id_str,
            }
            .into());
        }

        info!(tenant_id = %id_str, "Tenant deleted");
        Ok(())
    }
}
