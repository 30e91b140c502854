//! Integration tests for the SurrealDB tenant store using in-memory
//! and on-disk SurrealDB.

use mobs_core::error::{ErrorCode, MobsError};
use mobs_core::models::tenant::{Tenant, TenantStatus};
use mobs_core::repository::TenantStore;
use mobs_db::repository::SurrealTenantStore;
use mobs_db::{DbConfig, DbManager};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    mobs_db::run_migrations(&db).await.unwrap();
    db
}

async fn store() -> SurrealTenantStore<Db> {
    SurrealTenantStore::new(setup().await, "us-west-2")
}

#[tokio::test]
async fn create_and_get_tenant() {
    let store = store().await;
    let tenant = Tenant::new("acme-corp").unwrap();

    let created = store.create(tenant.clone()).await.unwrap();

    assert_eq!(created.tenant_id(), tenant.tenant_id());
    assert_eq!(created.name(), "acme-corp");
    assert_eq!(created.status(), TenantStatus::Provisioning);
    assert_eq!(created.region(), "us-west-2");
    assert_eq!(created.version(), 1);
    assert!(created.bucket_name().starts_with("apt-"));
    assert!(created.bucket_name().contains(&tenant.tenant_id()[..8]));
    assert!(created.bucket_name().ends_with("-acme-corp"));
    assert!(created.provisioning_entries().is_empty());

    let fetched = store.get(tenant.tenant_id()).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.to_tenant(), tenant);
}

#[tokio::test]
async fn get_unknown_tenant_is_not_found() {
    let store = store().await;

    let err = store
        .get("9b2f0c1e-7a4d-4e8b-9c3f-0a1b2c3d4e5f")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.code(), Some(ErrorCode::ResourceNotFound));
}

#[tokio::test]
async fn list_returns_tenants_oldest_first() {
    let store = store().await;

    let mut ids = Vec::new();
    for i in 0..3 {
        let tenant = Tenant::new(format!("tenant-{i}")).unwrap();
        ids.push(tenant.tenant_id().to_string());
        store.create(tenant).await.unwrap();
    }

    let listed = store.list().await.unwrap();
    let listed_ids: Vec<String> = listed.iter().map(|t| t.tenant_id().to_string()).collect();
    assert_eq!(listed_ids, ids);
    assert!(listed.iter().all(|t| t.region() == "us-west-2"));
}

#[tokio::test]
async fn list_empty_store() {
    let store = store().await;
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_tenant() {
    let store = store().await;
    let tenant = Tenant::new("to-delete").unwrap();
    store.create(tenant.clone()).await.unwrap();

    store.delete(tenant.tenant_id()).await.unwrap();

    let result = store.get(tenant.tenant_id()).await;
    assert!(
        result.is_err_and(|e| e.is_not_found()),
        "should not find deleted tenant"
    );
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_unknown_tenant_is_not_found() {
    let store = store().await;
    let err = store
        .delete("3f1e2d3c-4b5a-4697-8877-665544332211")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn invalid_region_rejects_create() {
    let store = SurrealTenantStore::new(setup().await, "invalid-region");
    let tenant = Tenant::new("nowhere").unwrap();

    let err = store.create(tenant).await.unwrap_err();

    assert!(matches!(err, MobsError::Validation(_)));
    assert!(
        err.to_string()
            .contains("region: must be a valid AWS region code")
    );
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn stored_rows_breaking_field_rules_are_rejected() {
    let db = setup().await;
    let store = SurrealTenantStore::new(db.clone(), "us-west-2");
    let id = "5d0c9a8b-7e6f-4a5b-8c3d-2e1f0a9b8c7d";

    db.query(
        "CREATE type::record('tenant', $id) SET \
         name = 'x', created_at = time::now() + 1d, status = 'ACTIVE', \
         bucket_name = 'NOT..VALID', region = 'mars', \
         last_updated_at = time::now(), version = 1",
    )
    .bind(("id", id))
    .await
    .unwrap()
    .check()
    .unwrap();

    let err = store.get(id).await.unwrap_err();
    let msg = err.to_string();
    assert!(matches!(err, MobsError::Database(_)), "{msg}");
    assert!(msg.contains("Corrupt record"), "{msg}");
    assert!(msg.contains("region: must be a valid AWS region code"), "{msg}");
    assert!(msg.contains("bucket_name: cannot contain consecutive periods"), "{msg}");
    assert!(msg.contains("created_at: cannot be in the future"), "{msg}");

    assert!(store.list().await.is_err());
    store.delete(id).await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_tenant_id_is_rejected() {
    let store = store().await;
    let tenant = Tenant::new("twice").unwrap();

    store.create(tenant.clone()).await.unwrap();
    let err = store.create(tenant).await.unwrap_err();

    assert!(matches!(err, MobsError::Database(_)));
}

#[tokio::test]
async fn db_manager_opens_on_disk_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig {
        path: dir.path().join("mobs.db"),
        ..Default::default()
    };

    let manager = DbManager::open(&config).await.unwrap();
    let store = SurrealTenantStore::new(manager.client().clone(), "eu-central-1");
    let tenant = Tenant::new("durable").unwrap();
    store.create(tenant.clone()).await.unwrap();

    let fetched = store.get(tenant.tenant_id()).await.unwrap();
    assert_eq!(fetched.name(), "durable");
    assert_eq!(fetched.region(), "eu-central-1");
    assert!(config.path.exists());
}

#[tokio::test]
async fn in_memory_manager_is_migrated() {
    let manager = DbManager::in_memory("test", "test").await.unwrap();
    let store = SurrealTenantStore::new(manager.client().clone(), "ap-south-1");

    let created = store.create(Tenant::new("ephemeral").unwrap()).await.unwrap();
    assert_eq!(store.list().await.unwrap(), vec![created]);
}
