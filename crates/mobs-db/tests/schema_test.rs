//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    mobs_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("tenant"), "missing tenant table");
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    mobs_db::run_migrations(&db).await.unwrap();
    mobs_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one migration record");
}

#[tokio::test]
async fn unknown_status_is_rejected_by_schema() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    mobs_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE tenant:`0d9b8f7e-1c2a-4b3c-8d4e-5f6a7b8c9d0e` SET \
             name = 'acme', created_at = time::now(), status = 'DELETED', \
             bucket_name = 'apt-0d9b8f7e-acme', region = 'us-west-2', \
             last_updated_at = time::now(), version = 1, \
             provisioning_metadata = {}",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "unknown status should be rejected");
}

#[tokio::test]
async fn unique_index_prevents_duplicate_bucket_names() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    mobs_db::run_migrations(&db).await.unwrap();

    let create = |id: &'static str| {
        format!(
            "CREATE tenant:`{id}` SET \
             name = 'acme', created_at = time::now(), status = 'ACTIVE', \
             bucket_name = 'apt-shared-acme', region = 'us-west-2', \
             last_updated_at = time::now(), version = 1, \
             provisioning_metadata = {{}}"
        )
    };

    db.query(create("11111111-1111-4111-8111-111111111111"))
        .await
        .unwrap()
        .check()
        .unwrap();

    let result = db
        .query(create("22222222-2222-4222-8222-222222222222"))
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "duplicate bucket name should be rejected");
}
