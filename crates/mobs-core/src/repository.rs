//! Persistence port.
//!
//! Operations are async so that adapters can sit on top of any storage
//! engine. Implementations must report a missing tenant as a
//! `RESOURCE_NOT_FOUND` [`DomainError`](crate::error::DomainError).

use crate::error::MobsResult;
use crate::models::metadata::TenantMetadata;
use crate::models::tenant::Tenant;

pub trait TenantStore: Send + Sync {
    /// Persists a freshly created tenant and returns its metadata.
    fn create(&self, tenant: Tenant) -> impl Future<Output = MobsResult<TenantMetadata>> + Send;

    fn get(&self, tenant_id: &str) -> impl Future<Output = MobsResult<TenantMetadata>> + Send;

    /// All tenants, oldest first.
    fn list(&self) -> impl Future<Output = MobsResult<Vec<TenantMetadata>>> + Send;

    fn delete(&self, tenant_id: &str) -> impl Future<Output = MobsResult<()>> + Send;
}
