//! Tenant service — create, read, list and delete orchestration.

use mobs_core::error::{MobsResult, ValidationErrors};
use mobs_core::models::metadata::TenantMetadata;
use mobs_core::models::tenant::Tenant;
use mobs_core::repository::TenantStore;
use mobs_core::validation::validate_uuid;
use tracing::{debug, info, warn};

/// Tenant service.
///
/// Generic over the store implementation so that the service layer
/// has no dependency on the database crate.
pub struct TenantService<S: TenantStore> {
    store: S,
}

impl<S: TenantStore> TenantService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates `name`, builds a new tenant and persists it.
    pub async fn create_tenant(&self, name: &str) -> MobsResult<TenantMetadata> {
        let tenant = Tenant::new(name).inspect_err(|errors| {
            warn!(name, %errors, "Rejected tenant creation");
        })?;
        debug!(%tenant, "Creating tenant");

        let metadata = self.store.create(tenant).await?;
        info!(%metadata, "Tenant created");
        Ok(metadata)
    }

    pub async fn get_tenant(&self, tenant_id: &str) -> MobsResult<TenantMetadata> {
        check_tenant_id(tenant_id)?;
        self.store.get(tenant_id).await
    }

    pub async fn list_tenants(&self) -> MobsResult<Vec<TenantMetadata>> {
        let tenants = self.store.list().await?;
        debug!(count = tenants.len(), "Listed tenants");
        Ok(tenants)
    }

    pub async fn delete_tenant(&self, tenant_id: &str) -> MobsResult<()> {
        check_tenant_id(tenant_id)?;
        self.store.delete(tenant_id).await?;
        info!(tenant_id, "Tenant deleted");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn check_tenant_id(tenant_id: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    validate_uuid("tenant_id", tenant_id, &mut errors);
    errors.into_result()
}
