//! `mobs tenant ...` command handlers.

use std::io::Write;

use anyhow::Context;
use mobs_core::repository::TenantStore;
use mobs_service::TenantService;

use crate::TenantCommands;
use crate::output::OutputFormat;

pub async fn handle<S: TenantStore>(
    action: TenantCommands,
    service: &TenantService<S>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match action {
        TenantCommands::Create { name } => {
            let tenant = service
                .create_tenant(&name)
                .await
                .context("Failed to create tenant")?;
            format.created(out, &tenant)?;
        }
        TenantCommands::List => {
            let tenants = service
                .list_tenants()
                .await
                .context("Failed to list tenants")?;
            format.list(out, &tenants)?;
        }
        TenantCommands::Get { id } => {
            let tenant = service
                .get_tenant(&id)
                .await
                .context("Failed to get tenant")?;
            format.detail(out, &tenant)?;
        }
        TenantCommands::Delete { id } => {
            service
                .delete_tenant(&id)
                .await
                .context("Failed to delete tenant")?;
            writeln!(out, "Tenant deleted: {id}")?;
        }
    }
    Ok(())
}
