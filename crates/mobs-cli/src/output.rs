//! Output formatting

use std::io::Write;

use clap::ValueEnum;
use mobs_core::models::metadata::TenantMetadata;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn created(&self, out: &mut impl Write, tenant: &TenantMetadata) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => json(out, tenant),
            OutputFormat::Table => {
                writeln!(out, "Tenant created: ID={}, Name={}", tenant.tenant_id(), tenant.name())?;
                Ok(())
            }
        }
    }

    pub fn list(&self, out: &mut impl Write, tenants: &[TenantMetadata]) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => json(out, tenants),
            OutputFormat::Table => {
                if tenants.is_empty() {
                    writeln!(out, "No tenants found.")?;
                }
                for t in tenants {
                    writeln!(out, "ID={}, Name={}, Status={}", t.tenant_id(), t.name(), t.status())?;
                }
                Ok(())
            }
        }
    }

    pub fn detail(&self, out: &mut impl Write, t: &TenantMetadata) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => json(out, t),
            OutputFormat::Table => {
                writeln!(
                    out,
                    "ID={}, Name={}, Status={}, Bucket={}, Region={}, Version={}",
                    t.tenant_id(),
                    t.name(),
                    t.status(),
                    t.bucket_name(),
                    t.region(),
                    t.version()
                )?;
                Ok(())
            }
        }
    }
}

fn json<T: Serialize + ?Sized>(out: &mut impl Write, data: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, data)?;
    writeln!(out)?;
    Ok(())
}
