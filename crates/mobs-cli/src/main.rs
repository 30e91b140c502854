//! MOBS CLI
//!
//! Command-line interface for the Multi-tenant Object Storage control
//! plane.
//!
//! # Usage
//!
//! ```bash
//! mobs tenant create --name acme-corp
//! mobs tenant list --format json
//! mobs tenant get 0d9b8f7e-1c2a-4b3c-8d4e-5f6a7b8c9d0e
//! mobs tenant delete 0d9b8f7e-1c2a-4b3c-8d4e-5f6a7b8c9d0e
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mobs_db::DbManager;
use mobs_db::repository::SurrealTenantStore;
use mobs_service::TenantService;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "mobs")]
#[command(version)]
#[command(about = "Multi-tenant Object Storage CLI", long_about = None)]
struct Cli {
    /// Directory holding the embedded database
    #[arg(long, global = true, env = "MOBS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Region new tenants are placed in
    #[arg(long, global = true, env = "MOBS_REGION")]
    region: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true, env = "MOBS_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "MOBS_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tenants
    Tenant {
        #[command(subcommand)]
        action: TenantCommands,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum TenantCommands {
    /// Create a new tenant
    Create {
        /// Tenant name
        #[arg(long)]
        name: String,
    },
    /// List all tenants
    List,
    /// Get tenant details
    Get { id: String },
    /// Delete a tenant
    Delete { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let file = config::FileConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let settings = config::Settings::resolve(cli.data_dir, cli.region, file);
    tracing::debug!(
        data_dir = %settings.data_dir.display(),
        region = %settings.region,
        "Resolved settings"
    );

    std::fs::create_dir_all(&settings.data_dir).with_context(|| {
        format!(
            "Failed to create data directory {}",
            settings.data_dir.display()
        )
    })?;

    let manager = DbManager::open(&settings.db)
        .await
        .context("Failed to initialize storage")?;
    let store = SurrealTenantStore::new(manager.client().clone(), settings.region);
    let service = TenantService::new(store);

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Tenant { action } => {
            commands::handle(action, &service, cli.format, &mut stdout).await
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tenant_create() {
        let cli = Cli::try_parse_from(["mobs", "tenant", "create", "--name", "acme"]).unwrap();
        match cli.command {
            Commands::Tenant {
                action: TenantCommands::Create { name },
            } => assert_eq!(name, "acme"),
            _ => panic!("expected tenant create"),
        }
    }

    #[test]
    fn create_requires_name() {
        let err = Cli::try_parse_from(["mobs", "tenant", "create"]).err().unwrap();
        assert!(err.use_stderr());
    }

    #[test]
    fn get_takes_positional_id_and_global_flags() {
        let cli = Cli::try_parse_from([
            "mobs", "tenant", "get", "abc", "--format", "json", "--region", "us-west-2",
        ])
        .unwrap();
        assert!(matches!(cli.format, output::OutputFormat::Json));
        assert_eq!(cli.region.as_deref(), Some("us-west-2"));
        assert!(matches!(
            cli.command,
            Commands::Tenant {
                action: TenantCommands::Get { ref id }
            } if id == "abc"
        ));
    }
}
