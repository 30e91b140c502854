//! CLI configuration.
//!
//! Settings come from command-line flags (or their environment
//! variables), then an optional TOML file, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use mobs_db::DbConfig;
use serde::Deserialize;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_REGION: &str = "us-east-1";
const DB_FILE_NAME: &str = "mobs.db";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub region: Option<String>,
    pub namespace: Option<String>,
    pub database: Option<String>,
}

impl FileConfig {
    /// Load from `path` if given (it must exist), otherwise from the
    /// per-user default location if a file is present there.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }
}

/// `<config_dir>/mobs/config.toml`, e.g. `~/.config/mobs/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mobs").join("config.toml"))
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    /// Region new tenants are placed in.
    pub region: String,
    pub db: DbConfig,
}

impl Settings {
    pub fn resolve(data_dir: Option<PathBuf>, region: Option<String>, file: FileConfig) -> Self {
        let data_dir = data_dir
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let region = region
            .or(file.region)
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let defaults = DbConfig::default();
        let db = DbConfig {
            path: data_dir.join(DB_FILE_NAME),
            namespace: file.namespace.unwrap_or(defaults.namespace),
            database: file.database.unwrap_or(defaults.database),
        };

        Self {
            data_dir,
            region,
            db,
        }
    }
}
