//! Subcommands of the `stmtx` binary.

pub mod batch;
pub mod config;
pub mod convert;

use std::path::{Path, PathBuf};

use tracing::debug;

use stmtx_core::models::config::StmtxConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stmtx")
        .join("config.json")
}

/// Resolve the configuration file path: `--config` wins over the default.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration for a conversion.
///
/// An explicit path must exist; the default path is optional.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<StmtxConfig> {
    if let Some(path) = explicit {
        return Ok(StmtxConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(StmtxConfig::from_file(&path)?)
    } else {
        Ok(StmtxConfig::default())
    }
}
