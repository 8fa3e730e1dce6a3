//! Subcommand implementations.

pub mod config;
pub mod extract;
pub mod output;
pub mod scrape;

use std::path::Path;

use pledge_core::PledgeConfig;

/// Load configuration from `--config`, else from the default location when
/// a file exists there, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PledgeConfig> {
    if let Some(path) = config_path {
        return Ok(PledgeConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(PledgeConfig::from_file(&default_path)?)
    } else {
        Ok(PledgeConfig::default())
    }
}
