//! Config path resolution helpers.

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "decree.toml";

/// `<config_dir>/decree/decree.toml`
pub fn config_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join("decree").join(CONFIG_FILE_NAME)
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(config_path_in(&config_dir))
}
