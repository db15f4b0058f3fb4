use eyre::{Context, OptionExt};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::NAME;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_PAGE: &str = "agreements.html";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub bind:         Option<String>,
    /// Directory holding the page bodies (`agreements.md`, `users.html`, ...).
    pub content_dir:  Option<PathBuf>,
    /// Where `/` redirects to.
    pub default_page: Option<String>,
}

impl Config {
    pub fn bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn default_page(&self) -> &str {
        self.default_page.as_deref().unwrap_or(DEFAULT_PAGE)
    }

    pub fn content_dir(&self) -> eyre::Result<PathBuf> {
        if let Some(dir) = self.content_dir.clone() {
            return Ok(dir);
        }
        let data = dirs::data_dir().ok_or_eyre("System should have a data directory")?;
        Ok(data.join(NAME).join("pages"))
    }
}

/// `$WAREHOUSE_NAV_CONFIG`, or `config.toml` in the user's config directory.
pub fn config_path() -> eyre::Result<PathBuf> {
    if let Some(path) = std::env::var_os("WAREHOUSE_NAV_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    let config = dirs::config_dir().ok_or_eyre("System should have a config directory")?;
    Ok(config.join(NAME).join("config.toml"))
}

/// Load the configuration. A missing file means defaults.
pub fn load_config(path: impl AsRef<Path>) -> eyre::Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!("No config at {path:?}, using defaults");
        return Ok(Config::default());
    }
    let contents =
        std::fs::read_to_string(path).context(format!("Failed to read {path:?} to string"))?;
    let config = toml::from_str(&contents).context(format!("Failed to parse {path:?}"))?;
    Ok(config)
}
