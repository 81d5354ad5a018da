use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use toml::Table;

const CONFIG_DIR_NAME: &str = ".reqs";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Path to the configuration directory (`~/.reqs`).
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME))
}

/// Path to the configuration file (`~/.reqs/config.toml`).
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Load the user configuration. Missing or unreadable config yields an
/// empty table rather than an error.
pub fn load() -> Table {
    let Some(path) = config_file() else {
        return Table::new();
    };
    let Ok(contents) = fs::read_to_string(&path) else {
        return Table::new();
    };
    contents.parse::<Table>().unwrap_or_default()
}

/// The `color.enabled` setting, if configured.
pub fn color_setting() -> Option<bool> {
    load()
        .get("color")?
        .as_table()?
        .get("enabled")?
        .as_bool()
}

/// Create the configuration directory if needed.
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine home directory")?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

/// Persist the color setting, preserving any other existing settings.
pub fn save_color_setting(enabled: bool) -> Result<()> {
    ensure_config_dir()?;
    let path = config_file().context("Could not determine home directory")?;

    let mut table = load();
    let color = table
        .entry("color")
        .or_insert_with(|| toml::Value::Table(Table::new()));
    if let Some(section) = color.as_table_mut() {
        section.insert("enabled".to_string(), toml::Value::Boolean(enabled));
    }

    let body = toml::to_string(&table).context("Failed to serialize configuration")?;
    let contents = format!(
        "# Requirements CLI Configuration\n# This file is auto-generated. You can edit it manually.\n\n{body}"
    );
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

/// Default content for `config init`.
pub fn default_config_content() -> &'static str {
    "\
# Requirements CLI Configuration
# Place this file at ~/.reqs/config.toml

[color]
# Enable or disable colored output
# Options: true, false
# Default: auto-detected based on terminal support
# enabled = true
"
}
