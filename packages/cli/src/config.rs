use anyhow::{anyhow, Context, Result};
use labelwatch_core::ToolConfig;
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "labelwatch.config.json";

/// Load tool settings.
///
/// An explicitly requested file must exist. Otherwise
/// `labelwatch.config.json` in `cwd` is used when present, defaults when not.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<ToolConfig> {
    let config_path = match explicit {
        Some(path) if !path.exists() => {
            return Err(anyhow!("Config file does not exist: {}", path.display()));
        }
        Some(path) => path.to_path_buf(),
        None => cwd.join(DEFAULT_CONFIG_NAME),
    };

    if !config_path.exists() {
        return Ok(ToolConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: ToolConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file {}", config_path.display()))?;
    Ok(config)
}
