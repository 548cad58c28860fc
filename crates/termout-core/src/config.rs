use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Console configuration loaded from `~/.config/termout/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Maximum pending messages before producers block.
    pub queue_capacity: usize,
    /// How often the progress bar redraws, in milliseconds.
    pub refresh_interval_ms: u64,
    /// Width of the bar itself (the `[===>--]` part), in cells.
    pub bar_width: usize,
    /// Never draw the bar, even when stdout is a terminal.
    pub plain: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 100,
            refresh_interval_ms: 200,
            bar_width: 40,
            plain: false,
        }
    }
}

impl ConsoleConfig {
    /// Queue capacity, at least 1 (a zero-capacity queue would turn every print into a rendezvous).
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity.max(1)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(10))
    }

    pub fn bar_width(&self) -> usize {
        self.bar_width.max(1)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("termout")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ConsoleConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ConsoleConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<ConsoleConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: ConsoleConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
