use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "best-price.json";

/// Application settings. Every field is optional in the file.
///
/// ```json
/// { "data_file": "precos.csv", "default_city": "Aracaju", "default_state": "SE" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Price catalog (`.csv` or `.json`).
    pub data_file: PathBuf,
    /// Initial value of the city filter.
    pub default_city: String,
    /// Initial value of the state filter.
    pub default_state: String,
    /// Where the save dialog starts.
    pub export_dir: PathBuf,
    /// Seconds between banner rotations.
    pub rotation_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("precos.csv"),
            default_city: "Aracaju".to_string(),
            default_state: "SE".to_string(),
            export_dir: PathBuf::from("."),
            rotation_secs: 5,
        }
    }
}

impl AppConfig {
    /// Read settings from `path`; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn rotation_interval(&self) -> Duration {
        Duration::from_secs(self.rotation_secs.max(1))
    }
}
