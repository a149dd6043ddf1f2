//! Configuration loading and parsing.
//!
//! Scope: parse `retrace.toml` (or an override path provided by the binary)
//! for the logging surface: log file location and default filter level. The
//! `RUST_LOG` environment variable always wins over the file value.
//! Configuration never changes command semantics. Unknown fields are ignored
//! (TOML deserialization tolerance) to allow forward evolution without
//! immediate warnings.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_file")]
    pub file: PathBuf,
    #[serde(default = "LogConfig::default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
            level: Self::default_level(),
        }
    }
}

impl LogConfig {
    fn default_file() -> PathBuf {
        PathBuf::from("retrace.log")
    }
    fn default_level() -> String {
        "info".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path following platform conventions: a local
/// `retrace.toml` first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("retrace.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("retrace").join("retrace.toml");
    }
    // Final fallback relative filename.
    PathBuf::from("retrace.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                info!(target: "config", path = %path.display(), "config_loaded");
                Ok(Config {
                    raw: Some(content),
                    file,
                })
            }
            Err(err) => {
                info!(target: "config", path = %path.display(), %err, "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}
