// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Engine configuration, read once from a TOML file at startup.
//!
//! ```toml
//! [log]
//! level = "info"
//! file = "log/gamekit.log"
//!
//! [ui]
//! caption_height = 18
//! scrollbar_arrow_delay = 0.33
//! ```
//!
//! Every key is optional. The parsed config is stored in a process wide
//! `OnceLock`, so widgets can read their constants without a context
//! reference being threaded through every constructor.

use log::LevelFilter;
use serde::Deserialize;
use std::{path::Path, sync::OnceLock};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "log/gamekit.log".to_string(),
        }
    }
}

impl LogConfig {
    /// Unknown level names fall back to `Info`
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Prefix the asset manager joins to relative paths before loading
    pub root: String,
}

/// Widget metrics and timings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub caption_height: i32,
    pub scrollbar_width: i32,
    pub scrollbar_min_thumb: i32,
    /// seconds an arrow must be held before auto-repeat starts
    pub scrollbar_arrow_delay: f64,
    /// seconds between auto-repeat steps
    pub scrollbar_arrow_repeat: f64,
    pub combo_drop_height: i32,
    pub list_item_height: i32,
    pub list_border: i32,
    pub list_margin: i32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            caption_height: 18,
            scrollbar_width: 16,
            scrollbar_min_thumb: 8,
            scrollbar_arrow_delay: 0.33,
            scrollbar_arrow_repeat: 0.05,
            combo_drop_height: 100,
            list_item_height: 16,
            list_border: 6,
            list_margin: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub log: LogConfig,
    pub assets: AssetConfig,
    pub ui: UiConfig,
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Install the process wide configuration.
///
/// Only the first call wins; returns false when a config was already set.
pub fn init_engine_config(config: EngineConfig) -> bool {
    ENGINE_CONFIG.set(config).is_ok()
}

/// Process wide configuration, defaults if `init_engine_config` was never called
pub fn engine_config() -> &'static EngineConfig {
    ENGINE_CONFIG.get_or_init(EngineConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [log]
            level = "debug"

            [ui]
            scrollbar_width = 20
            "#,
        )
        .unwrap();
        assert_eq!(cfg.log.level_filter(), LevelFilter::Debug);
        assert_eq!(cfg.log.file, "log/gamekit.log");
        assert_eq!(cfg.ui.scrollbar_width, 20);
        assert_eq!(cfg.ui.caption_height, 18);
        assert_eq!(cfg.assets.root, "");
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let err = EngineConfig::from_toml_str("[ui]\nscrollbar_width = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let cfg = LogConfig {
            level: "chatty".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(cfg.level_filter(), LevelFilter::Info);
    }
}
