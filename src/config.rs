use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".searchtui";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "searchtui.log";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub title: String,
    /// Redraw interval; drives the loading spinner.
    pub tick_rate_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "Search".to_string(),
            tick_rate_ms: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub placeholder: String,
    pub button_label: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            placeholder: "Type a query and press Enter".to_string(),
            button_label: "Search".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Configured log file, or `~/.searchtui/searchtui.log`.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(LOG_FILE)))
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing default file yields the built-in defaults; an explicitly
    /// requested file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.general.title, "Search");
        assert_eq!(config.general.tick_rate_ms, 120);
        assert_eq!(config.search.button_label, "Search");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.general.title, "Search");
        assert_eq!(
            config.search.placeholder,
            "Type a query and press Enter"
        );
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse(
            r#"
[general]
title = "Find things"

[logging]
level = "debug"
file = "/tmp/searchtui-test.log"
"#,
        )
        .unwrap();

        assert_eq!(config.general.title, "Find things");
        assert_eq!(config.general.tick_rate_ms, 120);
        assert_eq!(config.search.button_label, "Search");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.file_path(),
            Some(PathBuf::from("/tmp/searchtui-test.log"))
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(Config::parse("[general\ntitle = ").is_err());
        assert!(Config::parse("[general]\ntick_rate_ms = \"fast\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[search]\nbutton_label = \"Go\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.search.button_label, "Go");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.general.title, config.general.title);
        assert_eq!(parsed.search.placeholder, config.search.placeholder);
    }
}
