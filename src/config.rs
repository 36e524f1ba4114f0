use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::{MAX_BATCH, MIN_BATCH};
use crate::store::JsonStore;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_drill_size")]
    pub drill_size: usize,
    #[serde(default = "default_mock_size")]
    pub mock_size: usize,
    #[serde(default = "default_mock_minutes")]
    pub mock_minutes: u64,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_generation_model")]
    pub generation_model: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
    #[serde(default = "default_generation_count")]
    pub default_generation_count: u32,
}

fn default_drill_size() -> usize {
    10
}
fn default_mock_size() -> usize {
    30
}
fn default_mock_minutes() -> u64 {
    30
}
fn default_data_dir() -> String {
    JsonStore::default_dir().to_string_lossy().to_string()
}
fn default_generation_model() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
fn default_generation_timeout_secs() -> u64 {
    60
}
fn default_generation_count() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drill_size: default_drill_size(),
            mock_size: default_mock_size(),
            mock_minutes: default_mock_minutes(),
            data_dir: default_data_dir(),
            generation_model: default_generation_model(),
            api_key_env: default_api_key_env(),
            generation_timeout_secs: default_generation_timeout_secs(),
            default_generation_count: default_generation_count(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nursepro")
            .join("config.toml")
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn mock_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.mock_minutes * 60)
    }

    /// API key from the configured environment variable, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    /// Clamp numeric settings into usable ranges.
    pub fn validate(&mut self) {
        self.drill_size = self.drill_size.clamp(1, 100);
        self.mock_size = self.mock_size.clamp(1, 200);
        self.mock_minutes = self.mock_minutes.clamp(1, 300);
        self.generation_timeout_secs = self.generation_timeout_secs.clamp(5, 600);
        self.default_generation_count = self.default_generation_count.clamp(MIN_BATCH, MAX_BATCH);
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.drill_size, 10);
        assert_eq!(config.mock_size, 30);
        assert_eq!(config.mock_minutes, 30);
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert!(config.data_dir.contains("nursepro"));
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
drill_size = 15
generation_model = "gemini-2.5-pro"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.drill_size, 15);
        assert_eq!(config.generation_model, "gemini-2.5-pro");
        assert_eq!(config.mock_size, 30);
        assert_eq!(config.default_generation_count, 5);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.mock_minutes, deserialized.mock_minutes);
        assert_eq!(config.data_dir, deserialized.data_dir);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.drill_size = 0;
        config.mock_size = 10_000;
        config.mock_minutes = 0;
        config.default_generation_count = 99;
        config.data_dir = "  ".to_string();
        config.validate();

        assert_eq!(config.drill_size, 1);
        assert_eq!(config.mock_size, 200);
        assert_eq!(config.mock_minutes, 1);
        assert_eq!(config.default_generation_count, MAX_BATCH);
        assert!(!config.data_dir.trim().is_empty());
    }

    #[test]
    fn test_mock_duration() {
        let config = Config::default();
        assert_eq!(config.mock_duration().as_secs(), 30 * 60);
    }
}
