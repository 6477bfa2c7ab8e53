//! TOML configuration with full defaults: a missing or partial file is
//! never an error.

use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether to play a speech cue for example sentences.
    pub tts_enabled: bool,
    /// Items per mastered-refresh pass.
    pub refresh_batch: usize,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Chat-completions endpoint for example generation. Empty disables
    /// the remote provider entirely.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key. The key
    /// itself never lives in the config file.
    pub api_key_env: String,
    /// Remote call timeout. The interactive exchange itself is not
    /// bounded; it waits on a human.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tts_enabled: true,
            refresh_batch: recite_core::REFRESH_BATCH,
            provider: ProviderConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            model: "hunyuan-lite".to_string(),
            api_key_env: "RECITE_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is
    /// missing or malformed (the latter is logged).
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("malformed config {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.toml"));
        assert_eq!(config, Config::default());
        assert!(config.tts_enabled);
        assert_eq!(config.refresh_batch, 10);
        assert_eq!(config.provider.timeout_secs, 10);
        assert!(config.provider.endpoint.is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "tts_enabled = false\n\n[provider]\nendpoint = \"https://api.example.com/v1/chat\"\n",
        )
        .unwrap();

        let config = Config::load(&path);
        assert!(!config.tts_enabled);
        assert_eq!(config.refresh_batch, 10);
        assert_eq!(config.provider.endpoint, "https://api.example.com/v1/chat");
        assert_eq!(config.provider.model, "hunyuan-lite");
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tts_enabled = [not toml").unwrap();
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn test_timeout_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[provider]\ntimeout_secs = 30\n").unwrap();
        assert_eq!(Config::load(&path).provider.timeout_secs, 30);
    }
}
