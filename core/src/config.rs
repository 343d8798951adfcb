use crate::errors::FluxResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration struct for the FLUX/LanternHive backend client
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FluxConfig {
    pub backend_url: Option<String>,
    pub realtime_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl Default for FluxConfig {
    fn default() -> Self {
        Self {
            backend_url: Some("http://localhost:5000".to_string()),
            realtime_url: Some("ws://localhost:5000/ws".to_string()),
            request_timeout_secs: Some(30),
            log_level: Some("info".to_string()),
        }
    }
}

impl FluxConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> FluxResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                crate::errors::FluxError::ConfigError(format!("Failed to read config file: {}", e))
            })?;

            let config: Self = toml::from_str(&content).map_err(|e| {
                crate::errors::FluxError::ConfigError(format!("Failed to parse config file: {}", e))
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves configuration to a file
    pub fn save_to_file(&self, path: &Path) -> FluxResult<()> {
        let content = toml::to_string(self).map_err(|e| {
            crate::errors::FluxError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        // Ensure the directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                crate::errors::FluxError::ConfigError(format!(
                    "Failed to create config directory: {}",
                    e
                ))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            crate::errors::FluxError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            backend_url: other.backend_url.clone().or_else(|| self.backend_url.clone()),
            realtime_url: other
                .realtime_url
                .clone()
                .or_else(|| self.realtime_url.clone()),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
        }
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> FluxResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        crate::errors::FluxError::ConfigError("Could not determine home directory".to_string())
    })?;

    let config_dir = home_dir.join(".config").join(app_name);

    Ok(config_dir)
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> FluxResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = FluxConfig::default();
        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.request_timeout_secs, Some(30));
    }

    #[test]
    fn merge_prefers_other_values() {
        let base = FluxConfig::default();
        let override_cfg = FluxConfig {
            backend_url: Some("https://flux.example.com".to_string()),
            realtime_url: None,
            request_timeout_secs: None,
            log_level: Some("debug".to_string()),
        };

        let merged = base.merge(&override_cfg);
        assert_eq!(
            merged.backend_url.as_deref(),
            Some("https://flux.example.com")
        );
        // Unset fields fall back to the base config
        assert_eq!(merged.realtime_url, base.realtime_url);
        assert_eq!(merged.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = FluxConfig::load_from_file(&path).unwrap();
        assert_eq!(config.backend_url, FluxConfig::default().backend_url);
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = FluxConfig {
            backend_url: Some("http://127.0.0.1:9000".to_string()),
            realtime_url: Some("ws://127.0.0.1:9000/ws".to_string()),
            request_timeout_secs: Some(5),
            log_level: Some("warn".to_string()),
        };
        config.save_to_file(&path).unwrap();

        let loaded = FluxConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.backend_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(loaded.request_timeout_secs, Some(5));
    }
}
