use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::AppConfig;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const API_URL_ENV: &str = "OFFERBOARD_API_URL";

/// Loads and saves [`AppConfig`] as TOML.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the platform config directory.
    pub fn from_default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "Offerboard", "Offerboard")
            .ok_or_else(|| anyhow!("Could not determine a config directory for this platform"))?;
        Ok(Self::new(dirs.config_dir().join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config file; a missing file yields defaults. The
    /// `OFFERBOARD_API_URL` environment variable overrides the base URL.
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)
                .with_context(|| format!("failed to read config from {}", self.path.display()))?;
            toml::from_str(&data)
                .with_context(|| format!("failed to parse config {}", self.path.display()))?
        } else {
            log::debug!("No config at {}, using defaults", self.path.display());
            AppConfig::default()
        };

        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                log::info!("Using API base URL from {}", API_URL_ENV);
                config.api.base_url = url.trim().to_string();
            }
        }

        config
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(config).context("failed to serialize config")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write config to {}", self.path.display()))?;
        log::info!("Saved config to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn missing_file_yields_defaults() {
        env::remove_var(API_URL_ENV);
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("absent.toml"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    #[serial]
    fn save_then_load_round_trips() {
        env::remove_var(API_URL_ENV);
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join(CONFIG_FILE_NAME));

        let mut config = AppConfig::default();
        config.api.base_url = "https://offers.example/api".to_string();
        config.api.timeout_secs = Some(8);
        config.countdown.tick_millis = 500;
        service.save(&config).unwrap();

        assert_eq!(service.load().unwrap(), config);
    }

    #[test]
    #[serial]
    fn env_override_wins_over_file() {
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join(CONFIG_FILE_NAME));
        service.save(&AppConfig::default()).unwrap();

        env::set_var(API_URL_ENV, "https://staging.example/api");
        let loaded = service.load();
        env::remove_var(API_URL_ENV);

        assert_eq!(loaded.unwrap().api.base_url, "https://staging.example/api");
    }

    #[test]
    #[serial]
    fn malformed_file_is_an_error() {
        env::remove_var(API_URL_ENV);
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = SettingsService::new(path).load().unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config"));
    }
}
