// Standard library
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, fs};

// 3rd party crates
use config::{Config, ConfigError, Environment, File};
use log::{error, info, LevelFilter};
use tokio::sync::RwLock;

// Current module imports
use super::constants::DEFAULT_CONFIG;
use super::errors::ValidationError;
use super::types::{ConfigManager, Settings, ValidatedSettings};

impl Settings {
    pub fn get_log_level(&self) -> String {
        self.log.level.to_lowercase()
    }

    pub fn get_update_interval(&self) -> u64 {
        self.update.interval
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate log level
        match self.log.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(ValidationError::InvalidLogLevel(self.log.level.clone())),
        }

        // Validate update interval
        if self.update.interval == 0 {
            return Err(ValidationError::InvalidUpdateInterval(self.update.interval));
        }

        // Without an enabled provider there is no syncer to drive
        if !self.cloudflare.enabled {
            return Err(ValidationError::NoProviderEnabled);
        }
        self.cloudflare.validate()?;

        Ok(())
    }
}

impl ConfigManager {
    /// Creates a new `ConfigManager` instance by loading and validating the configuration.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path: PathBuf = Self::get_config_path()?;
        Self::ensure_config_file_exists(&config_path)?;

        let settings: Settings = Self::load_settings(&config_path)?;

        // Validate settings before proceeding
        let validated_settings = ValidatedSettings::new(settings).map_err(|e| {
            error!("Configuration validation failed: {}", e);
            e
        })?;

        let manager = ConfigManager {
            settings: Arc::new(RwLock::new(validated_settings.into_inner())),
            _config_path: config_path,
        };

        manager.adjust_logging_level().await;

        Ok(manager)
    }

    /// Determines the configuration file path.
    fn get_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = env::var("SDDNS_CONFIG_PATH") {
            Ok(PathBuf::from(path))
        } else if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("sddns").join("config.toml"))
        } else {
            let msg: &str = "Could not determine the configuration directory";
            error!("{}", msg);
            Err(ConfigError::Message(msg.into()))
        }
    }

    /// Ensures that the configuration file exists, creating it if necessary.
    fn ensure_config_file_exists(config_path: &Path) -> Result<(), ConfigError> {
        if !config_path.exists() {
            if let Some(parent_dir) = config_path.parent() {
                fs::create_dir_all(parent_dir).map_err(|e| {
                    let msg: String = format!("Failed to create configuration directory: {}", e);
                    error!("{}", msg);
                    ConfigError::Message(msg)
                })?;
            }
            fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                let msg: String = format!("Failed to create default configuration file: {}", e);
                error!("{}", msg);
                ConfigError::Message(msg)
            })?;
            info!("Default configuration file created at: {:?}", config_path);
        }
        Ok(())
    }

    /// Loads the settings from the configuration file and environment variables.
    fn load_settings(config_path: &Path) -> Result<Settings, ConfigError> {
        let config_file: &str = config_path.to_str().ok_or_else(|| {
            let msg: &str = "Configuration file path contains invalid UTF-8 characters";
            error!("{}", msg);
            ConfigError::Message(msg.into())
        })?;

        let settings: Config = Config::builder()
            .add_source(File::with_name(config_file))
            .add_source(Environment::with_prefix("SDDNS").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Reloads the configuration from the file.
    pub async fn _reload(&self) -> Result<(), Box<dyn std::error::Error>> {
        let new_settings: Settings = Self::load_settings(&self._config_path)?;

        // Validate settings before updating
        let validated_settings = ValidatedSettings::new(new_settings).map_err(|e| {
            error!("Configuration validation failed during reload: {}", e);
            e
        })?;

        *self.settings.write().await = validated_settings.into_inner();
        self.adjust_logging_level().await;
        info!("Configuration reloaded from {:?}", self._config_path);
        Ok(())
    }

    /// Adjusts the logging level based on the configuration.
    async fn adjust_logging_level(&self) {
        let level: String = self.get_log_level().await;
        let level_filter: LevelFilter = match level.as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        };
        log::set_max_level(level_filter);
    }

    /// Provides a read-locked reference to the current settings.
    pub async fn get_settings(&self) -> tokio::sync::RwLockReadGuard<'_, Settings> {
        self.settings.read().await
    }

    pub async fn get_log_level(&self) -> String {
        self.settings.read().await.get_log_level()
    }

    pub async fn get_update_interval(&self) -> u64 {
        self.settings.read().await.get_update_interval()
    }
}

impl ValidatedSettings {
    pub fn new(settings: Settings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(ValidatedSettings(settings))
    }

    pub fn into_inner(self) -> Settings {
        self.0
    }
}

// Implement Deref to allow transparent access to Settings fields
impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn default_config_parses_and_validates() {
        let settings = parse(DEFAULT_CONFIG);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.update.interval, 1);
        assert_eq!(settings.cache.ttl, 3600);
        assert_eq!(settings.tasks.len(), 1);
        assert_eq!(settings.tasks[0].interval, 1800);
        assert_eq!(settings.finders.len(), 2);
        assert_eq!(settings.finders[0].key, "/ip");
    }

    #[test]
    fn omitted_task_fields_take_defaults() {
        let settings = parse(
            r#"
            [log]
            [update]
            [cache]

            [[tasks]]
            rr = "www"
            domain = "example.com"

            [[finders]]
            name = "ipify"
            server_uri = "https://api.ipify.org/?format=json"

            [cloudflare]
            name = "example.com"
            zone_id = "z"
            api_token = "t"
            "#,
        );
        assert!(settings.validate().is_ok());
        assert_eq!(settings.log.level, "info");
        assert_eq!(settings.update.interval, 1);
        assert_eq!(settings.tasks[0].interval, 1800);
        assert_eq!(settings.finders[0].key, "/ip");
        assert!(settings.cloudflare.enabled);
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut settings = parse(DEFAULT_CONFIG);
        settings.log.level = "verbose".into();
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn disabled_provider_is_rejected() {
        let mut settings = parse(DEFAULT_CONFIG);
        settings.cloudflare.enabled = false;
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::NoProviderEnabled)
        ));
    }

    #[test]
    fn zero_update_interval_is_rejected() {
        let mut settings = parse(DEFAULT_CONFIG);
        settings.update.interval = 0;
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidUpdateInterval(0))
        ));
    }

    #[test]
    fn settings_load_from_a_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, DEFAULT_CONFIG).unwrap();

        let settings = ConfigManager::load_settings(&path).unwrap();
        assert_eq!(settings.cloudflare.name, "example.com");
    }
}
