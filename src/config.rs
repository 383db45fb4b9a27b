//! Session configuration - passed from higher layers

use crate::storage::{THEME_KEY, WALLET_ADDRESS_KEY};

pub const APP_ENV: &str = "EDUCHAIN_APP";
pub const STORAGE_ENV: &str = "EDUCHAIN_STORAGE";
pub const DEFAULT_APP: &str = "educhain";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid storage mode '{0}' (expected 'persistent' or 'memory')")]
    StorageMode(String),
    #[error("app name must not be empty")]
    EmptyApp,
}

/// Where session state lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Survives reloads: a file natively, `localStorage` in the browser.
    #[default]
    Persistent,
    /// Process-lifetime only.
    Memory,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Persistent => "persistent",
            StorageMode::Memory => "memory",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "persistent" | "file" | "local" => Some(StorageMode::Persistent),
            "memory" | "mem" | "ephemeral" => Some(StorageMode::Memory),
            _ => None,
        }
    }
}

/// Session configuration. Higher layers construct this.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub app: String,
    pub storage: StorageMode,
    pub wallet_key: String,
    pub theme_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app: DEFAULT_APP.into(),
            storage: StorageMode::default(),
            wallet_key: WALLET_ADDRESS_KEY.into(),
            theme_key: THEME_KEY.into(),
        }
    }
}

impl SessionConfig {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into(), ..Default::default() }
    }
    pub fn with_storage(mut self, mode: StorageMode) -> Self { self.storage = mode; self }
    pub fn in_memory(self) -> Self { self.with_storage(StorageMode::Memory) }
    pub fn with_keys(mut self, wallet_key: impl Into<String>, theme_key: impl Into<String>) -> Self {
        self.wallet_key = wallet_key.into();
        self.theme_key = theme_key.into();
        self
    }

    /// Read `EDUCHAIN_APP` / `EDUCHAIN_STORAGE`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(app) = std::env::var(APP_ENV) {
            config.app = app;
        }
        if let Ok(mode) = std::env::var(STORAGE_ENV) {
            config.storage = StorageMode::from_str(&mode).ok_or(ConfigError::StorageMode(mode))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.trim().is_empty() {
            return Err(ConfigError::EmptyApp);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_documented_keys() {
        let config = SessionConfig::default();
        assert_eq!(config.app, "educhain");
        assert_eq!(config.storage, StorageMode::Persistent);
        assert_eq!(config.wallet_key, "walletAddress");
        assert_eq!(config.theme_key, "theme");
    }

    #[test]
    fn builder_overrides() {
        let config = SessionConfig::new("demo").in_memory().with_keys("w", "t");
        assert_eq!(config.app, "demo");
        assert_eq!(config.storage, StorageMode::Memory);
        assert_eq!((config.wallet_key.as_str(), config.theme_key.as_str()), ("w", "t"));
    }

    #[test]
    fn storage_mode_parsing() {
        assert_eq!(StorageMode::from_str(" Memory"), Some(StorageMode::Memory));
        assert_eq!(StorageMode::from_str("file"), Some(StorageMode::Persistent));
        assert_eq!(StorageMode::from_str("cloud"), None);
        assert_eq!(StorageMode::Memory.as_str(), "memory");
    }

    #[test]
    fn empty_app_is_rejected() {
        assert!(matches!(SessionConfig::new("  ").validate(), Err(ConfigError::EmptyApp)));
    }
}
