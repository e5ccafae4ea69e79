//! Configuration management

use crate::error::{ErrorContext, MusicverseError, MusicverseResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration, usually read from `musicverse.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicverseConfig {
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Upper bound on `session.lifetime_hours`, 100 years
pub const MAX_SESSION_LIFETIME_HOURS: u32 = 100 * 365 * 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a session credential stays valid after login
    pub lifetime_hours: u32,
    /// Fixed name the credential is stored under
    pub storage_key: String,
    /// Where the credential slot lives
    pub storage: SlotBacking,
}

/// Backing of the credential slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotBacking {
    /// A file inside `storage.data_dir`, survives restarts
    File,
    /// Held in process only
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Start from the built-in sample songs instead of an empty library
    pub seed_on_start: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lifetime_hours: 24,
            storage_key: "music_auth_token".to_string(),
            storage: SlotBacking::File,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.musicverse".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_on_start: true,
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~` expanded to the home directory
    pub fn resolved_data_dir(&self) -> PathBuf {
        match self.data_dir.strip_prefix('~') {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
                None => PathBuf::from(&self.data_dir),
            },
            None => PathBuf::from(&self.data_dir),
        }
    }
}

impl MusicverseConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> MusicverseResult<Self> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy();

        let content = std::fs::read_to_string(path).map_err(|e| MusicverseError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_metadata("path", &path_str)
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: MusicverseConfig =
            toml::from_str(&content).map_err(|e| MusicverseError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_metadata("path", &path_str)
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> MusicverseResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| MusicverseError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| MusicverseError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> MusicverseResult<()> {
        let lifetime = self.session.lifetime_hours;
        if lifetime == 0 || lifetime > MAX_SESSION_LIFETIME_HOURS {
            return Err(crate::validation_error!(
                format!(
                    "session.lifetime_hours must be between 1 and {}, got {}",
                    MAX_SESSION_LIFETIME_HOURS, lifetime
                ),
                "session.lifetime_hours",
                "config",
                "Set session.lifetime_hours to a positive value of at most 100 years"
            ));
        }

        if self.session.storage_key.trim().is_empty() {
            return Err(crate::validation_error!(
                "session.storage_key must not be empty",
                "session.storage_key",
                "config",
                "Remove the key to use the default \"music_auth_token\""
            ));
        }

        if self.session.storage == SlotBacking::File && self.storage.data_dir.trim().is_empty() {
            return Err(crate::validation_error!(
                "storage.data_dir is required for file-backed sessions",
                "storage.data_dir",
                "config",
                "Set storage.data_dir or use session.storage = \"memory\""
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MusicverseConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.lifetime_hours, 24);
        assert_eq!(config.session.storage_key, "music_auth_token");
        assert!(config.catalog.seed_on_start);
    }

    #[test]
    fn test_rejects_zero_lifetime() {
        let mut config = MusicverseConfig::default();
        config.session.lifetime_hours = 0;
        assert!(matches!(
            config.validate(),
            Err(MusicverseError::Validation { .. })
        ));
    }

    #[test]
    fn test_lifetime_upper_bound() {
        let mut config = MusicverseConfig::default();

        config.session.lifetime_hours = MAX_SESSION_LIFETIME_HOURS;
        assert!(config.validate().is_ok());

        config.session.lifetime_hours = MAX_SESSION_LIFETIME_HOURS + 1;
        match config.validate() {
            Err(MusicverseError::Validation { field, .. }) => {
                assert_eq!(field.as_deref(), Some("session.lifetime_hours"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        config.session.lifetime_hours = u32::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: MusicverseConfig = toml::from_str(
            r#"
            [session]
            storage = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.session.storage, SlotBacking::Memory);
        assert_eq!(config.session.lifetime_hours, 24);
        assert_eq!(config.storage.data_dir, "~/.musicverse");
    }

    #[test]
    fn test_tilde_expansion() {
        let storage = StorageConfig {
            data_dir: "/var/lib/musicverse".to_string(),
        };
        assert_eq!(
            storage.resolved_data_dir(),
            PathBuf::from("/var/lib/musicverse")
        );

        if let Some(home) = dirs::home_dir() {
            let storage = StorageConfig::default();
            assert_eq!(storage.resolved_data_dir(), home.join(".musicverse"));
        }
    }
}
