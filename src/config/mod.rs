// src/config/mod.rs - Bot configuration: TOML file with environment overrides

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;

/// Restriction duration used when nothing else is configured (15 minutes).
pub const DEFAULT_RESTRICTION_SECONDS: u64 = 60 * 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Everything the bot needs from the outside world. The disallowed term
/// itself is not configurable; it is the point of the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// How long a flagged member loses the ability to speak, in seconds.
    pub restriction_seconds: u64,
    /// Role names whose holders are never restricted.
    pub exempt_roles: Vec<String>,
    /// Optional label of a channel that should receive action text.
    pub log_channel: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            restriction_seconds: DEFAULT_RESTRICTION_SECONDS,
            exempt_roles: vec!["Moderators".to_string(), "Officers".to_string()],
            log_channel: None,
        }
    }
}

impl BotConfig {
    /// Load configuration from a TOML file. A missing file is not an error:
    /// the defaults cover local runs.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply environment variable overrides on top of whatever the file
    /// said. Variables: WORDWARDEN_RESTRICTION_SECONDS,
    /// WORDWARDEN_EXEMPT_ROLES (comma-separated), WORDWARDEN_LOG_CHANNEL.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = env::var("WORDWARDEN_RESTRICTION_SECONDS") {
            self.restriction_seconds = value.parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "WORDWARDEN_RESTRICTION_SECONDS must be a number, got '{}'",
                    value
                ))
            })?;
        }
        if let Ok(value) = env::var("WORDWARDEN_EXEMPT_ROLES") {
            self.exempt_roles = value
                .split(',')
                .map(|role| role.trim().to_string())
                .filter(|role| !role.is_empty())
                .collect();
        }
        if let Ok(value) = env::var("WORDWARDEN_LOG_CHANNEL") {
            self.log_channel = if value.is_empty() { None } else { Some(value) };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.restriction_seconds == 0 {
            return Err(ConfigError::Invalid(
                "restriction_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.restriction_seconds, 900);
        assert!(config.exempt_roles.contains(&"Moderators".to_string()));
        assert!(config.log_channel.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = BotConfig::load(Path::new("/nonexistent/wordwarden.toml")).unwrap();
        assert_eq!(config.restriction_seconds, DEFAULT_RESTRICTION_SECONDS);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "restriction_seconds = 60\nexempt_roles = [\"Staff\"]\nlog_channel = \"mod-log\""
        )
        .unwrap();

        let config = BotConfig::load(file.path()).unwrap();
        assert_eq!(config.restriction_seconds, 60);
        assert_eq!(config.exempt_roles, vec!["Staff".to_string()]);
        assert_eq!(config.log_channel.as_deref(), Some("mod-log"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "restriction_seconds = 120").unwrap();

        let config = BotConfig::load(file.path()).unwrap();
        assert_eq!(config.restriction_seconds, 120);
        assert!(config.exempt_roles.contains(&"Officers".to_string()));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "restriction_seconds = \"soon\"").unwrap();

        assert!(matches!(
            BotConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_restriction_rejected() {
        let config = BotConfig {
            restriction_seconds: 0,
            ..BotConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
