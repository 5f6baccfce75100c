//! Engine configuration.
//!
//! Layered the same way the source system's single `config.json` tunable
//! was meant to grow: compiled-in defaults, optionally overridden by a TOML
//! file, optionally overridden again by `MPCS_`-prefixed environment
//! variables. Each layer only overrides the keys it sets.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Complete configuration for the reservation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Where reservations and transactions are persisted.
    pub data_file: PathBuf,
    /// Staff id recorded on transactions when the caller doesn't supply one.
    pub default_staff_id: String,
    /// `tracing` log level filter, e.g. `"info"` or `"mpcs=debug"`.
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("mpcs_data.txt"),
            default_staff_id: "system".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// A single layer of partial overrides, as read from a TOML file or built
/// up from environment variables. All fields are optional so a layer can
/// set only the keys it cares about.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigOverrides {
    data_file: Option<PathBuf>,
    default_staff_id: Option<String>,
    log_level: Option<String>,
}

impl EngineConfig {
    fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(data_file) = overrides.data_file {
            self.data_file = data_file;
        }
        if let Some(default_staff_id) = overrides.default_staff_id {
            self.default_staff_id = default_staff_id;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        self
    }

    /// Load configuration: defaults, then `path` if it exists, then
    /// `MPCS_`-prefixed environment variables.
    pub fn load(path: &std::path::Path) -> std::io::Result<Self> {
        let mut config = Self::default();

        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let overrides: ConfigOverrides = toml::from_str(&contents)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            config = config.apply(overrides);
        }

        config = config.apply(Self::env_overrides());
        Ok(config)
    }

    fn env_overrides() -> ConfigOverrides {
        ConfigOverrides {
            data_file: std::env::var("MPCS_DATA_FILE").ok().map(PathBuf::from),
            default_staff_id: std::env::var("MPCS_DEFAULT_STAFF_ID").ok(),
            log_level: std::env::var("MPCS_LOG_LEVEL").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = EngineConfig::load(std::path::Path::new("/nonexistent/mpcs.toml")).unwrap();
        assert_eq!(config.data_file, PathBuf::from("mpcs_data.txt"));
        assert_eq!(config.default_staff_id, "system");
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mpcs.toml");
        std::fs::write(&path, "data_file = \"custom.txt\"\ndefault_staff_id = \"alice\"\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("custom.txt"));
        assert_eq!(config.default_staff_id, "alice");
        assert_eq!(config.log_level, "info");
    }
}
