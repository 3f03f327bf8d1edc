use std::path::PathBuf;
use thiserror::Error;

use crate::core::{validate_game_id, Roster, RosterError, DEFAULT_GAME_ID};

/// Problems found while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("could not read roster file {path}: {source}")]
    RosterFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid roster: {0}")]
    Roster(#[from] RosterError),
}

/// Where game states are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// One JSON file per game under `data_dir`
    File,
    /// In-process only, lost on restart
    Memory,
}

/// Runtime settings, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub store_backend: StoreBackend,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub default_game_id: String,
    pub draw_seed: Option<u64>,
    pub roster: Roster,
}

impl AppConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// # Variables
    ///
    /// - `HOST` (default `0.0.0.0`), `PORT` (default `3000`)
    /// - `ENVIRONMENT` (default `production`)
    /// - `STORE_BACKEND`: `file` (default) or `memory`
    /// - `DATA_DIR` (default `data`), `STATIC_DIR` (default `static`)
    /// - `DEFAULT_GAME_ID` (default `default`)
    /// - `DRAW_SEED`: fixed u64 seed for reproducible draws
    /// - `ROSTER`: comma-separated names, takes precedence over
    ///   `ROSTER_FILE` (JSON array, default `participants.json`)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                reason: format!("'{}' is not a port number", raw),
            })?,
            None => 3000,
        };

        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("file") => StoreBackend::File,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    reason: format!("expected 'file' or 'memory', got '{}'", other),
                })
            }
        };

        let default_game_id = lookup("DEFAULT_GAME_ID").unwrap_or_else(|| DEFAULT_GAME_ID.into());
        validate_game_id(&default_game_id).map_err(|reason| ConfigError::Invalid {
            key: "DEFAULT_GAME_ID",
            reason,
        })?;

        let draw_seed = lookup("DRAW_SEED")
            .map(|raw| {
                raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                    key: "DRAW_SEED",
                    reason: format!("'{}' is not an unsigned integer", raw),
                })
            })
            .transpose()?;

        let roster = match lookup("ROSTER") {
            Some(csv) => Roster::from_csv(&csv)?,
            None => {
                let path = PathBuf::from(
                    lookup("ROSTER_FILE").unwrap_or_else(|| "participants.json".into()),
                );
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::RosterFile { path, source })?;
                Roster::from_json(&contents)?
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "production".into()),
            store_backend,
            data_dir: lookup("DATA_DIR").unwrap_or_else(|| "data".into()).into(),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "static".into()).into(),
            default_game_id,
            draw_seed,
            roster,
        })
    }

    pub fn is_development(&self) -> bool {
        matches!(self.environment.as_str(), "development" | "dev")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_inline_roster() {
        let config = AppConfig::from_lookup(lookup(&[("ROSTER", "Ana,Bea,Cid")])).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.store_backend, StoreBackend::File);
        assert_eq!(config.default_game_id, "default");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.draw_seed, None);
        assert_eq!(config.roster.names(), &["Ana", "Bea", "Cid"]);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert!(!config.is_development());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ROSTER", "Ana,Bea"),
            ("PORT", "8080"),
            ("STORE_BACKEND", "memory"),
            ("DRAW_SEED", "42"),
            ("DEFAULT_GAME_ID", "office"),
            ("ENVIRONMENT", "development"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.draw_seed, Some(42));
        assert_eq!(config.default_game_id, "office");
        assert!(config.is_development());
    }

    #[test]
    fn test_roster_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("participants.json");
        std::fs::write(&path, r#"["Ana", "Bea", "Cid"]"#).unwrap();
        let path = path.to_string_lossy().to_string();

        let config = AppConfig::from_lookup(lookup(&[("ROSTER_FILE", path.as_str())])).unwrap();

        assert_eq!(config.roster.len(), 3);
    }

    #[test]
    fn test_missing_roster_file() {
        let result = AppConfig::from_lookup(lookup(&[("ROSTER_FILE", "/nonexistent/roster.json")]));
        assert!(matches!(result, Err(ConfigError::RosterFile { .. })));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("ROSTER", "Ana,Bea"), ("PORT", "http")])),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("ROSTER", "Ana,Bea"), ("STORE_BACKEND", "mongo")])),
            Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                ..
            })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("ROSTER", "Ana,Bea"), ("DEFAULT_GAME_ID", "a/b")])),
            Err(ConfigError::Invalid {
                key: "DEFAULT_GAME_ID",
                ..
            })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("ROSTER", "Ana")])),
            Err(ConfigError::Roster(_))
        ));
    }
}
