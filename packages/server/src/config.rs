//! Server configuration from environment variables.

use std::path::PathBuf;

/// Default location of the dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/massacres.csv";

/// Errors in the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `PORT` is not a valid port number.
    #[error("Invalid PORT '{value}': {source}")]
    InvalidPort {
        /// The rejected value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::num::ParseIntError,
    },

    /// A boolean flag is not `true`/`false`/`1`/`0`.
    #[error("Invalid value '{value}' for {name}: expected true or false")]
    InvalidFlag {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Runtime configuration of the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// CSV dataset to load at startup (`DATA_PATH`).
    pub data_path: PathBuf,
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Front-end build served at `/` (`STATIC_DIR`).
    pub static_dir: PathBuf,
    /// Geocode records without valid coordinates at startup
    /// (`GEOCODE_MISSING`).
    pub geocode_missing: bool,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` or `GEOCODE_MISSING` is set to an
    /// unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` or `GEOCODE_MISSING` is set to an
    /// unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => 8080,
        };

        let geocode_missing = match lookup("GEOCODE_MISSING") {
            Some(value) => parse_flag("GEOCODE_MISSING", value)?,
            None => false,
        };

        Ok(Self {
            data_path: lookup("DATA_PATH").map_or_else(|| DEFAULT_DATA_PATH.into(), PathBuf::from),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            static_dir: lookup("STATIC_DIR").map_or_else(|| "app/dist".into(), PathBuf::from),
            geocode_missing,
        })
    }
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, PathBuf::from("app/dist"));
        assert!(!config.geocode_missing);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("DATA_PATH", "/srv/massacres.csv"),
            ("BIND_ADDR", "0.0.0.0"),
            ("PORT", "3000"),
            ("GEOCODE_MISSING", "true"),
        ])
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/srv/massacres.csv"));
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.geocode_missing);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(config(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn rejects_bad_flag() {
        let err = config(&[("GEOCODE_MISSING", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFlag { name: "GEOCODE_MISSING", .. }));
    }
}
