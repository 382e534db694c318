//! Process settings read once from the environment.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Minimum severity, keyed by the numeric levels accepted in `LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            -4 => Some(LogLevel::Debug),
            0 => Some(LogLevel::Info),
            4 => Some(LogLevel::Warn),
            8 => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_tracing(&self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub connection_string: String,
    pub log_level: LogLevel,
    pub log_target: LogTarget,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let connection_string = get("CONNECTION_STRING").ok_or(ConfigError::Missing("CONNECTION_STRING"))?;

        let raw_level = get("LOG_LEVEL").ok_or(ConfigError::Missing("LOG_LEVEL"))?;
        let n: i32 = raw_level.parse().map_err(|_| ConfigError::Invalid {
            key: "LOG_LEVEL",
            reason: format!("'{}' is not a number", raw_level),
        })?;
        let log_level = LogLevel::from_number(n).ok_or_else(|| ConfigError::Invalid {
            key: "LOG_LEVEL",
            reason: format!("{} is not one of -4, 0, 4, 8", n),
        })?;

        let log_target = match get("LOG_FILE") {
            Some(path) => LogTarget::File(PathBuf::from(path)),
            None => LogTarget::Stdout,
        };

        let raw_addr = get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "LISTEN_ADDR",
            reason: format!("'{}' is not a socket address", raw_addr),
        })?;

        let max_connections = match get("MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "MAX_CONNECTIONS",
                        reason: format!("'{}' is not a positive integer", raw),
                    })
                }
            },
        };

        Ok(Settings {
            connection_string,
            log_level,
            log_target,
            listen_addr,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let s = Settings::from_lookup(lookup(&[
            ("CONNECTION_STRING", "postgres://localhost/fleet"),
            ("LOG_LEVEL", "0"),
        ]))
        .unwrap();
        assert_eq!(s.connection_string, "postgres://localhost/fleet");
        assert_eq!(s.log_level, LogLevel::Info);
        assert_eq!(s.log_target, LogTarget::Stdout);
        assert_eq!(s.listen_addr, DEFAULT_LISTEN_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(s.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn log_file_selects_file_target() {
        let s = Settings::from_lookup(lookup(&[
            ("CONNECTION_STRING", "postgres://db"),
            ("LOG_LEVEL", "-4"),
            ("LOG_FILE", "/var/log/fleetman.log"),
        ]))
        .unwrap();
        assert_eq!(s.log_level, LogLevel::Debug);
        assert_eq!(s.log_target, LogTarget::File(PathBuf::from("/var/log/fleetman.log")));
    }

    #[test]
    fn blank_log_file_means_stdout() {
        let s = Settings::from_lookup(lookup(&[
            ("CONNECTION_STRING", "postgres://db"),
            ("LOG_LEVEL", "8"),
            ("LOG_FILE", "  "),
        ]))
        .unwrap();
        assert_eq!(s.log_target, LogTarget::Stdout);
        assert_eq!(s.log_level, LogLevel::Error);
    }

    #[test]
    fn non_numeric_log_level_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("CONNECTION_STRING", "postgres://db"), ("LOG_LEVEL", "info")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "LOG_LEVEL", .. }));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("CONNECTION_STRING", "postgres://db"), ("LOG_LEVEL", "2")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "LOG_LEVEL", .. }));
    }

    #[test]
    fn missing_connection_string_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("LOG_LEVEL", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CONNECTION_STRING")));
    }

    #[test]
    fn zero_max_connections_is_rejected() {
        let err = Settings::from_lookup(lookup(&[
            ("CONNECTION_STRING", "postgres://db"),
            ("LOG_LEVEL", "4"),
            ("MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn log_levels_map_to_tracing() {
        assert_eq!(LogLevel::from_number(-4).unwrap().as_tracing(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::from_number(0).unwrap().as_tracing(), tracing::Level::INFO);
        assert_eq!(LogLevel::from_number(4).unwrap().as_tracing(), tracing::Level::WARN);
        assert_eq!(LogLevel::from_number(8).unwrap().as_tracing(), tracing::Level::ERROR);
        assert_eq!(LogLevel::from_number(1), None);
    }
}
