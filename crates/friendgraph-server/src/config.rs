//! Server configuration read from environment variables.
//!
//! - `FRIENDGRAPH_DATA_PATH`: JSON data document (default: "data.json")
//! - `FRIENDGRAPH_HOST`: listen host (default: "127.0.0.1")
//! - `FRIENDGRAPH_PORT`: listen port (default: "8080")
//! - `FRIENDGRAPH_SAVE_POLICY`: "every-mutation" or "on-shutdown"
//!   (default: "every-mutation")

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DATA_PATH_VAR: &str = "FRIENDGRAPH_DATA_PATH";
pub const HOST_VAR: &str = "FRIENDGRAPH_HOST";
pub const PORT_VAR: &str = "FRIENDGRAPH_PORT";
pub const SAVE_POLICY_VAR: &str = "FRIENDGRAPH_SAVE_POLICY";

/// When the graph is written back to its data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    /// Save after every successful mutation, before the response is sent.
    /// A failed save rolls the mutation back.
    #[default]
    EveryMutation,
    /// Keep changes in memory and save once on graceful shutdown.
    OnShutdown,
}

impl fmt::Display for SavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavePolicy::EveryMutation => write!(f, "every-mutation"),
            SavePolicy::OnShutdown => write!(f, "on-shutdown"),
        }
    }
}

impl FromStr for SavePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every-mutation" | "every_mutation" => Ok(SavePolicy::EveryMutation),
            "on-shutdown" | "on_shutdown" => Ok(SavePolicy::OnShutdown),
            other => Err(ConfigError::Invalid {
                var: SAVE_POLICY_VAR,
                value: other.to_string(),
                expected: "every-mutation or on-shutdown",
            }),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid, expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub save_policy: SavePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            data_path: PathBuf::from("data.json"),
            host: "127.0.0.1".to_string(),
            port: 8080,
            save_policy: SavePolicy::EveryMutation,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(path) = lookup(DATA_PATH_VAR) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(host) = lookup(HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                var: PORT_VAR,
                value: port.clone(),
                expected: "a port number",
            })?;
        }
        if let Some(policy) = lookup(SAVE_POLICY_VAR) {
            config.save_policy = policy.parse()?;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            (DATA_PATH_VAR, "/var/lib/friendgraph/users.json"),
            (HOST_VAR, "0.0.0.0"),
            (PORT_VAR, "9000"),
            (SAVE_POLICY_VAR, "on-shutdown"),
        ]))
        .unwrap();
        assert_eq!(
            config.data_path,
            PathBuf::from("/var/lib/friendgraph/users.json")
        );
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.save_policy, SavePolicy::OnShutdown);
    }

    #[test]
    fn rejects_bad_port_and_policy() {
        let err = ServerConfig::from_lookup(lookup(&[(PORT_VAR, "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: PORT_VAR, .. }));

        let err = ServerConfig::from_lookup(lookup(&[(SAVE_POLICY_VAR, "sometimes")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: SAVE_POLICY_VAR, .. }));
    }

    #[test]
    fn save_policy_display_round_trips() {
        for policy in [SavePolicy::EveryMutation, SavePolicy::OnShutdown] {
            assert_eq!(policy.to_string().parse::<SavePolicy>().unwrap(), policy);
        }
    }
}
