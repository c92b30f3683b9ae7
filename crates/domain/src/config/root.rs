use serde::{Deserialize, Serialize};

use super::{AccessConfig, ClientsConfig, ConfigError, DiscoveryConfig, LoggingConfig};
use crate::Client;

/// Main configuration loaded from `kestrel-dns.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub clients: ClientsConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub access: AccessConfig,
}

/// Values given on the command line win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub runtime_ttl_secs: Option<u64>,
    pub arp_path: Option<String>,
    pub dhcp_leases_path: Option<String>,
}

impl Config {
    /// Loads the config file if a path is given, otherwise starts from
    /// defaults, then applies the CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
                        path: path.to_string(),
                        reason: e.to_string(),
                    })?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(ttl) = overrides.runtime_ttl_secs {
            self.clients.runtime_ttl_secs = ttl;
        }
        if let Some(path) = overrides.arp_path {
            self.discovery.arp_path = path;
        }
        if let Some(path) = overrides.dhcp_leases_path {
            self.discovery.dhcp_leases_path = Some(path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.logging.is_valid_level() {
            return Err(ConfigError::Validation(format!(
                "unknown log level {:?}",
                self.logging.level
            )));
        }

        let intervals = [
            ("clients.runtime_ttl_secs", self.clients.runtime_ttl_secs),
            ("clients.sweep_interval_secs", self.clients.sweep_interval_secs),
            ("discovery.arp_interval_secs", self.discovery.arp_interval_secs),
            ("discovery.dhcp_interval_secs", self.discovery.dhcp_interval_secs),
            ("discovery.rdns_interval_secs", self.discovery.rdns_interval_secs),
            ("discovery.rdns_timeout_ms", self.discovery.rdns_timeout_ms),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Validation(format!("{name} must be positive")));
        }

        if self.clients.sweep_batch_size == 0 {
            return Err(ConfigError::Validation(
                "clients.sweep_batch_size must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Converts the `[[clients.persistent]]` records into validated clients.
    pub fn persistent_clients(&self) -> Result<Vec<Client>, ConfigError> {
        self.clients
            .persistent
            .iter()
            .map(|record| {
                Client::try_from(record.clone()).map_err(|source| ConfigError::InvalidClient {
                    name: record.name.clone(),
                    source,
                })
            })
            .collect()
    }
}
