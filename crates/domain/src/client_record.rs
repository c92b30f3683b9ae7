//! Plain export shape of a [`Client`], used by the configuration file.

use crate::{BlockedServicesConfig, Client, DomainError, Identifier, SafeSearchConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub name: String,

    #[serde(default)]
    pub ids: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub upstreams: Vec<String>,

    #[serde(default = "default_true")]
    pub use_global_settings: bool,

    #[serde(default)]
    pub filtering_enabled: bool,

    #[serde(default)]
    pub parental_enabled: bool,

    #[serde(default)]
    pub safebrowsing_enabled: bool,

    #[serde(default)]
    pub safe_search: SafeSearchConfig,

    #[serde(default = "default_true")]
    pub use_global_blocked_services: bool,

    #[serde(default)]
    pub blocked_services: BlockedServicesConfig,

    #[serde(default)]
    pub ignore_querylog: bool,

    #[serde(default)]
    pub ignore_statistics: bool,

    #[serde(default)]
    pub upstreams_cache_enabled: bool,

    #[serde(default)]
    pub upstreams_cache_size: u32,
}

impl From<&Client> for ClientRecord {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.to_string(),
            ids: client.ids.iter().map(|id| id.to_string()).collect(),
            tags: client.tags.clone(),
            upstreams: client.upstreams.clone(),
            use_global_settings: !client.use_own_settings,
            filtering_enabled: client.filtering_enabled,
            parental_enabled: client.parental_enabled,
            safebrowsing_enabled: client.safe_browsing_enabled,
            safe_search: client.safe_search,
            use_global_blocked_services: !client.use_own_blocked_services,
            blocked_services: client.blocked_services.clone(),
            ignore_querylog: client.ignore_query_log,
            ignore_statistics: client.ignore_statistics,
            upstreams_cache_enabled: client.upstreams_cache_enabled,
            upstreams_cache_size: client.upstreams_cache_size,
        }
    }
}

impl TryFrom<ClientRecord> for Client {
    type Error = DomainError;

    fn try_from(record: ClientRecord) -> Result<Self, Self::Error> {
        let ids = record
            .ids
            .iter()
            .map(|raw| Identifier::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let client = Client {
            name: Arc::from(record.name.as_str()),
            ids,
            tags: record.tags,
            upstreams: record.upstreams,
            use_own_settings: !record.use_global_settings,
            filtering_enabled: record.filtering_enabled,
            parental_enabled: record.parental_enabled,
            safe_browsing_enabled: record.safebrowsing_enabled,
            safe_search: record.safe_search,
            use_own_blocked_services: !record.use_global_blocked_services,
            blocked_services: record.blocked_services,
            ignore_query_log: record.ignore_querylog,
            ignore_statistics: record.ignore_statistics,
            upstreams_cache_enabled: record.upstreams_cache_enabled,
            upstreams_cache_size: record.upstreams_cache_size,
        };

        client.validate()?;
        Ok(client)
    }
}
