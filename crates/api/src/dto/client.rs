use kestrel_dns_domain::{
    BlockedServicesConfig, Client, ClientSource, DomainError, Identifier, RuntimeClient,
    SafeSearchConfig, WeeklySchedule, WhoisInfo, SUPPORTED_TAGS,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// External client document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientJson {
    pub name: String,

    #[serde(default)]
    pub ids: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub upstreams: Vec<String>,

    #[serde(default)]
    pub use_global_settings: bool,

    #[serde(default)]
    pub filtering_enabled: bool,

    #[serde(default)]
    pub parental_enabled: bool,

    #[serde(default)]
    pub safebrowsing_enabled: bool,

    /// Deprecated: use `safe_search`
    #[serde(default)]
    pub safesearch_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_search: Option<SafeSearchConfig>,

    #[serde(default)]
    pub use_global_blocked_services: bool,

    #[serde(default)]
    pub blocked_services: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_services_schedule: Option<WeeklySchedule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_querylog: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_statistics: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstreams_cache_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstreams_cache_size: Option<u32>,
}

impl ClientJson {
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.to_string(),
            ids: client.ids.iter().map(|id| id.to_string()).collect(),
            tags: client.tags.clone(),
            upstreams: client.upstreams.clone(),
            use_global_settings: !client.use_own_settings,
            filtering_enabled: client.filtering_enabled,
            parental_enabled: client.parental_enabled,
            safebrowsing_enabled: client.safe_browsing_enabled,
            safesearch_enabled: client.safe_search.enabled,
            safe_search: Some(client.safe_search),
            use_global_blocked_services: !client.use_own_blocked_services,
            blocked_services: client.blocked_services.ids.clone(),
            blocked_services_schedule: Some(client.blocked_services.schedule.clone()),
            ignore_querylog: Some(client.ignore_query_log),
            ignore_statistics: Some(client.ignore_statistics),
            upstreams_cache_enabled: Some(client.upstreams_cache_enabled),
            upstreams_cache_size: Some(client.upstreams_cache_size),
        }
    }

    /// Builds a domain client from the document.
    ///
    /// `prev` is the client being replaced, if any. Fields the document
    /// leaves out (`ignore_*`, the schedule) keep their previous values, and
    /// the upstream cache settings are always carried over from `prev` (off
    /// for a new client).
    pub fn into_client(self, prev: Option<&Client>) -> Result<Client, DomainError> {
        let ids = self
            .ids
            .iter()
            .map(|raw| Identifier::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let safe_search = match self.safe_search {
            Some(conf) => conf,
            None if self.safesearch_enabled => SafeSearchConfig::all_engines(),
            None => SafeSearchConfig::default(),
        };

        let schedule = self
            .blocked_services_schedule
            .or_else(|| prev.map(|p| p.blocked_services.schedule.clone()))
            .unwrap_or_else(WeeklySchedule::empty);
        let blocked_services = BlockedServicesConfig::new(schedule, self.blocked_services)?;

        let (upstreams_cache_enabled, upstreams_cache_size) = prev
            .map(|p| (p.upstreams_cache_enabled, p.upstreams_cache_size))
            .unwrap_or((false, 0));

        let client = Client {
            name: Arc::from(self.name.trim()),
            ids,
            tags: self.tags,
            upstreams: self.upstreams,
            use_own_settings: !self.use_global_settings,
            filtering_enabled: self.filtering_enabled,
            parental_enabled: self.parental_enabled,
            safe_browsing_enabled: self.safebrowsing_enabled,
            safe_search,
            use_own_blocked_services: !self.use_global_blocked_services,
            blocked_services,
            ignore_query_log: self
                .ignore_querylog
                .unwrap_or_else(|| prev.is_some_and(|p| p.ignore_query_log)),
            ignore_statistics: self
                .ignore_statistics
                .unwrap_or_else(|| prev.is_some_and(|p| p.ignore_statistics)),
            upstreams_cache_enabled,
            upstreams_cache_size,
        };

        client.validate()?;
        Ok(client)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeClientJson {
    pub ip: String,
    pub name: String,
    pub source: ClientSource,
    pub whois_info: WhoisInfo,
}

impl RuntimeClientJson {
    pub fn from_runtime(client: &RuntimeClient) -> Self {
        Self {
            ip: client.addr.to_string(),
            name: client.hostname.as_deref().unwrap_or_default().to_string(),
            source: client.source,
            whois_info: client.whois.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientListJson {
    pub clients: Vec<ClientJson>,
    pub auto_clients: Vec<RuntimeClientJson>,
    pub supported_tags: Vec<&'static str>,
}

impl ClientListJson {
    pub fn new(clients: Vec<ClientJson>, auto_clients: Vec<RuntimeClientJson>) -> Self {
        Self {
            clients,
            auto_clients,
            supported_tags: SUPPORTED_TAGS.to_vec(),
        }
    }
}

/// Request DTO for updating a client
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClientRequest {
    /// Current name of the client
    pub name: String,
    pub data: ClientJson,
}

/// Name, token and WHOIS data reported by find for a client that has no
/// persistent record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeMatchJson {
    pub name: String,
    pub ids: Vec<String>,
    pub whois_info: WhoisInfo,
}

impl RuntimeMatchJson {
    pub fn from_runtime(token: &str, client: &RuntimeClient) -> Self {
        Self {
            name: client.hostname.as_deref().unwrap_or_default().to_string(),
            ids: vec![token.to_string()],
            whois_info: client.whois.clone().unwrap_or_default(),
        }
    }

    /// Nothing matched the token.
    pub fn unknown(token: &str) -> Self {
        Self {
            name: String::new(),
            ids: vec![token.to_string()],
            whois_info: WhoisInfo::default(),
        }
    }
}

/// One entry of a find response
#[derive(Debug, Clone, Serialize)]
pub struct FoundClientJson {
    #[serde(flatten)]
    pub client: Option<ClientJson>,

    #[serde(flatten)]
    pub runtime: Option<RuntimeMatchJson>,

    pub disallowed: bool,

    /// Empty when the client is allowed, or when it is missing from a
    /// non-empty allowlist.
    pub disallowed_rule: String,
}
