use crate::{BlockedServicesConfig, DomainError, HardwareAddr, Identifier};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;

/// Tags an administrator may attach to a client.
pub const SUPPORTED_TAGS: &[&str] = &[
    "device_audio",
    "device_camera",
    "device_gameconsole",
    "device_laptop",
    "device_nas",
    "device_other",
    "device_pc",
    "device_phone",
    "device_printer",
    "device_securityalarm",
    "device_tablet",
    "device_tv",
    "os_android",
    "os_ios",
    "os_linux",
    "os_macos",
    "os_other",
    "os_windows",
    "user_admin",
    "user_child",
    "user_regular",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SafeSearchConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub bing: bool,
    #[serde(default)]
    pub duckduckgo: bool,
    #[serde(default)]
    pub google: bool,
    #[serde(default)]
    pub pixabay: bool,
    #[serde(default)]
    pub yandex: bool,
    #[serde(default)]
    pub youtube: bool,
}

impl SafeSearchConfig {
    /// Safe search turned on for every supported engine.
    pub fn all_engines() -> Self {
        Self {
            enabled: true,
            bing: true,
            duckduckgo: true,
            google: true,
            pixabay: true,
            yandex: true,
            youtube: true,
        }
    }
}

/// A persistent, administrator-defined client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub name: Arc<str>,
    pub ids: Vec<Identifier>,
    pub tags: Vec<String>,
    pub upstreams: Vec<String>,

    pub use_own_settings: bool,
    pub filtering_enabled: bool,
    pub parental_enabled: bool,
    pub safe_browsing_enabled: bool,
    pub safe_search: SafeSearchConfig,

    pub use_own_blocked_services: bool,
    pub blocked_services: BlockedServicesConfig,

    pub ignore_query_log: bool,
    pub ignore_statistics: bool,

    pub upstreams_cache_enabled: bool,
    pub upstreams_cache_size: u32,
}

impl Client {
    pub fn new(name: &str, ids: Vec<Identifier>) -> Self {
        Self {
            name: Arc::from(name),
            ids,
            tags: Vec::new(),
            upstreams: Vec::new(),
            use_own_settings: false,
            filtering_enabled: false,
            parental_enabled: false,
            safe_browsing_enabled: false,
            safe_search: SafeSearchConfig::default(),
            use_own_blocked_services: false,
            blocked_services: BlockedServicesConfig::default(),
            ignore_query_log: false,
            ignore_statistics: false,
            upstreams_cache_enabled: false,
            upstreams_cache_size: 0,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidClient(
                "client name cannot be empty".to_string(),
            ));
        }

        if self.ids.is_empty() {
            return Err(DomainError::InvalidClient(format!(
                "client {} has no identifiers",
                self.name
            )));
        }

        let mut seen = FxHashSet::default();
        for id in &self.ids {
            if !seen.insert(id) {
                return Err(DomainError::InvalidClient(format!(
                    "identifier {id} is listed twice for client {}",
                    self.name
                )));
            }
        }

        if let Some(tag) = self.tags.iter().find(|t| !SUPPORTED_TAGS.contains(&t.as_str())) {
            return Err(DomainError::InvalidTag(tag.clone()));
        }

        for upstream in &self.upstreams {
            if upstream.is_empty() || upstream.trim() != upstream {
                return Err(DomainError::InvalidClient(format!(
                    "invalid upstream {upstream:?} for client {}",
                    self.name
                )));
            }
        }

        self.blocked_services.validate()
    }

    /// Identifiers that at most one client may own.
    pub fn exclusive_ids(&self) -> impl Iterator<Item = &Identifier> {
        self.ids.iter().filter(|id| id.is_exclusive())
    }

    /// Whether any identifier of this client covers the given device.
    pub fn claims(&self, addr: IpAddr, hardware: Option<HardwareAddr>) -> bool {
        self.ids.iter().any(|id| match id {
            Identifier::Exact(ip) => *ip == addr,
            Identifier::Range(network) => network.contains(addr),
            Identifier::Hardware(mac) => hardware == Some(*mac),
            Identifier::ClientId(_) => false,
        })
    }
}
