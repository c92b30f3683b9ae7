use serde::{Deserialize, Serialize};

/// Passive client discovery
///
/// Every source feeds the runtime client cache; none of them is required.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_true")]
    pub arp_enabled: bool,

    #[serde(default = "default_arp_interval_secs")]
    pub arp_interval_secs: u64,

    #[serde(default = "default_arp_path")]
    pub arp_path: String,

    /// dnsmasq-style lease file; DHCP discovery is off when unset
    #[serde(default)]
    pub dhcp_leases_path: Option<String>,

    #[serde(default = "default_dhcp_interval_secs")]
    pub dhcp_interval_secs: u64,

    #[serde(default = "default_true")]
    pub rdns_enabled: bool,

    /// Resolver used for PTR lookups (e.g. "192.168.1.1:53");
    /// reverse DNS is off when unset
    #[serde(default)]
    pub rdns_server: Option<String>,

    #[serde(default = "default_rdns_interval_secs")]
    pub rdns_interval_secs: u64,

    /// Addresses resolved per run
    #[serde(default = "default_rdns_batch")]
    pub rdns_batch: usize,

    #[serde(default = "default_rdns_timeout_ms")]
    pub rdns_timeout_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            arp_enabled: true,
            arp_interval_secs: default_arp_interval_secs(),
            arp_path: default_arp_path(),
            dhcp_leases_path: None,
            dhcp_interval_secs: default_dhcp_interval_secs(),
            rdns_enabled: true,
            rdns_server: None,
            rdns_interval_secs: default_rdns_interval_secs(),
            rdns_batch: default_rdns_batch(),
            rdns_timeout_ms: default_rdns_timeout_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_arp_interval_secs() -> u64 {
    60
}

fn default_arp_path() -> String {
    "/proc/net/arp".to_string()
}

fn default_dhcp_interval_secs() -> u64 {
    60
}

fn default_rdns_interval_secs() -> u64 {
    300
}

fn default_rdns_batch() -> usize {
    50
}

fn default_rdns_timeout_ms() -> u64 {
    2000
}
