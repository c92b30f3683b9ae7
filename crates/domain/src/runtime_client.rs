use crate::HardwareAddr;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

/// Where a runtime client observation came from.
///
/// Variants are declared from weakest to strongest hostname authority, so the
/// derived ordering is the priority used when sources disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientSource {
    Whois,
    Arp,
    #[serde(rename = "rdns")]
    ReverseDns,
    Dhcp,
}

impl ClientSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whois => "whois",
            Self::Arp => "arp",
            Self::ReverseDns => "rdns",
            Self::Dhcp => "dhcp",
        }
    }

    /// WHOIS only ever annotates an address; it never names it.
    pub fn assigns_hostname(&self) -> bool {
        !matches!(self, Self::Whois)
    }
}

/// Filtered WHOIS data for an address. Every field is optional; a failed
/// lookup leaves the whole value empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WhoisInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orgname: Option<String>,
}

impl WhoisInfo {
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.country.is_none() && self.orgname.is_none()
    }
}

/// A passively discovered device with no configuration record behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeClient {
    pub addr: IpAddr,
    pub hostname: Option<Arc<str>>,
    pub source: ClientSource,
    pub hardware: Option<HardwareAddr>,
    pub whois: Option<WhoisInfo>,
    pub last_seen: Instant,
}

impl RuntimeClient {
    pub fn new(addr: IpAddr, source: ClientSource, now: Instant) -> Self {
        Self {
            addr,
            hostname: None,
            source,
            hardware: None,
            whois: None,
            last_seen: now,
        }
    }
}

/// A single report from the discovery feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub addr: IpAddr,
    pub source: ClientSource,
    pub hostname: Option<String>,
    pub hardware: Option<HardwareAddr>,
    pub whois: Option<WhoisInfo>,
}

impl Observation {
    pub fn arp(addr: IpAddr, hardware: HardwareAddr) -> Self {
        Self {
            addr,
            source: ClientSource::Arp,
            hostname: None,
            hardware: Some(hardware),
            whois: None,
        }
    }

    pub fn dhcp(addr: IpAddr, hostname: Option<String>, hardware: Option<HardwareAddr>) -> Self {
        Self {
            addr,
            source: ClientSource::Dhcp,
            hostname: hostname.filter(|h| !h.is_empty()),
            hardware,
            whois: None,
        }
    }

    pub fn reverse_dns(addr: IpAddr, hostname: String) -> Self {
        Self {
            addr,
            source: ClientSource::ReverseDns,
            hostname: Some(hostname).filter(|h| !h.is_empty()),
            hardware: None,
            whois: None,
        }
    }

    pub fn whois(addr: IpAddr, info: WhoisInfo) -> Self {
        Self {
            addr,
            source: ClientSource::Whois,
            hostname: None,
            hardware: None,
            whois: Some(info),
        }
    }
}
