#![allow(dead_code)]

use async_trait::async_trait;
use kestrel_dns_application::ports::{
    AccessDecision, AccessPolicy, ArpReader, ArpTable, DhcpLease, HostnameResolver, LeaseSource,
    WhoisResolver,
};
use kestrel_dns_domain::{DomainError, WhoisInfo};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock ArpReader
// ============================================================================

pub struct MockArpReader {
    table: Arc<RwLock<ArpTable>>,
    call_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockArpReader {
    pub fn new() -> Self {
        Self::with_entries(vec![])
    }

    pub fn with_entries(entries: Vec<(&str, &str)>) -> Self {
        let mut table = HashMap::new();
        for (ip, mac) in entries {
            table.insert(ip.parse().unwrap(), mac.parse().unwrap());
        }
        Self {
            table: Arc::new(RwLock::new(table)),
            call_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl ArpReader for MockArpReader {
    async fn read_arp_table(&self) -> Result<ArpTable, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::IoError("ARP read failed".to_string()));
        }
        Ok(self.table.read().await.clone())
    }
}

// ============================================================================
// Mock LeaseSource
// ============================================================================

pub struct MockLeaseSource {
    leases: Arc<RwLock<Vec<DhcpLease>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockLeaseSource {
    pub fn with_leases(entries: Vec<(&str, Option<&str>, Option<&str>)>) -> Self {
        let leases = entries
            .into_iter()
            .map(|(ip, mac, hostname)| DhcpLease {
                addr: ip.parse().unwrap(),
                hardware: mac.map(|m| m.parse().unwrap()),
                hostname: hostname.map(|h| h.to_string()),
            })
            .collect();
        Self {
            leases: Arc::new(RwLock::new(leases)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl LeaseSource for MockLeaseSource {
    async fn read_leases(&self) -> Result<Vec<DhcpLease>, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::IoError("lease file unreadable".to_string()));
        }
        Ok(self.leases.read().await.clone())
    }
}

// ============================================================================
// Mock HostnameResolver
// ============================================================================

pub struct MockHostnameResolver {
    responses: Arc<RwLock<HashMap<IpAddr, Option<String>>>>,
    failing: Arc<RwLock<HashSet<IpAddr>>>,
    call_count: Arc<AtomicU64>,
}

impl MockHostnameResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn set_response(&self, ip: &str, hostname: Option<&str>) {
        self.responses
            .write()
            .await
            .insert(ip.parse().unwrap(), hostname.map(|h| h.to_string()));
    }

    pub async fn fail_for(&self, ip: &str) {
        self.failing.write().await.insert(ip.parse().unwrap());
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl HostnameResolver for MockHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.failing.read().await.contains(&ip) {
            return Err(DomainError::IoError("PTR lookup timed out".to_string()));
        }
        Ok(self.responses.read().await.get(&ip).cloned().flatten())
    }
}

// ============================================================================
// Mock WhoisResolver
// ============================================================================

pub struct MockWhoisResolver {
    responses: Arc<RwLock<HashMap<IpAddr, WhoisInfo>>>,
    call_count: Arc<AtomicU64>,
}

impl MockWhoisResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn set_response(&self, ip: &str, country: &str, orgname: &str) {
        self.responses.write().await.insert(
            ip.parse().unwrap(),
            WhoisInfo {
                city: None,
                country: Some(country.to_string()),
                orgname: Some(orgname.to_string()),
            },
        );
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl WhoisResolver for MockWhoisResolver {
    async fn lookup(&self, ip: IpAddr) -> Result<WhoisInfo, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.responses
            .read()
            .await
            .get(&ip)
            .cloned()
            .ok_or_else(|| DomainError::IoError(format!("no WHOIS data for {ip}")))
    }
}

// ============================================================================
// Mock AccessPolicy
// ============================================================================

/// Blocks exactly the listed addresses and client ids.
pub struct MockAccessPolicy {
    blocked: HashSet<String>,
    call_count: AtomicU64,
}

impl MockAccessPolicy {
    pub fn allow_all() -> Self {
        Self::blocking(&[])
    }

    pub fn blocking(entries: &[&str]) -> Self {
        Self {
            blocked: entries.iter().map(|s| s.to_string()).collect(),
            call_count: AtomicU64::new(0),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl AccessPolicy for MockAccessPolicy {
    fn check(&self, addr: Option<IpAddr>, client_id: Option<&str>) -> AccessDecision {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let hit = addr
            .map(|ip| ip.to_string())
            .into_iter()
            .chain(client_id.map(str::to_string))
            .find(|key| self.blocked.contains(key));
        match hit {
            Some(rule) => AccessDecision::disallowed(Some(rule)),
            None => AccessDecision::allowed(),
        }
    }
}
