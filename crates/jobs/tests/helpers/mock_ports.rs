use async_trait::async_trait;
use kestrel_dns_application::ports::{ArpReader, ArpTable, DhcpLease, LeaseSource};
use kestrel_dns_domain::DomainError;
use std::collections::HashMap;
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
    leases: Vec<DhcpLease>,
    call_count: Arc<AtomicU64>,
}

impl MockLeaseSource {
    pub fn with_lease(ip: &str, mac: &str, hostname: &str) -> Self {
        Self {
            leases: vec![DhcpLease {
                addr: ip.parse().unwrap(),
                hardware: Some(mac.parse().unwrap()),
                hostname: Some(hostname.to_string()),
            }],
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LeaseSource for MockLeaseSource {
    async fn read_leases(&self) -> Result<Vec<DhcpLease>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.leases.clone())
    }
}
