use async_trait::async_trait;
use kestrel_dns_domain::{DomainError, HardwareAddr};
use std::net::IpAddr;

/// One active lease handed out by the DHCP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpLease {
    pub addr: IpAddr,
    pub hardware: Option<HardwareAddr>,
    pub hostname: Option<String>,
}

#[async_trait]
pub trait LeaseSource: Send + Sync {
    /// Read every currently active lease
    async fn read_leases(&self) -> Result<Vec<DhcpLease>, DomainError>;
}
