use async_trait::async_trait;
use kestrel_dns_domain::{DomainError, HardwareAddr};
use std::collections::HashMap;
use std::net::IpAddr;

/// Address to hardware address, as reported by the kernel neighbour table.
pub type ArpTable = HashMap<IpAddr, HardwareAddr>;

#[async_trait]
pub trait ArpReader: Send + Sync {
    /// Read the complete ARP table
    async fn read_arp_table(&self) -> Result<ArpTable, DomainError>;
}
