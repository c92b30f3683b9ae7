use crate::ports::ArpReader;
use crate::ClientRegistry;
use kestrel_dns_domain::{DomainError, Observation};
use std::sync::Arc;
use tracing::{debug, info};

/// Use case: Publish the kernel ARP table as runtime client observations
/// Should be run periodically (e.g., every 60 seconds)
pub struct SyncArpCacheUseCase {
    arp_reader: Arc<dyn ArpReader>,
    registry: Arc<ClientRegistry>,
}

impl SyncArpCacheUseCase {
    pub fn new(arp_reader: Arc<dyn ArpReader>, registry: Arc<ClientRegistry>) -> Self {
        Self {
            arp_reader,
            registry,
        }
    }

    /// Returns the number of observations the registry accepted.
    pub async fn execute(&self) -> Result<u64, DomainError> {
        debug!("Reading ARP cache");

        let arp_table = self.arp_reader.read_arp_table().await?;
        let count = arp_table.len();

        debug!(entries = count, "ARP table read successfully");

        let accepted = arp_table
            .into_iter()
            .filter(|(ip, mac)| self.registry.observe(Observation::arp(*ip, *mac)))
            .count() as u64;

        info!(total = count, accepted, "ARP cache synchronized");
        Ok(accepted)
    }
}
