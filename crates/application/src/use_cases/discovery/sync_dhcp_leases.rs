use crate::ports::LeaseSource;
use crate::ClientRegistry;
use kestrel_dns_domain::{DomainError, Observation};
use std::sync::Arc;
use tracing::{debug, info};

/// Use case: Publish active DHCP leases as runtime client observations
pub struct SyncDhcpLeasesUseCase {
    lease_source: Arc<dyn LeaseSource>,
    registry: Arc<ClientRegistry>,
}

impl SyncDhcpLeasesUseCase {
    pub fn new(lease_source: Arc<dyn LeaseSource>, registry: Arc<ClientRegistry>) -> Self {
        Self {
            lease_source,
            registry,
        }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        let leases = self.lease_source.read_leases().await?;
        let count = leases.len();

        debug!(leases = count, "DHCP leases read");

        let accepted = leases
            .into_iter()
            .filter(|lease| {
                self.registry.observe(Observation::dhcp(
                    lease.addr,
                    lease.hostname.clone(),
                    lease.hardware,
                ))
            })
            .count() as u64;

        info!(total = count, accepted, "DHCP leases synchronized");
        Ok(accepted)
    }
}
