use crate::ports::WhoisResolver;
use crate::ClientRegistry;
use kestrel_dns_domain::{DomainError, Observation, WhoisInfo};
use std::sync::Arc;
use tracing::{debug, info};

/// Use case: Attach WHOIS metadata to runtime clients that have none
///
/// A failed lookup stores empty metadata so the address is not retried
/// until its entry expires.
pub struct EnrichWhoisUseCase {
    resolver: Arc<dyn WhoisResolver>,
    registry: Arc<ClientRegistry>,
    batch_size: usize,
}

impl EnrichWhoisUseCase {
    pub fn new(
        resolver: Arc<dyn WhoisResolver>,
        registry: Arc<ClientRegistry>,
        batch_size: usize,
    ) -> Self {
        Self {
            resolver,
            registry,
            batch_size,
        }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        let candidates: Vec<_> = self
            .registry
            .list()
            .runtime
            .into_iter()
            .filter(|rc| rc.whois.is_none())
            .map(|rc| rc.addr)
            .take(self.batch_size)
            .collect();

        let mut enriched = 0u64;
        for ip in candidates {
            let info = match self.resolver.lookup(ip).await {
                Ok(info) => info,
                Err(e) => {
                    debug!(ip = %ip, error = %e, "WHOIS lookup failed");
                    WhoisInfo::default()
                }
            };

            if self.registry.observe(Observation::whois(ip, info)) {
                enriched += 1;
            }
        }

        info!(enriched, "WHOIS metadata synchronized");
        Ok(enriched)
    }
}
