use crate::ports::HostnameResolver;
use crate::ClientRegistry;
use kestrel_dns_domain::{DomainError, Observation};
use rustc_hash::FxHashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long an address without a PTR answer is left alone.
pub const DEFAULT_MISS_RETRY_AFTER: Duration = Duration::from_secs(30 * 60);

/// Use case: Resolve PTR names for runtime clients that have no hostname yet
///
/// Addresses that produced no name are remembered for `retry_after`, so a run
/// moves on to the next addresses instead of asking the same ones again.
pub struct SyncHostnamesUseCase {
    resolver: Arc<dyn HostnameResolver>,
    registry: Arc<ClientRegistry>,
    batch_size: usize,
    retry_after: Duration,
    misses: Mutex<FxHashMap<IpAddr, Instant>>,
}

impl SyncHostnamesUseCase {
    pub fn new(
        resolver: Arc<dyn HostnameResolver>,
        registry: Arc<ClientRegistry>,
        batch_size: usize,
    ) -> Self {
        Self {
            resolver,
            registry,
            batch_size,
            retry_after: DEFAULT_MISS_RETRY_AFTER,
            misses: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = retry_after;
        self
    }

    fn misses(&self) -> MutexGuard<'_, FxHashMap<IpAddr, Instant>> {
        self.misses.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lookups run without the registry lock; every answer is published
    /// through its own short `observe`.
    pub async fn execute(&self) -> Result<u64, DomainError> {
        self.execute_at(Instant::now()).await
    }

    pub async fn execute_at(&self, now: Instant) -> Result<u64, DomainError> {
        let candidates: Vec<IpAddr> = {
            let mut misses = self.misses();
            misses.retain(|_, missed_at| {
                now.saturating_duration_since(*missed_at) < self.retry_after
            });

            self.registry
                .list_at(now)
                .runtime
                .into_iter()
                .filter(|rc| rc.hostname.is_none() && !misses.contains_key(&rc.addr))
                .map(|rc| rc.addr)
                .take(self.batch_size)
                .collect()
        };

        debug!(count = candidates.len(), "Resolving hostnames for runtime clients");

        let mut resolved = 0u64;
        for ip in candidates {
            match self.resolver.resolve_hostname(ip).await {
                Ok(Some(hostname)) => {
                    if self.registry.observe_at(Observation::reverse_dns(ip, hostname), now) {
                        resolved += 1;
                    }
                }
                Ok(None) => {
                    debug!(ip = %ip, "No PTR record");
                    self.misses().insert(ip, now);
                }
                Err(e) => {
                    warn!(ip = %ip, error = %e, "Hostname resolution failed");
                    self.misses().insert(ip, now);
                }
            }
        }

        info!(resolved, "Hostnames synchronized");
        Ok(resolved)
    }
}
