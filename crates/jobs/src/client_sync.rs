use kestrel_dns_application::use_cases::{
    EnrichWhoisUseCase, SyncArpCacheUseCase, SyncDhcpLeasesUseCase, SyncHostnamesUseCase,
};
use kestrel_dns_domain::DomainError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Periodic discovery feed: every configured source runs on its own
/// interval and publishes into the client registry.
pub struct ClientSyncJob {
    sync_arp: Option<Arc<SyncArpCacheUseCase>>,
    sync_dhcp: Option<Arc<SyncDhcpLeasesUseCase>>,
    sync_hostnames: Option<Arc<SyncHostnamesUseCase>>,
    enrich_whois: Option<Arc<EnrichWhoisUseCase>>,
    arp_interval_secs: u64,
    dhcp_interval_secs: u64,
    hostname_interval_secs: u64,
    whois_interval_secs: u64,
    shutdown: CancellationToken,
}

impl ClientSyncJob {
    pub fn new() -> Self {
        Self {
            sync_arp: None,
            sync_dhcp: None,
            sync_hostnames: None,
            enrich_whois: None,
            arp_interval_secs: 60,
            dhcp_interval_secs: 60,
            hostname_interval_secs: 300,
            whois_interval_secs: 300,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_arp(mut self, use_case: Arc<SyncArpCacheUseCase>, interval_secs: u64) -> Self {
        self.sync_arp = Some(use_case);
        self.arp_interval_secs = interval_secs;
        self
    }

    pub fn with_dhcp(mut self, use_case: Arc<SyncDhcpLeasesUseCase>, interval_secs: u64) -> Self {
        self.sync_dhcp = Some(use_case);
        self.dhcp_interval_secs = interval_secs;
        self
    }

    pub fn with_hostnames(
        mut self,
        use_case: Arc<SyncHostnamesUseCase>,
        interval_secs: u64,
    ) -> Self {
        self.sync_hostnames = Some(use_case);
        self.hostname_interval_secs = interval_secs;
        self
    }

    pub fn with_whois(mut self, use_case: Arc<EnrichWhoisUseCase>, interval_secs: u64) -> Self {
        self.enrich_whois = Some(use_case);
        self.whois_interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Number of discovery sources that will run.
    pub fn source_count(&self) -> usize {
        [
            self.sync_arp.is_some(),
            self.sync_dhcp.is_some(),
            self.sync_hostnames.is_some(),
            self.enrich_whois.is_some(),
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }

    pub async fn start(self: Arc<Self>) {
        info!(sources = self.source_count(), "Starting client sync background jobs");

        if let Some(use_case) = self.sync_arp.clone() {
            spawn_periodic("arp", self.arp_interval_secs, self.shutdown.clone(), move || {
                let use_case = Arc::clone(&use_case);
                async move { use_case.execute().await }
            });
        }

        if let Some(use_case) = self.sync_dhcp.clone() {
            spawn_periodic("dhcp", self.dhcp_interval_secs, self.shutdown.clone(), move || {
                let use_case = Arc::clone(&use_case);
                async move { use_case.execute().await }
            });
        }

        if let Some(use_case) = self.sync_hostnames.clone() {
            spawn_periodic(
                "hostnames",
                self.hostname_interval_secs,
                self.shutdown.clone(),
                move || {
                    let use_case = Arc::clone(&use_case);
                    async move { use_case.execute().await }
                },
            );
        }

        if let Some(use_case) = self.enrich_whois.clone() {
            spawn_periodic("whois", self.whois_interval_secs, self.shutdown.clone(), move || {
                let use_case = Arc::clone(&use_case);
                async move { use_case.execute().await }
            });
        }
    }
}

impl Default for ClientSyncJob {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_periodic<F, Fut>(
    source: &'static str,
    interval_secs: u64,
    shutdown: CancellationToken,
    task: F,
) where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<u64, DomainError>> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(source, "ClientSyncJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = task().await {
                        error!(source, error = %e, "Client discovery sync failed");
                    }
                }
            }
        }
    });
}
