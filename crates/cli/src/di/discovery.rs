use anyhow::Context;
use kestrel_dns_application::use_cases::{
    SweepRuntimeClientsUseCase, SyncArpCacheUseCase, SyncDhcpLeasesUseCase, SyncHostnamesUseCase,
};
use kestrel_dns_application::ClientRegistry;
use kestrel_dns_domain::Config;
use kestrel_dns_infrastructure::system::{DnsmasqLeaseReader, LinuxArpReader, PtrHostnameResolver};
use kestrel_dns_jobs::{ClientSyncJob, JobRunner, RuntimeSweepJob};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Wires every enabled discovery source plus the runtime sweep.
pub fn build_job_runner(
    config: &Config,
    registry: &Arc<ClientRegistry>,
    shutdown: &CancellationToken,
) -> anyhow::Result<JobRunner> {
    let discovery = &config.discovery;
    let mut client_sync = ClientSyncJob::new().with_cancellation(shutdown.clone());

    if discovery.arp_enabled {
        let reader = Arc::new(LinuxArpReader::with_path(discovery.arp_path.clone()));
        let use_case = Arc::new(SyncArpCacheUseCase::new(reader, registry.clone()));
        client_sync = client_sync.with_arp(use_case, discovery.arp_interval_secs);
    }

    if let Some(path) = &discovery.dhcp_leases_path {
        let reader = Arc::new(DnsmasqLeaseReader::new(path.clone()));
        let use_case = Arc::new(SyncDhcpLeasesUseCase::new(reader, registry.clone()));
        client_sync = client_sync.with_dhcp(use_case, discovery.dhcp_interval_secs);
    }

    if let (true, Some(server)) = (discovery.rdns_enabled, &discovery.rdns_server) {
        let server: SocketAddr = server
            .parse()
            .with_context(|| format!("Invalid rdns_server address {server:?}"))?;
        let resolver = Arc::new(PtrHostnameResolver::new(
            server,
            Duration::from_millis(discovery.rdns_timeout_ms),
        ));
        let use_case = Arc::new(SyncHostnamesUseCase::new(
            resolver,
            registry.clone(),
            discovery.rdns_batch,
        ));
        client_sync = client_sync.with_hostnames(use_case, discovery.rdns_interval_secs);
    }

    info!(sources = client_sync.source_count(), "Client discovery configured");

    let sweep = Arc::new(SweepRuntimeClientsUseCase::new(
        registry.clone(),
        config.clients.sweep_batch_size,
    ));
    let runtime_sweep = RuntimeSweepJob::new(sweep)
        .with_interval(config.clients.sweep_interval_secs)
        .with_cancellation(shutdown.clone());

    Ok(JobRunner::new()
        .with_client_sync(client_sync)
        .with_runtime_sweep(runtime_sweep))
}
