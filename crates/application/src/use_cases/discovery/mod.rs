pub mod enrich_whois;
pub mod sweep_runtime_clients;
pub mod sync_arp_cache;
pub mod sync_dhcp_leases;
pub mod sync_hostnames;

pub use enrich_whois::EnrichWhoisUseCase;
pub use sweep_runtime_clients::SweepRuntimeClientsUseCase;
pub use sync_arp_cache::SyncArpCacheUseCase;
pub use sync_dhcp_leases::SyncDhcpLeasesUseCase;
pub use sync_hostnames::SyncHostnamesUseCase;
