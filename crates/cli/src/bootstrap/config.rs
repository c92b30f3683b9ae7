use kestrel_dns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Called once logging is up.
pub fn log_config_summary(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        persistent_clients = config.clients.persistent.len(),
        runtime_ttl_secs = config.clients.runtime_ttl_secs,
        arp_enabled = config.discovery.arp_enabled,
        dhcp_leases = config.discovery.dhcp_leases_path.as_deref().unwrap_or("disabled"),
        rdns_server = config.discovery.rdns_server.as_deref().unwrap_or("disabled"),
        "Configuration loaded"
    );
}
