//! # Kestrel DNS client registry
//!
//! Loads persistent clients, starts passive discovery and keeps the runtime
//! client cache fresh until interrupted.

mod bootstrap;
mod di;

use clap::Parser;
use kestrel_dns_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::info;

use bootstrap::{init_logging, load_config, log_config_summary};
use di::{build_job_runner, RegistryServices};

#[derive(Parser)]
#[command(name = "kestrel-dns")]
#[command(version)]
#[command(about = "Client identity and policy registry for DNS filtering")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Lifetime of discovered runtime clients, in seconds
    #[arg(long)]
    runtime_ttl_secs: Option<u64>,

    /// ARP table to read
    #[arg(long)]
    arp_path: Option<String>,

    /// dnsmasq lease file; enables DHCP discovery
    #[arg(long)]
    dhcp_leases_path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        log_level: cli.log_level,
        runtime_ttl_secs: cli.runtime_ttl_secs,
        arp_path: cli.arp_path,
        dhcp_leases_path: cli.dhcp_leases_path,
    };

    let config = load_config(cli.config.as_deref(), overrides)?;
    init_logging(&config);
    log_config_summary(&config, cli.config.as_deref());

    let services = RegistryServices::new(&config)?;

    let shutdown = CancellationToken::new();
    build_job_runner(&config, &services.registry, &shutdown)?
        .start()
        .await;

    let listing = services.clients.list();
    info!(
        persistent = listing.clients.len(),
        runtime = listing.auto_clients.len(),
        "Client registry ready, press Ctrl+C to stop"
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    shutdown.cancel();

    info!(
        persistent = services.registry.len(),
        runtime = services.registry.runtime_len(),
        "Client registry stopped"
    );

    Ok(())
}
