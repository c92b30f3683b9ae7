use anyhow::Context;
use kestrel_dns_api::ClientsController;
use kestrel_dns_application::ports::AccessPolicy;
use kestrel_dns_application::ClientRegistry;
use kestrel_dns_domain::Config;
use kestrel_dns_infrastructure::access::StaticAccessList;
use std::sync::Arc;
use std::time::Duration;

pub struct RegistryServices {
    pub registry: Arc<ClientRegistry>,
    pub clients: ClientsController,
}

impl RegistryServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let registry = Arc::new(ClientRegistry::new(Duration::from_secs(
            config.clients.runtime_ttl_secs,
        )));

        registry
            .import(config.persistent_clients()?)
            .context("Failed to import persistent clients")?;

        let access: Arc<dyn AccessPolicy> = Arc::new(
            StaticAccessList::from_config(&config.access)
                .context("Invalid access list configuration")?,
        );

        let clients = ClientsController::new(registry.clone(), access);

        Ok(Self { registry, clients })
    }
}
