use kestrel_dns_domain::{Client, DomainError};
use std::sync::Arc;
use tracing::instrument;

use crate::ClientRegistry;

pub struct AddClientUseCase {
    registry: Arc<ClientRegistry>,
}

impl AddClientUseCase {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    #[instrument(skip(self, client), fields(name = %client.name))]
    pub fn execute(&self, client: Client) -> Result<Arc<Client>, DomainError> {
        self.registry.add(client)
    }
}
