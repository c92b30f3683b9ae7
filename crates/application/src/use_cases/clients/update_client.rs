use kestrel_dns_domain::{Client, DomainError};
use std::sync::Arc;
use tracing::instrument;

use crate::ClientRegistry;

pub struct UpdateClientUseCase {
    registry: Arc<ClientRegistry>,
}

impl UpdateClientUseCase {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Looks up the client currently called `name`, so callers can merge
    /// a partial document with its previous state.
    pub fn current(&self, name: &str) -> Result<Arc<Client>, DomainError> {
        self.registry
            .get(name)
            .ok_or_else(|| DomainError::NotFound(name.to_string()))
    }

    #[instrument(skip(self, client), fields(new_name = %client.name))]
    pub fn execute(&self, name: &str, client: Client) -> Result<Arc<Client>, DomainError> {
        self.registry.update(name, client)
    }
}
