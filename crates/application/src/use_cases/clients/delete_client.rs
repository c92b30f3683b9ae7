use kestrel_dns_domain::DomainError;
use std::sync::Arc;
use tracing::instrument;

use crate::ClientRegistry;

pub struct DeleteClientUseCase {
    registry: Arc<ClientRegistry>,
}

impl DeleteClientUseCase {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    #[instrument(skip(self))]
    pub fn execute(&self, name: &str) -> Result<(), DomainError> {
        self.registry.del(name).map(|_| ())
    }
}
