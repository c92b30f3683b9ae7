use std::sync::Arc;

use crate::{ClientRegistry, RegistrySnapshot};

pub struct GetClientsUseCase {
    registry: Arc<ClientRegistry>,
}

impl GetClientsUseCase {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(&self) -> RegistrySnapshot {
        self.registry.list()
    }
}
