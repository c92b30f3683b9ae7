use crate::ClientRegistry;
use std::sync::Arc;
use tracing::{info, instrument};

/// Use case: Remove runtime clients that outlived their TTL
pub struct SweepRuntimeClientsUseCase {
    registry: Arc<ClientRegistry>,
    batch_size: usize,
}

impl SweepRuntimeClientsUseCase {
    pub fn new(registry: Arc<ClientRegistry>, batch_size: usize) -> Self {
        Self {
            registry,
            batch_size,
        }
    }

    #[instrument(skip(self))]
    pub fn execute(&self) -> usize {
        let removed = self.registry.sweep_expired(self.batch_size);
        if removed > 0 {
            info!(removed, "Expired runtime clients removed");
        }
        removed
    }
}
