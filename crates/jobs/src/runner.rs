use crate::{ClientSyncJob, RuntimeSweepJob};
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// JobRunner::new()
///     .with_client_sync(ClientSyncJob::new().with_arp(sync_arp, 60))
///     .with_runtime_sweep(RuntimeSweepJob::new(sweep).with_interval(300))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    client_sync: Option<ClientSyncJob>,
    runtime_sweep: Option<RuntimeSweepJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            client_sync: None,
            runtime_sweep: None,
        }
    }

    pub fn with_client_sync(mut self, job: ClientSyncJob) -> Self {
        self.client_sync = Some(job);
        self
    }

    pub fn with_runtime_sweep(mut self, job: RuntimeSweepJob) -> Self {
        self.runtime_sweep = Some(job);
        self
    }

    /// Start all registered background jobs.
    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.client_sync {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.runtime_sweep {
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
