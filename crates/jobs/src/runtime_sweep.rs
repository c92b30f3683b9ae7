use kestrel_dns_application::use_cases::SweepRuntimeClientsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodically removes runtime clients that outlived their TTL.
pub struct RuntimeSweepJob {
    sweep: Arc<SweepRuntimeClientsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl RuntimeSweepJob {
    pub fn new(sweep: Arc<SweepRuntimeClientsUseCase>) -> Self {
        Self {
            sweep,
            interval_secs: 300,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting runtime client sweep job");

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("RuntimeSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = self.sweep.execute();
                        debug!(removed, "Runtime client sweep completed");
                    }
                }
            }
        });
    }
}
