use crate::ClientRecord;
use serde::{Deserialize, Serialize};

/// Client registry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientsConfig {
    /// Lifetime of a passively discovered client without a fresh
    /// observation (default: 3600)
    #[serde(default = "default_runtime_ttl_secs")]
    pub runtime_ttl_secs: u64,

    /// How often expired runtime clients are swept (default: 300)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Maximum removals per exclusive lock during a sweep (default: 256)
    #[serde(default = "default_sweep_batch_size")]
    pub sweep_batch_size: usize,

    /// Administrator-defined clients
    #[serde(default)]
    pub persistent: Vec<ClientRecord>,
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            runtime_ttl_secs: default_runtime_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            sweep_batch_size: default_sweep_batch_size(),
            persistent: vec![],
        }
    }
}

fn default_runtime_ttl_secs() -> u64 {
    3600
}

fn default_sweep_interval_secs() -> u64 {
    300
}

fn default_sweep_batch_size() -> usize {
    256
}
