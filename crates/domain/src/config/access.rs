use serde::{Deserialize, Serialize};

/// Client access lists
///
/// Entries are addresses, CIDR ranges or client ids. When
/// `allowed_clients` is non-empty, every client not on it is disallowed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub allowed_clients: Vec<String>,

    #[serde(default)]
    pub disallowed_clients: Vec<String>,
}
