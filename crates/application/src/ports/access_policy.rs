use std::net::IpAddr;

/// Outcome of the allow/deny list check for a client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessDecision {
    pub disallowed: bool,
    /// The list entry that caused the block, when there is one.
    pub rule: Option<String>,
}

impl AccessDecision {
    pub fn allowed() -> Self {
        Self::default()
    }

    pub fn disallowed(rule: Option<String>) -> Self {
        Self {
            disallowed: true,
            rule,
        }
    }
}

/// Disallow check consulted on every query and by the control layer.
///
/// Called once per query; implementations must not block.
pub trait AccessPolicy: Send + Sync {
    fn check(&self, addr: Option<IpAddr>, client_id: Option<&str>) -> AccessDecision;
}
