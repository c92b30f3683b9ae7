use kestrel_dns_domain::{Client, RuntimeClient};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::{AccessDecision, AccessPolicy};
use crate::ClientRegistry;

/// What a control-layer token resolved to.
#[derive(Debug, Clone)]
pub enum FindOutcome {
    Persistent {
        client: Arc<Client>,
        access: AccessDecision,
    },
    Runtime {
        client: RuntimeClient,
        access: AccessDecision,
    },
    Unknown {
        access: AccessDecision,
    },
}

impl FindOutcome {
    pub fn access(&self) -> &AccessDecision {
        match self {
            Self::Persistent { access, .. }
            | Self::Runtime { access, .. }
            | Self::Unknown { access } => access,
        }
    }
}

/// Use case: resolve a token to a client and report whether it is blocked
/// by the access lists
pub struct FindClientUseCase {
    registry: Arc<ClientRegistry>,
    access: Arc<dyn AccessPolicy>,
}

impl FindClientUseCase {
    pub fn new(registry: Arc<ClientRegistry>, access: Arc<dyn AccessPolicy>) -> Self {
        Self { registry, access }
    }

    #[instrument(skip(self))]
    pub fn execute(&self, token: &str) -> FindOutcome {
        let token = token.trim();
        let addr = token.parse::<IpAddr>().ok();
        let client_id = if addr.is_none() { Some(token) } else { None };
        let access = self.access.check(addr, client_id);

        if let Some(client) = self.registry.find(token) {
            return FindOutcome::Persistent { client, access };
        }

        if let Some(client) = addr.and_then(|ip| self.registry.find_runtime(ip)) {
            return FindOutcome::Runtime { client, access };
        }

        debug!(token, "No client matches token");
        FindOutcome::Unknown { access }
    }
}
