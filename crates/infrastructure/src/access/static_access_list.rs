use ipnetwork::IpNetwork;
use kestrel_dns_application::ports::{AccessDecision, AccessPolicy};
use kestrel_dns_domain::config::AccessConfig;
use kestrel_dns_domain::{DomainError, Identifier};
use rustc_hash::{FxHashMap, FxHashSet};
use std::net::IpAddr;

/// One parsed side of the access configuration.
#[derive(Debug, Default)]
struct RuleSet {
    addrs: FxHashMap<IpAddr, String>,
    networks: Vec<(IpNetwork, String)>,
    client_ids: FxHashSet<String>,
}

impl RuleSet {
    fn parse(entries: &[String]) -> Result<Self, DomainError> {
        let mut rules = Self::default();

        for raw in entries {
            let entry = raw.trim();
            match Identifier::parse(entry)? {
                Identifier::Exact(ip) => {
                    rules.addrs.insert(ip, entry.to_string());
                }
                Identifier::Range(network) => rules.networks.push((network, entry.to_string())),
                Identifier::ClientId(id) => {
                    rules.client_ids.insert(id.to_string());
                }
                Identifier::Hardware(_) => {
                    return Err(DomainError::InvalidIdentifier(format!(
                        "hardware addresses are not supported in access lists: {entry}"
                    )));
                }
            }
        }

        Ok(rules)
    }

    fn is_empty(&self) -> bool {
        self.addrs.is_empty() && self.networks.is_empty() && self.client_ids.is_empty()
    }

    /// The entry matching the client, if any.
    fn matching(&self, addr: Option<IpAddr>, client_id: Option<&str>) -> Option<&str> {
        if let Some(id) = client_id.and_then(|id| self.client_ids.get(id)) {
            return Some(id.as_str());
        }

        let ip = addr?;
        if let Some(rule) = self.addrs.get(&ip) {
            return Some(rule.as_str());
        }

        self.networks
            .iter()
            .find(|(network, _)| network.contains(ip))
            .map(|(_, rule)| rule.as_str())
    }
}

/// Allowed and disallowed client lists from the `[access]` section.
///
/// A non-empty allowlist disallows every client not on it; otherwise only
/// clients matching the disallowlist are blocked.
#[derive(Debug, Default)]
pub struct StaticAccessList {
    allowed: RuleSet,
    disallowed: RuleSet,
}

impl StaticAccessList {
    pub fn new(allowed: &[String], disallowed: &[String]) -> Result<Self, DomainError> {
        Ok(Self {
            allowed: RuleSet::parse(allowed)?,
            disallowed: RuleSet::parse(disallowed)?,
        })
    }

    pub fn from_config(config: &AccessConfig) -> Result<Self, DomainError> {
        Self::new(&config.allowed_clients, &config.disallowed_clients)
    }
}

impl AccessPolicy for StaticAccessList {
    fn check(&self, addr: Option<IpAddr>, client_id: Option<&str>) -> AccessDecision {
        if !self.allowed.is_empty() {
            return match self.allowed.matching(addr, client_id) {
                Some(_) => AccessDecision::allowed(),
                None => AccessDecision::disallowed(None),
            };
        }

        match self.disallowed.matching(addr, client_id) {
            Some(rule) => AccessDecision::disallowed(Some(rule.to_string())),
            None => AccessDecision::allowed(),
        }
    }
}
