use crate::{ClientSource, Observation, RuntimeClient};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_RUNTIME_TTL: Duration = Duration::from_secs(3600);

/// Address-keyed store of passively discovered clients.
///
/// Expired entries stay in the map until the next write to the same address
/// or a sweep, but reads never return them.
#[derive(Debug)]
pub struct RuntimeClientCache {
    entries: FxHashMap<IpAddr, RuntimeClient>,
    ttl: Duration,
}

impl RuntimeClientCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: FxHashMap::default(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn is_live(&self, client: &RuntimeClient, now: Instant) -> bool {
        now.saturating_duration_since(client.last_seen) < self.ttl
    }

    pub fn get(&self, addr: &IpAddr, now: Instant) -> Option<&RuntimeClient> {
        self.entries
            .get(addr)
            .filter(|client| self.is_live(client, now))
    }

    pub fn iter_live(&self, now: Instant) -> impl Iterator<Item = &RuntimeClient> {
        self.entries
            .values()
            .filter(move |client| self.is_live(client, now))
    }

    /// Inserts or refreshes the entry for `obs.addr`.
    ///
    /// A live hostname is only replaced by a source of equal or higher
    /// priority (DHCP > reverse DNS > ARP). WHOIS observations only touch the
    /// metadata.
    pub fn upsert(&mut self, obs: Observation, now: Instant) {
        let ttl = self.ttl;
        let client = match self.entries.entry(obs.addr) {
            Entry::Occupied(slot) => {
                let client = slot.into_mut();
                if now.saturating_duration_since(client.last_seen) >= ttl {
                    *client = RuntimeClient::new(obs.addr, obs.source, now);
                }
                client
            }
            Entry::Vacant(slot) => slot.insert(RuntimeClient::new(obs.addr, obs.source, now)),
        };

        if obs.source.assigns_hostname() {
            let outranks = obs.source >= client.source || client.hostname.is_none();
            match obs.hostname {
                Some(hostname) if outranks => {
                    client.hostname = Some(Arc::from(hostname.as_str()));
                    client.source = obs.source;
                }
                _ if client.hostname.is_none() && obs.source > client.source => {
                    client.source = obs.source;
                }
                _ => {}
            }
        }

        if obs.hardware.is_some() {
            client.hardware = obs.hardware;
        }

        if obs.whois.is_some() {
            client.whois = obs.whois;
        }

        client.last_seen = now;
    }

    pub fn remove(&mut self, addr: &IpAddr) -> Option<RuntimeClient> {
        self.entries.remove(addr)
    }

    /// Drops every entry for which `claimed` returns true.
    pub fn evict_claimed<F>(&mut self, mut claimed: F) -> usize
    where
        F: FnMut(&RuntimeClient) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|_, client| !claimed(client));
        before - self.entries.len()
    }

    /// Addresses whose entries have outlived the TTL.
    pub fn expired(&self, now: Instant) -> Vec<IpAddr> {
        self.entries
            .values()
            .filter(|client| !self.is_live(client, now))
            .map(|client| client.addr)
            .collect()
    }

    /// Removes the given addresses if they are still expired at `now`.
    pub fn remove_expired(&mut self, addrs: &[IpAddr], now: Instant) -> usize {
        let ttl = self.ttl;
        let mut removed = 0;
        for addr in addrs {
            if let Entry::Occupied(slot) = self.entries.entry(*addr) {
                if now.saturating_duration_since(slot.get().last_seen) >= ttl {
                    slot.remove();
                    removed += 1;
                }
            }
        }
        removed
    }

    pub fn source_of(&self, addr: &IpAddr, now: Instant) -> Option<ClientSource> {
        self.get(addr, now).map(|client| client.source)
    }
}

impl Default for RuntimeClientCache {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_TTL)
    }
}
