use kestrel_dns_domain::{
    Client, ClientRecord, ClientStore, DomainError, HardwareAddr, IdentityKey, Observation,
    RuntimeClient, RuntimeClientCache,
};
use rustc_hash::FxHashMap;
use std::net::IpAddr;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug)]
struct RegistryState {
    store: ClientStore,
    runtime: RuntimeClientCache,
    // Last hardware address seen per address, kept even when the
    // observation itself was shadowed so hardware identifiers still match.
    neighbors: FxHashMap<IpAddr, (HardwareAddr, Instant)>,
}

impl RegistryState {
    fn new(runtime_ttl: Duration) -> Self {
        Self {
            store: ClientStore::new(),
            runtime: RuntimeClientCache::new(runtime_ttl),
            neighbors: FxHashMap::default(),
        }
    }

    fn hardware_of(&self, addr: IpAddr, now: Instant) -> Option<HardwareAddr> {
        let ttl = self.runtime.ttl();
        self.neighbors
            .get(&addr)
            .filter(|(_, seen)| now.saturating_duration_since(*seen) < ttl)
            .map(|(mac, _)| *mac)
    }

    fn is_shadowed(&self, client: &RuntimeClient) -> bool {
        self.store.claims(client.addr, client.hardware)
    }

    fn evict_claimed_by(&mut self, client: &Client) -> usize {
        self.runtime
            .evict_claimed(|rc| client.claims(rc.addr, rc.hardware))
    }
}

/// Consistent view of every client at one instant.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    /// Persistent clients in name order.
    pub clients: Vec<Arc<Client>>,
    /// Live runtime clients not shadowed by a persistent one, by address.
    pub runtime: Vec<RuntimeClient>,
}

/// Persistent clients and runtime clients behind a single reader/writer lock.
///
/// This is the only surface the query path, the control layer and the
/// discovery jobs touch. Store and identity index change together inside one
/// write section, so readers see a state entirely before or entirely after
/// any mutation. No I/O happens while the lock is held.
pub struct ClientRegistry {
    state: RwLock<RegistryState>,
}

impl ClientRegistry {
    pub fn new(runtime_ttl: Duration) -> Self {
        Self {
            state: RwLock::new(RegistryState::new(runtime_ttl)),
        }
    }

    // Every write section leaves the state consistent before it can panic,
    // so a poisoned lock still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn runtime_ttl(&self) -> Duration {
        self.read().runtime.ttl()
    }

    pub fn add(&self, client: Client) -> Result<Arc<Client>, DomainError> {
        let mut state = self.write();
        let client = state.store.add(client)?;
        let evicted = state.evict_claimed_by(&client);

        info!(name = %client.name, ids = client.ids.len(), evicted, "Client added");
        Ok(client)
    }

    pub fn update(&self, old_name: &str, client: Client) -> Result<Arc<Client>, DomainError> {
        let mut state = self.write();
        let client = state.store.update(old_name, client)?;
        let evicted = state.evict_claimed_by(&client);

        info!(old_name, name = %client.name, evicted, "Client updated");
        Ok(client)
    }

    pub fn del(&self, name: &str) -> Result<Arc<Client>, DomainError> {
        let client = self.write().store.del(name)?;
        info!(name, "Client deleted");
        Ok(client)
    }

    /// Replaces every persistent client at once. Nothing changes if any
    /// client is invalid or conflicts with another.
    pub fn import<I>(&self, clients: I) -> Result<usize, DomainError>
    where
        I: IntoIterator<Item = Client>,
    {
        let store = ClientStore::from_clients(clients)?;
        let count = store.len();

        let mut state = self.write();
        state.store = store;
        let RegistryState { store, runtime, .. } = &mut *state;
        let evicted = runtime.evict_claimed(|rc| store.claims(rc.addr, rc.hardware));

        info!(clients = count, evicted, "Persistent clients imported");
        Ok(count)
    }

    pub fn export(&self) -> Vec<ClientRecord> {
        self.read()
            .store
            .clients()
            .map(|client| ClientRecord::from(client.as_ref()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Client>> {
        self.read().store.get(name).cloned()
    }

    /// Resolves a control-layer token (address, hardware address, name or
    /// client id) to a persistent client.
    pub fn find(&self, token: &str) -> Option<Arc<Client>> {
        self.find_at(token, Instant::now())
    }

    pub fn find_at(&self, token: &str, now: Instant) -> Option<Arc<Client>> {
        let state = self.read();
        state
            .store
            .find(token, |ip| state.hardware_of(ip, now))
            .cloned()
    }

    /// Query path lookup. The hardware address last seen for `addr` takes
    /// part in the resolution.
    pub fn find_for_query(&self, addr: IpAddr, client_id: Option<&str>) -> Option<Arc<Client>> {
        self.find_for_query_at(addr, client_id, Instant::now())
    }

    pub fn find_for_query_at(
        &self,
        addr: IpAddr,
        client_id: Option<&str>,
        now: Instant,
    ) -> Option<Arc<Client>> {
        let state = self.read();
        let key = IdentityKey::from_addr(addr)
            .with_hardware(state.hardware_of(addr, now))
            .with_client_id(client_id);
        state.store.lookup(&key).cloned()
    }

    /// Live runtime client at `addr`, unless a persistent client owns it.
    pub fn find_runtime(&self, addr: IpAddr) -> Option<RuntimeClient> {
        self.find_runtime_at(addr, Instant::now())
    }

    pub fn find_runtime_at(&self, addr: IpAddr, now: Instant) -> Option<RuntimeClient> {
        let state = self.read();
        state
            .runtime
            .get(&addr, now)
            .filter(|rc| !state.is_shadowed(rc))
            .cloned()
    }

    /// Publishes a discovery observation. Returns `false` without touching
    /// the cache when a persistent client already covers the device.
    pub fn observe(&self, obs: Observation) -> bool {
        self.observe_at(obs, Instant::now())
    }

    pub fn observe_at(&self, obs: Observation, now: Instant) -> bool {
        let mut state = self.write();

        if let Some(mac) = obs.hardware {
            state.neighbors.insert(obs.addr, (mac, now));
        }

        let hardware = obs.hardware.or_else(|| state.hardware_of(obs.addr, now));
        if state.store.claims(obs.addr, hardware) {
            debug!(addr = %obs.addr, source = obs.source.as_str(), "Observation shadowed by persistent client");
            return false;
        }

        state.runtime.upsert(obs, now);
        true
    }

    pub fn list(&self) -> RegistrySnapshot {
        self.list_at(Instant::now())
    }

    pub fn list_at(&self, now: Instant) -> RegistrySnapshot {
        let state = self.read();

        let clients = state.store.clients().cloned().collect();
        let mut runtime: Vec<RuntimeClient> = state
            .runtime
            .iter_live(now)
            .filter(|rc| !state.is_shadowed(rc))
            .cloned()
            .collect();
        runtime.sort_unstable_by_key(|rc| rc.addr);

        RegistrySnapshot { clients, runtime }
    }

    /// Addresses of the visible runtime clients.
    pub fn runtime_addrs(&self) -> Vec<IpAddr> {
        self.runtime_addrs_at(Instant::now())
    }

    pub fn runtime_addrs_at(&self, now: Instant) -> Vec<IpAddr> {
        let state = self.read();
        state
            .runtime
            .iter_live(now)
            .filter(|rc| !state.is_shadowed(rc))
            .map(|rc| rc.addr)
            .collect()
    }

    /// Physically removes expired runtime entries, at most `batch_size` per
    /// write section. Returns the number removed.
    pub fn sweep_expired(&self, batch_size: usize) -> usize {
        self.sweep_expired_at(batch_size, Instant::now())
    }

    pub fn sweep_expired_at(&self, batch_size: usize, now: Instant) -> usize {
        let (expired, stale_neighbors) = {
            let state = self.read();
            let ttl = state.runtime.ttl();
            let stale: Vec<IpAddr> = state
                .neighbors
                .iter()
                .filter(|(_, (_, seen))| now.saturating_duration_since(*seen) >= ttl)
                .map(|(addr, _)| *addr)
                .collect();
            (state.runtime.expired(now), stale)
        };

        if !stale_neighbors.is_empty() {
            let mut state = self.write();
            let ttl = state.runtime.ttl();
            for addr in &stale_neighbors {
                if state
                    .neighbors
                    .get(addr)
                    .is_some_and(|(_, seen)| now.saturating_duration_since(*seen) >= ttl)
                {
                    state.neighbors.remove(addr);
                }
            }
        }

        if expired.is_empty() {
            return 0;
        }

        let mut removed = 0;
        for batch in expired.chunks(batch_size.max(1)) {
            removed += self.write().runtime.remove_expired(batch, now);
        }

        debug!(candidates = expired.len(), removed, "Runtime clients swept");
        removed
    }

    pub fn len(&self) -> usize {
        self.read().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().store.is_empty()
    }

    /// Stored runtime entries, expired ones included.
    pub fn runtime_len(&self) -> usize {
        self.read().runtime.len()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new(kestrel_dns_domain::DEFAULT_RUNTIME_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_dns_domain::{ClientSource, Identifier, WhoisInfo};

    fn client(name: &str, ids: &[&str]) -> Client {
        Client::new(
            name,
            ids.iter().map(|s| Identifier::parse(s).unwrap()).collect(),
        )
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    fn mac(s: &str) -> HardwareAddr {
        s.parse().unwrap()
    }

    // ---- persistent clients ----

    #[test]
    fn test_add_evicts_claimed_runtime_entries() {
        let registry = ClientRegistry::default();
        let now = Instant::now();
        assert!(registry.observe_at(
            Observation::dhcp(ip("10.0.0.5"), Some("phone".into()), None),
            now
        ));
        assert!(registry.observe_at(
            Observation::arp(ip("10.0.9.9"), mac("aa:bb:cc:dd:ee:ff")),
            now
        ));

        registry
            .add(client("family", &["10.0.0.0/24", "aa:bb:cc:dd:ee:ff"]))
            .unwrap();

        assert_eq!(registry.runtime_len(), 0);
    }

    #[test]
    fn test_find_for_query_uses_observed_hardware() {
        let registry = ClientRegistry::default();
        let now = Instant::now();
        registry.add(client("tv", &["aa:bb:cc:dd:ee:ff"])).unwrap();
        assert!(registry.find_for_query_at(ip("10.0.0.7"), None, now).is_none());

        // Shadowed, but the address is now known to carry the tv's hardware.
        assert!(!registry.observe_at(
            Observation::arp(ip("10.0.0.7"), mac("aa:bb:cc:dd:ee:ff")),
            now
        ));

        let hit = registry.find_for_query_at(ip("10.0.0.7"), None, now);
        assert_eq!(hit.map(|c| c.name.to_string()).as_deref(), Some("tv"));
        assert!(registry.find_at("10.0.0.7", now).is_some());
        assert_eq!(registry.runtime_len(), 0);
    }

    #[test]
    fn test_find_for_query_client_id() {
        let registry = ClientRegistry::default();
        registry
            .add(client("kid", &["192.168.0.0/16", "kid-phone"]))
            .unwrap();
        registry.add(client("dad", &["dad-laptop"])).unwrap();

        let hit = registry.find_for_query(ip("192.168.4.4"), Some("dad-laptop"));
        assert_eq!(hit.map(|c| c.name.to_string()).as_deref(), Some("dad"));

        let hit = registry.find_for_query(ip("192.168.4.4"), None);
        assert_eq!(hit.map(|c| c.name.to_string()).as_deref(), Some("kid"));
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let registry = ClientRegistry::default();
        registry.add(client("old", &["10.0.0.1"])).unwrap();

        let result = registry.import(vec![
            client("a", &["10.0.0.2"]),
            client("b", &["10.0.0.2"]),
        ]);

        assert!(result.is_err());
        assert!(registry.find("old").is_some());
        assert!(registry.find("a").is_none());

        assert_eq!(registry.import(vec![client("a", &["10.0.0.2"])]).unwrap(), 1);
        assert!(registry.find("old").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_export_in_name_order() {
        let registry = ClientRegistry::default();
        registry.add(client("b", &["10.0.0.2"])).unwrap();
        registry.add(client("a", &["10.0.0.1"])).unwrap();

        let names: Vec<_> = registry.export().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    // ---- runtime clients ----

    #[test]
    fn test_persistent_client_shadows_runtime() {
        let registry = ClientRegistry::default();
        let now = Instant::now();
        registry.add(client("nas", &["10.0.0.2"])).unwrap();

        let accepted = registry.observe_at(
            Observation::dhcp(ip("10.0.0.2"), Some("nas-box".into()), None),
            now,
        );

        assert!(!accepted);
        assert!(registry.find_runtime_at(ip("10.0.0.2"), now).is_none());
        assert!(registry.list_at(now).runtime.is_empty());
    }

    #[test]
    fn test_delete_does_not_resurrect_runtime_but_allows_new_observations() {
        let registry = ClientRegistry::default();
        let now = Instant::now();
        registry.add(client("nas", &["10.0.0.2"])).unwrap();
        registry.del("nas").unwrap();

        assert!(registry.find("10.0.0.2").is_none());
        assert!(registry.observe_at(
            Observation::reverse_dns(ip("10.0.0.2"), "nas.lan".into()),
            now
        ));

        let rc = registry.find_runtime_at(ip("10.0.0.2"), now).unwrap();
        assert_eq!(rc.hostname.as_deref(), Some("nas.lan"));
        assert_eq!(rc.source, ClientSource::ReverseDns);
    }

    #[test]
    fn test_expired_entries_hidden_then_swept() {
        let registry = ClientRegistry::new(Duration::from_secs(60));
        let start = Instant::now();
        registry.observe_at(
            Observation::arp(ip("10.0.0.3"), mac("00:11:22:33:44:55")),
            start,
        );
        registry.observe_at(
            Observation::whois(ip("10.0.0.4"), WhoisInfo::default()),
            start,
        );

        let later = start + Duration::from_secs(61);
        assert!(registry.find_runtime_at(ip("10.0.0.3"), later).is_none());
        assert!(registry.runtime_addrs_at(later).is_empty());
        assert_eq!(registry.runtime_len(), 2);

        assert_eq!(registry.sweep_expired_at(1, later), 2);
        assert_eq!(registry.runtime_len(), 0);
    }

    #[test]
    fn test_sweep_keeps_live_entries() {
        let registry = ClientRegistry::new(Duration::from_secs(60));
        let start = Instant::now();
        registry.observe_at(Observation::arp(ip("10.0.0.3"), mac("00:11:22:33:44:55")), start);

        assert_eq!(registry.sweep_expired_at(16, start + Duration::from_secs(30)), 0);
        assert_eq!(registry.runtime_len(), 1);
    }
}
