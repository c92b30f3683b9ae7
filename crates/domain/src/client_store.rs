use crate::{Client, DomainError, HardwareAddr, IdentityIndex, IdentityKey};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;

/// Canonical set of persistent clients keyed by name, plus the identity
/// index built from their identifiers.
///
/// Every mutation validates first and only then changes state, so a failed
/// call leaves the store exactly as it was.
#[derive(Debug, Default)]
pub struct ClientStore {
    clients: BTreeMap<Arc<str>, Arc<Client>>,
    index: IdentityIndex,
}

impl ClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a full client set, failing on the first invalid or
    /// conflicting record.
    pub fn from_clients<I>(clients: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = Client>,
    {
        let mut store = Self::new();
        for client in clients {
            store.add(client)?;
        }
        Ok(store)
    }

    pub fn add(&mut self, client: Client) -> Result<Arc<Client>, DomainError> {
        client.validate()?;

        if self.clients.contains_key(&*client.name) {
            return Err(DomainError::AlreadyExists(client.name.to_string()));
        }

        self.index.check(client.exclusive_ids(), &client.name)?;

        let client = Arc::new(client);
        self.install(&client)?;
        Ok(client)
    }

    /// Replaces the client called `old_name` with `client`, which may carry a
    /// new name and a new identifier set.
    pub fn update(&mut self, old_name: &str, client: Client) -> Result<Arc<Client>, DomainError> {
        client.validate()?;

        let old = self
            .clients
            .get(old_name)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(old_name.to_string()))?;

        if *client.name != *old.name && self.clients.contains_key(&*client.name) {
            return Err(DomainError::Conflict(format!(
                "name {} is used by another client",
                client.name
            )));
        }

        for id in client.exclusive_ids() {
            if let Some(owner) = self.index.owner_of(id) {
                if *owner != old.name {
                    return Err(DomainError::Conflict(format!(
                        "identifier {id} is used by client {owner}"
                    )));
                }
            }
        }

        let client = Arc::new(client);
        self.index.replace(&old, &client)?;
        self.clients.remove(old_name);
        self.clients
            .insert(Arc::clone(&client.name), Arc::clone(&client));
        Ok(client)
    }

    pub fn del(&mut self, name: &str) -> Result<Arc<Client>, DomainError> {
        let client = self
            .clients
            .remove(name)
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        self.index.unregister(&client);
        Ok(client)
    }

    // Callers have already checked every exclusive identifier.
    fn install(&mut self, client: &Arc<Client>) -> Result<(), DomainError> {
        for id in &client.ids {
            self.index.register(id, &client.name)?;
        }
        self.clients
            .insert(Arc::clone(&client.name), Arc::clone(client));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Client>> {
        self.clients.get(name)
    }

    pub fn lookup(&self, key: &IdentityKey<'_>) -> Option<&Arc<Client>> {
        self.index
            .lookup(key)
            .and_then(|name| self.clients.get(name))
    }

    /// Resolves a control-layer token: a literal address, a hardware
    /// address, a client name, or an opaque client id, in that order.
    ///
    /// `hardware_of` supplies the hardware address last seen for an address
    /// so that hardware identifiers can match address tokens.
    pub fn find<F>(&self, token: &str, hardware_of: F) -> Option<&Arc<Client>>
    where
        F: FnOnce(IpAddr) -> Option<HardwareAddr>,
    {
        let token = token.trim();

        if let Ok(ip) = token.parse::<IpAddr>() {
            let key = IdentityKey::from_addr(ip).with_hardware(hardware_of(ip));
            return self.lookup(&key);
        }

        if let Ok(mac) = token.parse::<HardwareAddr>() {
            let key = IdentityKey::default().with_hardware(Some(mac));
            return self.lookup(&key);
        }

        self.clients.get(token).or_else(|| {
            self.index
                .lookup_client_id(token)
                .and_then(|name| self.clients.get(name))
        })
    }

    /// Whether some persistent client covers the device.
    pub fn claims(&self, addr: IpAddr, hardware: Option<HardwareAddr>) -> bool {
        let key = IdentityKey::from_addr(addr).with_hardware(hardware);
        self.index.lookup(&key).is_some()
    }

    /// Clients in name order.
    pub fn clients(&self) -> impl Iterator<Item = &Arc<Client>> {
        self.clients.values()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
