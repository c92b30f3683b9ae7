use crate::{Client, ClientId, DomainError, HardwareAddr, Identifier};
use ipnetwork::IpNetwork;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::hash::Hash;
use std::net::IpAddr;
use std::sync::Arc;

/// Everything known about the device behind a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityKey<'a> {
    pub addr: Option<IpAddr>,
    pub hardware: Option<HardwareAddr>,
    pub client_id: Option<&'a str>,
}

impl<'a> IdentityKey<'a> {
    pub fn from_addr(addr: IpAddr) -> Self {
        Self {
            addr: Some(addr),
            ..Default::default()
        }
    }

    pub fn with_hardware(mut self, hardware: Option<HardwareAddr>) -> Self {
        self.hardware = hardware;
        self
    }

    pub fn with_client_id(mut self, client_id: Option<&'a str>) -> Self {
        self.client_id = client_id;
        self
    }
}

/// Overlapping CIDR ranges; the longest matching prefix wins.
#[derive(Debug, Default)]
struct RangeMatcher {
    ranges: Vec<(IpNetwork, Arc<str>)>,
}

impl RangeMatcher {
    fn insert(&mut self, network: IpNetwork, owner: &Arc<str>) {
        let present = self
            .ranges
            .iter()
            .any(|(net, o)| *net == network && o == owner);
        if !present {
            self.ranges.push((network, Arc::clone(owner)));
        }
    }

    fn remove_owner(&mut self, owner: &str) {
        self.ranges.retain(|(_, o)| &**o != owner);
    }

    /// Hands the ranges of `old_owner` that are still in `keep` to
    /// `new_owner` in place and drops the rest.
    fn retarget(&mut self, old_owner: &str, new_owner: &Arc<str>, keep: &[IpNetwork]) {
        self.ranges.retain_mut(|(network, owner)| {
            if &**owner != old_owner {
                return true;
            }
            if keep.contains(network) {
                *owner = Arc::clone(new_owner);
                true
            } else {
                false
            }
        });
    }

    fn find(&self, ip: IpAddr) -> Option<&Arc<str>> {
        let mut best_match: Option<(u8, &Arc<str>)> = None;

        for (network, owner) in &self.ranges {
            if network.contains(ip) {
                let prefix = network.prefix();

                match best_match {
                    None => best_match = Some((prefix, owner)),
                    Some((existing_prefix, _)) if prefix > existing_prefix => {
                        best_match = Some((prefix, owner));
                    }
                    _ => {}
                }
            }
        }

        best_match.map(|(_, owner)| owner)
    }

    fn len(&self) -> usize {
        self.ranges.len()
    }
}

/// Maps every identifier key space to the name of the owning client.
///
/// Resolution precedence: exact address, hardware address, opaque client id,
/// then the narrowest address range.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    exact: FxHashMap<IpAddr, Arc<str>>,
    hardware: FxHashMap<HardwareAddr, Arc<str>>,
    client_ids: FxHashMap<ClientId, Arc<str>>,
    ranges: RangeMatcher,
}

fn claim<K>(map: &mut FxHashMap<K, Arc<str>>, key: K, owner: &Arc<str>) -> Result<(), DomainError>
where
    K: Hash + Eq + Display,
{
    match map.entry(key) {
        Entry::Occupied(slot) if slot.get() != owner => Err(DomainError::DuplicateId {
            id: slot.key().to_string(),
            owner: slot.get().to_string(),
        }),
        Entry::Occupied(_) => Ok(()),
        Entry::Vacant(slot) => {
            slot.insert(Arc::clone(owner));
            Ok(())
        }
    }
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `id` to `owner`.
    ///
    /// Fails with [`DomainError::DuplicateId`] when an exclusive identifier
    /// already belongs to a different client. Ranges never conflict.
    pub fn register(&mut self, id: &Identifier, owner: &Arc<str>) -> Result<(), DomainError> {
        match id {
            Identifier::Exact(ip) => claim(&mut self.exact, *ip, owner),
            Identifier::Hardware(mac) => claim(&mut self.hardware, *mac, owner),
            Identifier::ClientId(client_id) => claim(&mut self.client_ids, client_id.clone(), owner),
            Identifier::Range(network) => {
                self.ranges.insert(*network, owner);
                Ok(())
            }
        }
    }

    /// The client that exclusively owns `id`, if any. Ranges have no
    /// exclusive owner.
    pub fn owner_of(&self, id: &Identifier) -> Option<&Arc<str>> {
        match id {
            Identifier::Exact(ip) => self.exact.get(ip),
            Identifier::Hardware(mac) => self.hardware.get(mac),
            Identifier::ClientId(client_id) => self.client_ids.get(client_id),
            Identifier::Range(_) => None,
        }
    }

    /// Reports the first identifier in `ids` owned by someone other than
    /// `owner`, without touching the index.
    pub fn check<'i>(
        &self,
        ids: impl IntoIterator<Item = &'i Identifier>,
        owner: &str,
    ) -> Result<(), DomainError> {
        for id in ids {
            if let Some(existing) = self.owner_of(id) {
                if &**existing != owner {
                    return Err(DomainError::DuplicateId {
                        id: id.to_string(),
                        owner: existing.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Removes every identifier `client` owns.
    pub fn unregister(&mut self, client: &Client) {
        self.unregister_exclusive(client);
        self.ranges.remove_owner(&client.name);
    }

    /// Swaps the identifiers of `old` for those of `new`. Ranges present in
    /// both keep their position, so ties between equal prefixes resolve the
    /// same way after a settings-only update.
    ///
    /// Callers check `new`'s exclusive identifiers beforehand.
    pub fn replace(&mut self, old: &Client, new: &Client) -> Result<(), DomainError> {
        let kept: Vec<IpNetwork> = new
            .ids
            .iter()
            .filter_map(|id| match id {
                Identifier::Range(network) => Some(*network),
                _ => None,
            })
            .collect();

        self.unregister_exclusive(old);
        self.ranges.retarget(&old.name, &new.name, &kept);

        for id in &new.ids {
            self.register(id, &new.name)?;
        }
        Ok(())
    }

    fn unregister_exclusive(&mut self, client: &Client) {
        let owner: &str = &client.name;
        for id in &client.ids {
            match id {
                Identifier::Exact(ip) => remove_if_owned(&mut self.exact, ip, owner),
                Identifier::Hardware(mac) => remove_if_owned(&mut self.hardware, mac, owner),
                Identifier::ClientId(client_id) => {
                    remove_if_owned(&mut self.client_ids, client_id, owner)
                }
                Identifier::Range(_) => {}
            }
        }
    }

    pub fn lookup(&self, key: &IdentityKey<'_>) -> Option<&Arc<str>> {
        if let Some(owner) = key.addr.and_then(|ip| self.exact.get(&ip)) {
            return Some(owner);
        }

        if let Some(owner) = key.hardware.and_then(|mac| self.hardware.get(&mac)) {
            return Some(owner);
        }

        if let Some(owner) = key.client_id.and_then(|id| self.client_ids.get(id)) {
            return Some(owner);
        }

        key.addr.and_then(|ip| self.ranges.find(ip))
    }

    pub fn lookup_client_id(&self, client_id: &str) -> Option<&Arc<str>> {
        self.client_ids.get(client_id)
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.hardware.len() + self.client_ids.len() + self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn remove_if_owned<K>(map: &mut FxHashMap<K, Arc<str>>, key: &K, owner: &str)
where
    K: Hash + Eq,
{
    if map.get(key).is_some_and(|o| &**o == owner) {
        map.remove(key);
    }
}
