//! Client registry: identity allocation, display names, snapshots.
//!
//! One mutex guards the whole table so compound operations (the
//! uniqueness check plus swap inside [`ClientRegistry::rename`], the
//! capacity check plus insert inside [`ClientRegistry::register`]) are
//! single critical sections. No lock is ever held across I/O.

use crate::error::RegistryError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;

/// Identity numbering starts at 10.
const FIRST_CLIENT_ID: u64 = 10;

/// Unique client identity, assigned at connect time and never reused
/// for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A connected client, as seen in registry snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    /// Display name. Unique among active clients; defaults to the
    /// stringified identity.
    pub name: String,
}

/// The shared client registry.
pub struct ClientRegistry {
    capacity: usize,
    inner: Mutex<Table>,
}

struct Table {
    next_id: u64,
    by_id: HashMap<ClientId, Client>,
    by_name: HashMap<String, ClientId>,
}

impl ClientRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Table {
                next_id: FIRST_CLIENT_ID,
                by_id: HashMap::new(),
                by_name: HashMap::new(),
            }),
        }
    }

    /// Allocate a fresh identity and insert the client under capacity.
    pub fn register(&self) -> Result<Client, RegistryError> {
        let mut table = self.inner.lock();
        if table.by_id.len() >= self.capacity {
            return Err(RegistryError::CapacityExceeded);
        }

        // The default name must be free in the name index. A rename can
        // claim any unused name, including the stringified form of an id
        // not yet handed out, so skip ids whose default name is taken.
        while table.by_name.contains_key(&table.next_id.to_string()) {
            table.next_id += 1;
        }
        let id = ClientId(table.next_id);
        table.next_id += 1;

        let client = Client {
            id,
            name: id.to_string(),
        };
        table.by_name.insert(client.name.clone(), id);
        table.by_id.insert(id, client.clone());
        Ok(client)
    }

    /// Remove a client. No-op if already absent, so teardown can race
    /// with a forced shutdown.
    pub fn unregister(&self, id: ClientId) -> Option<Client> {
        let mut table = self.inner.lock();
        let client = table.by_id.remove(&id)?;
        table.by_name.remove(&client.name);
        Some(client)
    }

    /// Atomically check uniqueness and swap the display name.
    ///
    /// Returns the previous name on success. Renaming to the name the
    /// client already holds succeeds without changing anything.
    pub fn rename(&self, id: ClientId, new_name: &str) -> Result<String, RegistryError> {
        let mut table = self.inner.lock();
        match table.by_name.get(new_name) {
            Some(&holder) if holder == id => return Ok(new_name.to_string()),
            Some(_) => return Err(RegistryError::NameTaken(new_name.to_string())),
            None => {}
        }

        let old_name = {
            let client = table
                .by_id
                .get_mut(&id)
                .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
            std::mem::replace(&mut client.name, new_name.to_string())
        };
        table.by_name.remove(&old_name);
        table.by_name.insert(new_name.to_string(), id);
        Ok(old_name)
    }

    /// Look up a client by display name (case-sensitive exact match).
    pub fn find_by_name(&self, name: &str) -> Option<Client> {
        let table = self.inner.lock();
        let id = table.by_name.get(name)?;
        table.by_id.get(id).cloned()
    }

    /// Look up a client by identity.
    pub fn get(&self, id: ClientId) -> Option<Client> {
        self.inner.lock().by_id.get(&id).cloned()
    }

    /// Point-in-time snapshot of every client, ordered by identity.
    pub fn all(&self) -> Vec<Client> {
        let table = self.inner.lock();
        let mut clients: Vec<Client> = table.by_id.values().cloned().collect();
        clients.sort_by_key(|c| c.id);
        clients
    }

    pub fn len(&self) -> usize {
        self.inner.lock().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
