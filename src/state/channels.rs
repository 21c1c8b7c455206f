//! Channel registry: bounded member sets with create-on-join and
//! delete-on-empty lifecycles.
//!
//! A single mutex guards the whole table. `join` performs find-or-create,
//! the capacity checks, and the membership insert in one critical
//! section; `leave` removes the member and deletes the channel in the
//! same step that empties it. A channel with zero members therefore
//! never exists, and a concurrent join can never revive a channel that
//! is mid-deletion.

use crate::error::RegistryError;
use crate::state::ClientId;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Names the query commands treat as keywords; a channel with one of
/// these names would be unreachable by `/who` and `/howmany`.
const RESERVED_NAMES: &[&str] = &["global", "channels"];

/// Result of a successful [`ChannelRegistry::join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Whether the channel was created by this join.
    pub created: bool,
    /// Member count after the join.
    pub member_count: usize,
}

struct Channel {
    /// Slot index, assigned at creation. A recreated channel gets a new
    /// slot, so it is distinguishable from its predecessor.
    slot: usize,
    members: HashSet<ClientId>,
}

/// The shared channel registry.
pub struct ChannelRegistry {
    max_channels: usize,
    max_members: usize,
    inner: Mutex<Table>,
}

struct Table {
    next_slot: usize,
    channels: HashMap<String, Channel>,
}

impl ChannelRegistry {
    pub fn new(max_channels: usize, max_members: usize) -> Self {
        Self {
            max_channels,
            max_members,
            inner: Mutex::new(Table {
                next_slot: 0,
                channels: HashMap::new(),
            }),
        }
    }

    /// Join a channel, creating it if absent (names are case-sensitive;
    /// the query keywords are not valid channel names).
    pub fn join(&self, name: &str, id: ClientId) -> Result<JoinOutcome, RegistryError> {
        if RESERVED_NAMES.contains(&name) {
            return Err(RegistryError::NameReserved(name.to_string()));
        }
        let mut table = self.inner.lock();
        if let Some(channel) = table.channels.get_mut(name) {
            if channel.members.contains(&id) {
                return Err(RegistryError::AlreadyMember(name.to_string()));
            }
            if channel.members.len() >= self.max_members {
                return Err(RegistryError::ChannelFull(name.to_string()));
            }
            channel.members.insert(id);
            Ok(JoinOutcome {
                created: false,
                member_count: channel.members.len(),
            })
        } else {
            if table.channels.len() >= self.max_channels {
                return Err(RegistryError::TooManyChannels);
            }
            let slot = table.next_slot;
            table.next_slot += 1;
            let mut members = HashSet::new();
            members.insert(id);
            table
                .channels
                .insert(name.to_string(), Channel { slot, members });
            Ok(JoinOutcome {
                created: true,
                member_count: 1,
            })
        }
    }

    /// Leave a channel, deleting it if this removal empties it.
    ///
    /// Returns the remaining member count, or `None` if the channel is
    /// unknown or the client was not a member (silently ignored).
    pub fn leave(&self, name: &str, id: ClientId) -> Option<usize> {
        let mut table = self.inner.lock();
        let channel = table.channels.get_mut(name)?;
        if !channel.members.remove(&id) {
            return None;
        }
        let remaining = channel.members.len();
        if remaining == 0 {
            table.channels.remove(name);
        }
        Some(remaining)
    }

    /// Remove a client from every channel it belongs to, deleting the
    /// channels that end up empty. Returns `(name, remaining)` for each
    /// membership dropped.
    pub fn leave_all(&self, id: ClientId) -> Vec<(String, usize)> {
        let mut table = self.inner.lock();
        let mut left = Vec::new();
        table.channels.retain(|name, channel| {
            if channel.members.remove(&id) {
                left.push((name.clone(), channel.members.len()));
                !channel.members.is_empty()
            } else {
                true
            }
        });
        left
    }

    /// Snapshot of a channel's members, or `None` if the channel is
    /// unknown.
    pub fn members_of(&self, name: &str) -> Option<Vec<ClientId>> {
        let table = self.inner.lock();
        let channel = table.channels.get(name)?;
        let mut members: Vec<ClientId> = channel.members.iter().copied().collect();
        members.sort();
        Some(members)
    }

    /// Whether a channel with that exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().channels.contains_key(name)
    }

    /// Member count of a channel, or `None` if unknown.
    pub fn member_count(&self, name: &str) -> Option<usize> {
        self.inner
            .lock()
            .channels
            .get(name)
            .map(|c| c.members.len())
    }

    /// Slot index of a channel, or `None` if unknown.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.inner.lock().channels.get(name).map(|c| c.slot)
    }

    /// Number of open channels.
    pub fn len(&self) -> usize {
        self.inner.lock().channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.max_channels
    }

    pub fn member_capacity(&self) -> usize {
        self.max_members
    }
}
