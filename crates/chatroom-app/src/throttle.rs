//! At most one outstanding fetch per resource.

use std::collections::HashSet;

use chatroom_proto::GroupId;

/// Kind of throttled resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A group's member list.
    GroupMembers,
}

/// A throttled resource: kind plus the ID it is fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Resource ID.
    pub id: GroupId,
}

impl ResourceKey {
    /// Key of a group's member list.
    pub fn group_members(group_id: GroupId) -> Self {
        Self { kind: ResourceKind::GroupMembers, id: group_id }
    }
}

/// Pending-request flags, one per [`ResourceKey`].
#[derive(Debug, Clone, Default)]
pub struct RequestThrottler {
    pending: HashSet<ResourceKey>,
}

impl RequestThrottler {
    /// Throttler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` pending. Returns `false` if it already was, in which case
    /// the caller must not send the request.
    pub fn try_begin(&mut self, key: ResourceKey) -> bool {
        self.pending.insert(key)
    }

    /// Clear the flag for `key`. Returns whether it was set.
    pub fn complete(&mut self, key: ResourceKey) -> bool {
        self.pending.remove(&key)
    }

    /// Whether a fetch for `key` is outstanding.
    pub fn is_pending(&self, key: ResourceKey) -> bool {
        self.pending.contains(&key)
    }

    /// Number of outstanding fetches.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
