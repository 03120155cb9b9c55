//! Online users, joined groups and cached member lists.
//!
//! Every list is replaced wholesale by the server and deduplicated on the way
//! in, first occurrence wins. Ownership is answered from two places: the
//! joined-group entry says whether the local user may manage a group at all,
//! the member list says which members are owners.

use std::collections::{HashMap, HashSet};

use chatroom_proto::{Group, GroupId, GroupMember};

/// Roster snapshot.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    users: Vec<String>,
    groups: Vec<Group>,
    members: HashMap<GroupId, Vec<GroupMember>>,
    unread: HashSet<GroupId>,
}

impl RosterStore {
    /// Empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the online-user set.
    pub fn replace_users(&mut self, users: Vec<String>) {
        let mut seen = HashSet::new();
        self.users = users.into_iter().filter(|name| seen.insert(name.clone())).collect();
    }

    /// Replace the joined-group set.
    ///
    /// Member lists and unread flags of groups that are no longer joined are
    /// dropped.
    pub fn replace_groups(&mut self, groups: Vec<Group>) {
        let mut seen = HashSet::new();
        self.groups = groups.into_iter().filter(|group| seen.insert(group.id)).collect();
        self.members.retain(|id, _| seen.contains(id));
        self.unread.retain(|id| seen.contains(id));
    }

    /// Store the member list of `group_id`, replacing any earlier one.
    pub fn record_members(&mut self, group_id: GroupId, members: Vec<GroupMember>) {
        let mut seen = HashSet::new();
        let members =
            members.into_iter().filter(|member| seen.insert(member.username.clone())).collect();
        self.members.insert(group_id, members);
    }

    /// Online usernames in server order.
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Whether `username` is online.
    pub fn is_online(&self, username: &str) -> bool {
        self.users.iter().any(|name| name == username)
    }

    /// Joined groups in server order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Joined group by ID.
    pub fn group(&self, group_id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    /// Member list of `group_id`. Empty until the server has sent one.
    pub fn members_for(&self, group_id: GroupId) -> &[GroupMember] {
        self.members.get(&group_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the local user may manage the members of `group_id`.
    pub fn can_manage(&self, group_id: GroupId) -> bool {
        self.group(group_id).is_some_and(|group| group.is_owner)
    }

    /// Whether `username` is listed as an owner of `group_id`.
    pub fn is_member_owner(&self, group_id: GroupId, username: &str) -> bool {
        self.members_for(group_id)
            .iter()
            .any(|member| member.username == username && member.is_owner)
    }

    /// Flag `group_id` as having unseen messages.
    pub fn mark_unread(&mut self, group_id: GroupId) {
        if self.group(group_id).is_some() {
            self.unread.insert(group_id);
        }
    }

    /// Clear the unread flag of `group_id`.
    pub fn clear_unread(&mut self, group_id: GroupId) {
        self.unread.remove(&group_id);
    }

    /// Whether `group_id` has unseen messages.
    pub fn is_unread(&self, group_id: GroupId) -> bool {
        self.unread.contains(&group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_are_deduplicated_in_order() {
        let mut roster = RosterStore::new();
        roster.replace_users(vec!["bob".into(), "carol".into(), "bob".into()]);
        assert_eq!(roster.users(), ["bob", "carol"]);

        roster.replace_users(vec!["dave".into()]);
        assert_eq!(roster.users(), ["dave"]);
        assert!(!roster.is_online("bob"));
    }

    #[test]
    fn duplicate_group_ids_keep_first() {
        let mut roster = RosterStore::new();
        roster.replace_groups(vec![Group::new(1, "dev", true), Group::new(1, "dup", false)]);

        assert_eq!(roster.groups().len(), 1);
        assert_eq!(roster.group(1).map(|g| g.name.as_str()), Some("dev"));
        assert!(roster.can_manage(1));
    }

    #[test]
    fn members_are_deduplicated_by_username() {
        let mut roster = RosterStore::new();
        roster.record_members(3, vec![
            GroupMember::new("alice", true),
            GroupMember::new("bob", false),
            GroupMember::new("alice", false),
        ]);

        let names: Vec<_> = roster.members_for(3).iter().map(|m| m.username.as_str()).collect();
        assert_eq!(names, ["alice", "bob"]);
        assert!(roster.is_member_owner(3, "alice"));
        assert!(!roster.is_member_owner(3, "bob"));
    }

    #[test]
    fn members_default_to_empty() {
        let roster = RosterStore::new();
        assert!(roster.members_for(42).is_empty());
    }

    #[test]
    fn leaving_a_group_drops_its_cache() {
        let mut roster = RosterStore::new();
        roster.replace_groups(vec![Group::new(1, "dev", false), Group::new(2, "ops", false)]);
        roster.record_members(2, vec![GroupMember::new("bob", true)]);
        roster.mark_unread(2);

        roster.replace_groups(vec![Group::new(1, "dev", false)]);

        assert!(roster.members_for(2).is_empty());
        assert!(!roster.is_unread(2));
    }

    #[test]
    fn unread_only_for_joined_groups() {
        let mut roster = RosterStore::new();
        roster.replace_groups(vec![Group::new(1, "dev", false)]);

        roster.mark_unread(1);
        roster.mark_unread(9);
        assert!(roster.is_unread(1));
        assert!(!roster.is_unread(9));

        roster.clear_unread(1);
        assert!(!roster.is_unread(1));
    }
}
