use derive_getters::Getters;
use dto::member::Member;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Members still missing their birth year or their phone number, in fetch order.
/// Duplicates are kept.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Clone, Getters)]
#[serde(transparent)]
pub struct FilteredSet {
    members: Vec<Member>,
}

impl Deref for FilteredSet {
    type Target = Vec<Member>;

    fn deref(&self) -> &Self::Target {
        &self.members
    }
}

impl From<Vec<Member>> for FilteredSet {
    fn from(members: Vec<Member>) -> Self {
        FilteredSet { members }
    }
}

impl FromIterator<Member> for FilteredSet {
    fn from_iter<T: IntoIterator<Item = Member>>(iter: T) -> Self {
        FilteredSet {
            members: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FilteredSet {
    type Item = Member;
    type IntoIter = std::vec::IntoIter<Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl FilteredSet {
    /// Keep only the members missing their birth year or their phone number.
    pub fn needing_completion<T: IntoIterator<Item = Member>>(members: T) -> Self {
        members
            .into_iter()
            .filter(Member::needs_completion)
            .collect()
    }

    /// Add `other` members after the current ones. Existing members are never replaced.
    pub fn append(&mut self, other: FilteredSet) {
        self.members.extend(other.members);
    }
}
