use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Entry of the group leaders lookup table.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct GroupLeader {
    name: String,
    id: GroupIds,
}

/// A leader may be in charge of a single group or of several ones.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(untagged)]
pub enum GroupIds {
    Single(String),
    Multiple(Vec<String>),
}

impl GroupLeader {
    pub fn new(name: String, id: GroupIds) -> Self {
        Self { name, id }
    }

    pub fn group_ids(&self) -> &[String] {
        self.id.as_slice()
    }
}

impl GroupIds {
    pub fn as_slice(&self) -> &[String] {
        match self {
            GroupIds::Single(id) => std::slice::from_ref(id),
            GroupIds::Multiple(ids) => ids,
        }
    }
}
