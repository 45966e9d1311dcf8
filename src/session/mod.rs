use crate::member::filtered_set::FilteredSet;

pub mod session_storage;
pub mod wizard_session;

/// The single slot holding the members still to complete during a wizard session.
pub trait FilteredSetStore {
    /// Absent and unreadable content both read as an empty set.
    fn read(&self) -> FilteredSet;
    fn write(&self, filtered_set: &FilteredSet);
    fn clear(&self);
}
