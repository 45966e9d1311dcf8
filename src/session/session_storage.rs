use crate::member::filtered_set::FilteredSet;
use crate::session::FilteredSetStore;
use crate::tools::{log_error_and_return, log_message_and_return};
use cached::{Cached, TimedSizedCache};
use log::{debug, warn};
use std::fmt::Debug;
use std::sync::Mutex;

const CACHE_SIZE: usize = 100;
const SESSION_LIFESPAN_IN_SECONDS: u64 = 60 * 60 * 24;

/// JSON snapshots of the members still to complete, one per wizard session.
/// Only 100 sessions can be stored at a time, and they expire after one day.
#[derive(Debug)]
pub struct SessionStorage {
    snapshots: TimedSizedCache<String, String>,
}

impl SessionStorage {
    pub fn read(&mut self, session_id: &str) -> FilteredSet {
        match self.snapshots.cache_get(session_id) {
            None => FilteredSet::default(),
            Some(snapshot) => match serde_json::from_str(snapshot) {
                Ok(filtered_set) => filtered_set,
                Err(error) => {
                    debug!("Unreadable session snapshot, starting over [session: {session_id}, error: {error}]");
                    FilteredSet::default()
                }
            },
        }
    }

    pub fn write(&mut self, session_id: &str, filtered_set: &FilteredSet) {
        match serde_json::to_string(filtered_set) {
            Ok(snapshot) => {
                if self.would_evict(session_id) {
                    warn!(
                        "Session storage is full, least recently used session dropped [capacity: {CACHE_SIZE}, session: {session_id}]"
                    );
                }
                self.snapshots.cache_set(session_id.to_owned(), snapshot);
            }
            Err(error) => log_message_and_return("Can't serialize session snapshot", ())(error),
        }
    }

    /// Storing `session_id` would push another session out.
    fn would_evict(&self, session_id: &str) -> bool {
        self.snapshots.cache_size() >= CACHE_SIZE
            && !self.snapshots.key_order().any(|key| key == session_id)
    }

    pub fn delete(&mut self, session_id: &str) {
        self.snapshots.cache_remove(session_id);
    }

    #[cfg(test)]
    pub fn write_raw(&mut self, session_id: &str, snapshot: &str) {
        self.snapshots
            .cache_set(session_id.to_owned(), snapshot.to_owned());
    }
}

impl Default for SessionStorage {
    fn default() -> Self {
        let snapshots =
            TimedSizedCache::with_size_and_lifespan(CACHE_SIZE, SESSION_LIFESPAN_IN_SECONDS);
        Self { snapshots }
    }
}

/// The slot of a given session within the shared [SessionStorage].
pub struct SessionSlot<'a> {
    storage: &'a Mutex<SessionStorage>,
    session_id: &'a str,
}

impl<'a> SessionSlot<'a> {
    pub fn new(storage: &'a Mutex<SessionStorage>, session_id: &'a str) -> Self {
        Self {
            storage,
            session_id,
        }
    }
}

impl FilteredSetStore for SessionSlot<'_> {
    fn read(&self) -> FilteredSet {
        match self.storage.lock() {
            Ok(mut storage) => storage.read(self.session_id),
            Err(error) => log_error_and_return(FilteredSet::default())(error),
        }
    }

    fn write(&self, filtered_set: &FilteredSet) {
        match self.storage.lock() {
            Ok(mut storage) => storage.write(self.session_id, filtered_set),
            Err(error) => log_error_and_return(())(error),
        }
    }

    fn clear(&self) {
        match self.storage.lock() {
            Ok(mut storage) => storage.delete(self.session_id),
            Err(error) => log_error_and_return(())(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dto::member::tests::{get_member_without_birth_year, get_member_without_phone_number};

    const SESSION_ID: &str = "0ea9a5fb-0f46-4057-902a-2552ed956bde";

    fn get_filtered_set() -> FilteredSet {
        FilteredSet::from(vec![
            get_member_without_birth_year(1),
            get_member_without_phone_number(2),
        ])
    }

    #[test]
    fn should_read_written_snapshot() {
        let mut storage = SessionStorage::default();
        storage.write(SESSION_ID, &get_filtered_set());

        assert_eq!(get_filtered_set(), storage.read(SESSION_ID));
    }

    #[test]
    fn should_read_empty_set_when_no_snapshot() {
        let mut storage = SessionStorage::default();

        assert_eq!(FilteredSet::default(), storage.read(SESSION_ID));
    }

    #[test]
    fn should_read_empty_set_when_unreadable_snapshot() {
        let mut storage = SessionStorage::default();
        storage.write_raw(SESSION_ID, "[{\"oops\"");

        assert_eq!(FilteredSet::default(), storage.read(SESSION_ID));
    }

    #[test]
    fn should_delete_snapshot() {
        let mut storage = SessionStorage::default();
        storage.write(SESSION_ID, &get_filtered_set());

        storage.delete(SESSION_ID);

        assert_eq!(FilteredSet::default(), storage.read(SESSION_ID));
    }

    #[test]
    fn should_keep_sessions_apart() {
        let mut storage = SessionStorage::default();
        storage.write(SESSION_ID, &get_filtered_set());

        assert_eq!(FilteredSet::default(), storage.read("another-session"));
    }

    #[test]
    fn should_store_only_100_sessions() {
        let mut storage = SessionStorage::default();
        (0..100).for_each(|id| storage.write(&id.to_string(), &get_filtered_set()));
        assert_eq!(100, storage.snapshots.cache_size());

        storage.write("100", &get_filtered_set());

        assert_eq!(100, storage.snapshots.cache_size());
        assert_eq!(FilteredSet::default(), storage.read("0"));
        assert_eq!(get_filtered_set(), storage.read("100"));
    }

    #[test]
    fn should_tell_when_a_write_would_evict_a_session() {
        let mut storage = SessionStorage::default();
        (0..99).for_each(|id| storage.write(&id.to_string(), &get_filtered_set()));
        assert!(!storage.would_evict("99"));

        storage.write("99", &get_filtered_set());

        assert!(storage.would_evict("100"));
        assert!(!storage.would_evict("42"));
    }

    #[test]
    fn should_share_slot_through_mutex() {
        let storage = Mutex::new(SessionStorage::default());
        let slot = SessionSlot::new(&storage, SESSION_ID);

        slot.write(&get_filtered_set());
        assert_eq!(get_filtered_set(), slot.read());

        slot.clear();
        assert_eq!(FilteredSet::default(), slot.read());
    }
}
