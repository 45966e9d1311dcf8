use crate::backend::retrieve_members::retrieve_members;
use crate::error::Result;
use crate::leader::error::LeaderError::{EmptyName, LeaderNotFound};
use crate::leader::group_leaders::GroupLeaders;
use crate::member::filtered_set::FilteredSet;
use crate::session::FilteredSetStore;
use futures::future::try_join_all;
use log::debug;
use reqwest::Client;

/// Find the members of every group led by `name` who still miss their birth year or their phone number.
///
/// Rosters are fetched concurrently. The first failing fetch fails the whole resolution:
/// other fetches are not awaited anymore and no partial result is returned.
pub async fn resolve_members(
    client: &Client,
    base_url: &str,
    group_leaders: &GroupLeaders,
    name: &str,
) -> Result<FilteredSet> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EmptyName.into());
    }

    let leader = group_leaders.find(name).ok_or_else(|| {
        debug!("Unknown group leader [name: {name}]");
        LeaderNotFound(name.to_owned())
    })?;
    let group_ids = leader.group_ids();
    debug!("Group leader found [name: {name}, groups: {group_ids:?}]");

    let rosters = try_join_all(
        group_ids
            .iter()
            .map(|group_id| retrieve_members(client, base_url, group_id)),
    )
    .await?;

    Ok(FilteredSet::needing_completion(rosters.into_iter().flatten()))
}

/// Resolve the members of `name`, then append them to the members already stored in `store`.
/// Returns everything that is now stored.
pub async fn resolve_and_store<S: FilteredSetStore>(
    store: &S,
    client: &Client,
    base_url: &str,
    group_leaders: &GroupLeaders,
    name: &str,
) -> Result<FilteredSet> {
    let resolved_members = resolve_members(client, base_url, group_leaders, name).await?;

    let mut filtered_set = store.read();
    filtered_set.append(resolved_members);
    store.write(&filtered_set);
    debug!(
        "Members to complete stored [count: {}]",
        filtered_set.len()
    );

    Ok(filtered_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::error::BackendError;
    use crate::backend::retrieve_members::tests::{setup_failing_roster, setup_roster};
    use crate::error::ApplicationError::{Backend, Leader};
    use crate::leader::error::LeaderError;
    use crate::leader::group_leaders::tests::get_group_leaders;
    use crate::session::tests::InMemoryStore;
    use dto::member::tests::get_member_without_birth_year;
    use dto::member::{Member, UserId};
    use serde_json::json;
    use wiremock::MockServer;

    fn user_ids(filtered_set: &FilteredSet) -> Vec<UserId> {
        filtered_set.iter().map(Member::user_id).cloned().collect()
    }

    async fn setup_kim_rosters(mock_server: &MockServer) {
        setup_roster(
            mock_server,
            "org-1",
            json!([
                {"userId": 1, "name": "A", "birthYear": "", "phoneNumber": "01011112222"},
                {"userId": 2, "name": "B", "birthYear": "95", "phoneNumber": "01011112222"},
                {"userId": 3, "name": "C", "birthYear": "99", "phoneNumber": null}
            ]),
        )
        .await;
        setup_roster(
            mock_server,
            "org-2",
            json!([
                {"userId": 3, "name": "C", "birthYear": "99", "phoneNumber": null},
                {"userId": 4, "name": "D"}
            ]),
        )
        .await;
    }

    // region resolve_members
    #[async_test]
    async fn should_resolve_members_of_every_group_in_order() {
        let mock_server = MockServer::start().await;
        setup_kim_rosters(&mock_server).await;

        let filtered_set = resolve_members(
            &Client::new(),
            &mock_server.uri(),
            &get_group_leaders(),
            "  Kim ",
        )
        .await
        .unwrap();

        assert_eq!(
            vec![
                UserId::Number(1),
                UserId::Number(3),
                UserId::Number(3),
                UserId::Number(4)
            ],
            user_ids(&filtered_set)
        );
    }

    #[async_test]
    async fn should_resolve_members_of_single_group() {
        let mock_server = MockServer::start().await;
        setup_roster(
            &mock_server,
            "org-3",
            json!([{"userId": "x", "name": "X", "phone_number": "010-1111-2222"}]),
        )
        .await;

        let filtered_set = resolve_members(
            &Client::new(),
            &mock_server.uri(),
            &get_group_leaders(),
            "Lee",
        )
        .await
        .unwrap();

        assert_eq!(vec![UserId::Text("x".to_owned())], user_ids(&filtered_set));
    }

    #[async_test]
    async fn should_fail_to_resolve_empty_name() {
        let error = resolve_members(
            &Client::new(),
            "http://127.0.0.1:1",
            &get_group_leaders(),
            "   ",
        )
        .await
        .unwrap_err();

        assert!(matches!(error, Leader(LeaderError::EmptyName)));
    }

    #[async_test]
    async fn should_fail_to_resolve_unknown_leader() {
        let error = resolve_members(
            &Client::new(),
            "http://127.0.0.1:1",
            &get_group_leaders(),
            "Park",
        )
        .await
        .unwrap_err();

        match error {
            Leader(LeaderError::LeaderNotFound(name)) => assert_eq!("Park", name),
            _ => panic!("Unexpected error"),
        }
    }

    #[async_test]
    async fn should_fail_to_resolve_when_one_group_fails() {
        let mock_server = MockServer::start().await;
        setup_roster(&mock_server, "org-1", json!([{"userId": 1, "name": "A"}])).await;
        setup_failing_roster(&mock_server, "org-2", 404).await;

        let error = resolve_members(
            &Client::new(),
            &mock_server.uri(),
            &get_group_leaders(),
            "Kim",
        )
        .await
        .unwrap_err();

        match error {
            Backend(BackendError::MembersRetrievalFailed(group_id)) => {
                assert_eq!("org-2", group_id)
            }
            _ => panic!("Unexpected error"),
        }
    }
    // endregion

    // region resolve_and_store
    #[async_test]
    async fn should_store_resolved_members() {
        let mock_server = MockServer::start().await;
        setup_kim_rosters(&mock_server).await;
        let store = InMemoryStore::default();

        let filtered_set = resolve_and_store(
            &store,
            &Client::new(),
            &mock_server.uri(),
            &get_group_leaders(),
            "Kim",
        )
        .await
        .unwrap();

        assert_eq!(4, filtered_set.len());
        assert_eq!(filtered_set, store.read());
    }

    #[async_test]
    async fn should_append_resolved_members_to_stored_ones() {
        let mock_server = MockServer::start().await;
        setup_kim_rosters(&mock_server).await;
        let already_stored = FilteredSet::from(vec![get_member_without_birth_year(10)]);
        let store = InMemoryStore::with_filtered_set(&already_stored);

        let filtered_set = resolve_and_store(
            &store,
            &Client::new(),
            &mock_server.uri(),
            &get_group_leaders(),
            "Kim",
        )
        .await
        .unwrap();

        assert_eq!(
            vec![
                UserId::Number(10),
                UserId::Number(1),
                UserId::Number(3),
                UserId::Number(3),
                UserId::Number(4)
            ],
            user_ids(&filtered_set)
        );
        assert_eq!(filtered_set, store.read());
    }

    #[async_test]
    async fn should_start_over_when_stored_members_are_unreadable() {
        let mock_server = MockServer::start().await;
        setup_kim_rosters(&mock_server).await;
        let store = InMemoryStore::with_snapshot("not json at all");

        let filtered_set = resolve_and_store(
            &store,
            &Client::new(),
            &mock_server.uri(),
            &get_group_leaders(),
            "Kim",
        )
        .await
        .unwrap();

        assert_eq!(4, filtered_set.len());
    }

    #[async_test]
    async fn should_not_store_anything_when_resolution_fails() {
        let store = InMemoryStore::default();

        let result = resolve_and_store(
            &store,
            &Client::new(),
            "http://127.0.0.1:1",
            &get_group_leaders(),
            "Park",
        )
        .await;

        assert!(result.is_err());
        assert!(store.is_empty());
    }
    // endregion
}
