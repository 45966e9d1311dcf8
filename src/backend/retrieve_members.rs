use crate::backend::error::BackendError::{MalformedRoster, MembersRetrievalFailed};
use crate::error::Result;
use crate::tools::log_message_and_return;
use dto::member::Member;
use log::{debug, warn};
use reqwest::Client;

/// Retrieve the members-role roster of a group.
/// A `null` body is considered as an empty roster.
pub async fn retrieve_members(client: &Client, base_url: &str, group_id: &str) -> Result<Vec<Member>> {
    let url = format!("{base_url}/organizations/{group_id}/members/roles");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(log_message_and_return(
            "Can't reach members roster",
            MembersRetrievalFailed(group_id.to_owned()),
        ))?;

    let status = response.status();
    if !status.is_success() {
        warn!("Can't retrieve members roster [group_id: {group_id}, status: {status}]");
        return Err(MembersRetrievalFailed(group_id.to_owned()).into());
    }

    let members = response
        .json::<Option<Vec<Member>>>()
        .await
        .map_err(log_message_and_return(
            "Can't read members roster",
            MalformedRoster(group_id.to_owned()),
        ))?
        .unwrap_or_default();
    debug!(
        "Members roster retrieved [group_id: {group_id}, count: {}]",
        members.len()
    );

    Ok(members)
}
