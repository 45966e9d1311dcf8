use crate::backend::error::BackendError::MemberUpdateFailed;
use crate::error::Result;
use crate::tools::log_message_and_return;
use dto::member::UserId;
use dto::member_update::MemberUpdate;
use log::{trace, warn};
use reqwest::Client;

/// Send a partial update of a user to the backend.
/// Only the status matters: the returned body is ignored.
pub async fn update_member(
    client: &Client,
    base_url: &str,
    user_id: &UserId,
    name: &str,
    update: &MemberUpdate,
) -> Result<()> {
    let url = format!("{base_url}/users/{user_id}");
    let response = client
        .put(url)
        .json(update)
        .send()
        .await
        .map_err(log_message_and_return(
            "Can't reach backend to update member",
            MemberUpdateFailed(name.to_owned()),
        ))?;

    let status = response.status();
    if status.is_success() {
        trace!("Member has been updated [user_id: {user_id}]");
        Ok(())
    } else {
        warn!("Can't update member [user_id: {user_id}, status: {status}]");
        Err(MemberUpdateFailed(name.to_owned()).into())
    }
}
