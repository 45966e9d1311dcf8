use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BackendError {
    #[error("The members of the group can't be retrieved [group_id: {0}]")]
    MembersRetrievalFailed(String),
    #[error("The members list of the group is malformed [group_id: {0}]")]
    MalformedRoster(String),
    #[error("The member can't be updated [name: {0}]")]
    MemberUpdateFailed(String),
}
