use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LeaderError {
    #[error("No name has been provided.")]
    EmptyName,
    #[error("No group leader is known under this name [name: {0}]")]
    LeaderNotFound(String),
    #[error("The group leaders file can't be read [path: {0}]")]
    CantReadGroupLeadersFile(String),
    #[error("The group leaders file is malformed [path: {0}]")]
    MalformedGroupLeadersFile(String),
}
