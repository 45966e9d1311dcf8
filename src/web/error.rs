use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WebError {
    #[error("Client couldn't be created.")]
    CantCreateClient,
    #[error("Posted inputs don't match the members to complete [index: {0}]")]
    InputsMismatch(usize),
}
