use crate::backend::error::BackendError;
use crate::leader::error::LeaderError;
use crate::web::error::WebError;
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Error while looking the group leader up.")]
    Leader(#[from] LeaderError),
    #[error("Error while working with the attendance backend.")]
    Backend(#[from] BackendError),
    #[error("An error has been encountered while preparing requests onto another server.")]
    Web(#[from] WebError),
}
