//! Top-level error type for itemsvc-server

use thiserror::Error;

use crate::db::StartupError;
use crate::http::ServerError;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that end the process
#[derive(Error, Debug)]
pub enum Error {
    /// The database never became ready; the listener was not opened
    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error("server error: {0}")]
    Server(#[from] ServerError),
}
