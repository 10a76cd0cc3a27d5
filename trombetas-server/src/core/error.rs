use thiserror::Error;

use crate::utils::AppError;

/// Startup and serve failures
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    App(#[from] AppError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
