//! Side-channel error type.
//!
//! Every failure on the interception path is one of these. They are logged at
//! debug level inside the detached task and never reach the caller of the
//! wrapped primitive.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterceptError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),

    /// The primitive produced no response (e.g. the worker thread died).
    #[error("no response: {0}")]
    NoResponse(String),

    /// Response body was not valid JSON.
    #[error("body is not JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response body was empty.
    #[error("empty body")]
    EmptyBody,
}

pub type Result<T> = std::result::Result<T, InterceptError>;
