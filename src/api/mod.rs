//! Remote API contract
//!
//! The draft engine only needs to hand a validated record to something that
//! can submit it. Login, registration and listing calls live outside the
//! core.

pub mod http;

use thiserror::Error;

use crate::models::TransactionRecord;

pub use http::HttpApiClient;

/// Failure reported by the remote API client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not authenticated")]
    Unauthorized,
    #[error("access denied")]
    Forbidden,
    #[error("endpoint not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("rejected by server: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Anything that can accept a submitted transaction
pub trait TransactionApi {
    fn submit_transaction(&self, record: &TransactionRecord) -> Result<(), ClientError>;
}
