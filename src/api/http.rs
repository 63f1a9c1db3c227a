//! Blocking HTTP client for the transaction API

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use super::{ClientError, TransactionApi};
use crate::error::{WalletError, WalletResult};
use crate::models::TransactionRecord;

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: Url,
    token: Option<String>,
    http: Client,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> WalletResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| WalletError::Config(format!("invalid api_base_url: {err}")))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| WalletError::Config(format!("could not build HTTP client: {err}")))?;

        Ok(Self {
            base_url,
            token: None,
            http,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }
}

impl TransactionApi for HttpApiClient {
    fn submit_transaction(&self, record: &TransactionRecord) -> Result<(), ClientError> {
        let endpoint = self.endpoint("transactions")?;
        debug!(%endpoint, id = %record.id, "posting transaction");

        let mut request = self.http.post(endpoint).json(record);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let res = request.send()?;

        let status = res.status();
        if status.is_success() {
            info!(id = %record.id, "transaction accepted");
            return Ok(());
        }

        let body = res
            .json::<ErrorResponse>()
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        Err(match status.as_u16() {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound,
            409 => ClientError::Conflict(body),
            400 | 422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        })
    }
}
