//! Escrow transactions service client
//!
//! Thin reqwest wrapper over the external REST API that owns all durable
//! state. Single request per operation, no retries; any non-2xx status or
//! transport failure maps to an `ApiError` the conversation core turns into
//! a retry prompt.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use crate::application::errors::ApiError;
use crate::domain::entities::{GroupLink, NewTransaction, Transaction, TransactionStatus};
use crate::domain::traits::EscrowApi;

/// Default base address of the transactions API
pub const DEFAULT_BASE_URL: &str = "http://0.0.0.0:5000/api";

/// Cap on any single request, so a slow API can't stall the dispatch loop
/// indefinitely
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpEscrowApi {
    base_url: String,
    client: Client,
}

impl HttpEscrowApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl EscrowApi for HttpEscrowApi {
    async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction, ApiError> {
        let response = self
            .client
            .post(self.url("transactions"))
            .json(new)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn update_status(&self, id: i64, status: TransactionStatus) -> Result<(), ApiError> {
        let response = self
            .client
            .patch(self.url(&format!("transactions/{}", id)))
            .json(&json!({ "status": status.as_str() }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .client
            .get(self.url("transactions"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn list_group_links(&self) -> Result<Vec<GroupLink>, ApiError> {
        let response = self
            .client
            .get(self.url("group-links"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
