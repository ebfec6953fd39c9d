use async_trait::async_trait;

use crate::application::errors::ApiError;
use crate::domain::entities::{GroupLink, NewTransaction, Transaction, TransactionStatus};

/// EscrowApi trait - abstraction over the external transactions service.
///
/// Every operation is a single request with no retries; any non-2xx status
/// or transport failure comes back as `ApiError` for the caller to turn
/// into a user-facing retry prompt.
#[async_trait]
pub trait EscrowApi: Send + Sync {
    async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction, ApiError>;

    async fn update_status(&self, id: i64, status: TransactionStatus) -> Result<(), ApiError>;

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError>;

    async fn list_group_links(&self) -> Result<Vec<GroupLink>, ApiError>;
}
