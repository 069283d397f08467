use async_trait::async_trait;

use crate::modules::funds::core::model::{Fund, FundFilter, FundPatch, FundStatus, FundStatusFilter, NewFund};
use crate::shared::core::errors::RepositoryError;
use crate::shared::core::pagination::Page;

#[async_trait]
pub trait FundRepository {
    async fn list(&self, filter: &FundFilter, page: Page) -> Result<Vec<Fund>, RepositoryError>;

    async fn status(&self, filter: &FundStatusFilter) -> Result<FundStatus, RepositoryError>;

    /// Inserts funds whose name is not stored yet, creating missing types and focuses.
    /// Returns the number of funds inserted.
    async fn import(&self, funds: Vec<NewFund>) -> Result<u64, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn update(&self, id: i64, patch: FundPatch) -> Result<Option<Fund>, RepositoryError>;
}
