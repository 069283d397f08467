use async_trait::async_trait;

use crate::modules::fund_projects::core::model::{FundProject, FundProjectFilter, NewFundProject};
use crate::shared::core::errors::RepositoryError;
use crate::shared::core::pagination::Page;

#[async_trait]
pub trait FundProjectRepository {
    async fn list(&self, filter: &FundProjectFilter, page: Page) -> Result<Vec<FundProject>, RepositoryError>;

    /// Inserts projects not yet stored for their fund, creating missing funds and countries.
    /// Returns the number of projects inserted.
    async fn import(&self, projects: Vec<NewFundProject>) -> Result<u64, RepositoryError>;
}
