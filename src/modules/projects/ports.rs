use async_trait::async_trait;

use crate::modules::projects::core::model::{ProjectPage, ProjectSummary};
use crate::shared::core::errors::RepositoryError;
use crate::shared::core::pagination::Page;

/// Projects that received at least one commitment.
#[async_trait]
pub trait ProjectQueries {
    async fn with_commitments(&self) -> Result<Vec<ProjectSummary>, RepositoryError>;

    /// Case-insensitive substring search on the project name.
    async fn search_with_commitments(
        &self,
        search: Option<&str>,
        page: Page,
    ) -> Result<ProjectPage, RepositoryError>;
}
