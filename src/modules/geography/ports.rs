use async_trait::async_trait;

use crate::modules::geography::core::model::{Country, Region};
use crate::shared::core::errors::RepositoryError;

#[async_trait]
pub trait GeographyQueries {
    async fn regions(&self) -> Result<Vec<Region>, RepositoryError>;

    async fn countries(&self) -> Result<Vec<Country>, RepositoryError>;

    /// Countries that received at least one commitment.
    async fn recipient_countries(&self) -> Result<Vec<Country>, RepositoryError>;
}
