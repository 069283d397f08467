use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::modules::commitments::core::model::{
    Commitment, CommitmentFilter, ExportRow, Kpis, NewCommitment, ObjectiveFilter, ObjectiveTotal,
    SankeyFilter, SankeySlice, SeriesRow,
};
use crate::shared::core::errors::RepositoryError;
use crate::shared::core::pagination::Page;

#[async_trait]
pub trait CommitmentRepository {
    async fn list(&self, filter: &CommitmentFilter, page: Page) -> Result<Vec<Commitment>, RepositoryError>;

    /// Stores the commitments, creating missing projects, countries and funding entities.
    async fn import(&self, commitments: Vec<NewCommitment>) -> Result<u64, RepositoryError>;

    async fn totals_by_objective(&self, filter: &ObjectiveFilter) -> Result<Vec<ObjectiveTotal>, RepositoryError>;

    /// Yearly amounts, one series per recipient country when `filter.countries`
    /// is not empty, otherwise aggregated. Ordered by series then year.
    async fn time_series(&self, filter: &CommitmentFilter) -> Result<Vec<SeriesRow>, RepositoryError>;

    async fn years(&self) -> Result<Vec<i64>, RepositoryError>;

    async fn kpis(&self) -> Result<Kpis, RepositoryError>;

    /// Ranks projects by weighted amount and returns the flows of one page of them.
    async fn sankey(&self, filter: &SankeyFilter, page: Page) -> Result<SankeySlice, RepositoryError>;

    /// Every commitment of `year`, read lazily.
    fn export(&self, year: i64) -> BoxStream<'static, Result<ExportRow, RepositoryError>>;
}
