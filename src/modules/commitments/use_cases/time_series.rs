use crate::modules::commitments::core::model::{CommitmentFilter, TimeSeries};
use crate::modules::commitments::core::series::group_series;
use crate::modules::commitments::ports::CommitmentRepository;
use crate::shared::core::errors::RepositoryError;

pub async fn time_series(
    repository: &(dyn CommitmentRepository + Send + Sync),
    filter: &CommitmentFilter,
) -> Result<Vec<TimeSeries>, RepositoryError> {
    let aggregated = filter.countries.as_ref().is_none_or(Vec::is_empty);
    let rows = repository.time_series(filter).await?;
    Ok(group_series(rows, aggregated))
}
