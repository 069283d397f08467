use crate::modules::commitments::core::model::{SankeyFilter, SankeyPage, SankeyView};
use crate::modules::commitments::core::sankey::sankey_links;
use crate::modules::commitments::ports::CommitmentRepository;
use crate::shared::core::errors::RepositoryError;
use crate::shared::core::pagination::Page;

/// One page of the ranked project flows, ready for the diagram.
pub async fn sankey_page(
    repository: &(dyn CommitmentRepository + Send + Sync),
    filter: &SankeyFilter,
    page: Page,
    view: SankeyView,
) -> Result<SankeyPage, RepositoryError> {
    let slice = repository.sankey(filter, page).await?;
    Ok(SankeyPage {
        data: sankey_links(&slice.ranking, &slice.flows, view),
        total_projects: slice.total_projects,
        limit: page.limit,
        offset: page.offset,
    })
}
