use async_trait::async_trait;

use crate::modules::fund_classifications::core::model::{Classification, ClassificationKind};
use crate::shared::core::errors::RepositoryError;

#[async_trait]
pub trait ClassificationRepository {
    async fn list(&self, kind: ClassificationKind) -> Result<Vec<Classification>, RepositoryError>;

    /// `Ok(false)` when the id is unknown; `RepositoryError::InUse` when a fund references it.
    async fn delete(&self, kind: ClassificationKind, id: i64) -> Result<bool, RepositoryError>;

    async fn rename(
        &self,
        kind: ClassificationKind,
        id: i64,
        name: Option<String>,
    ) -> Result<Option<Classification>, RepositoryError>;
}
