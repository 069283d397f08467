use std::sync::Arc;

use sqlx::SqlitePool;

use crate::modules::commitments::adapters::outbound::sqlite::SqliteCommitmentRepository;
use crate::modules::commitments::ports::CommitmentRepository;
use crate::modules::fund_classifications::adapters::outbound::sqlite::SqliteClassificationRepository;
use crate::modules::fund_classifications::ports::ClassificationRepository;
use crate::modules::fund_projects::adapters::outbound::sqlite::SqliteFundProjectRepository;
use crate::modules::fund_projects::ports::FundProjectRepository;
use crate::modules::funds::adapters::outbound::sqlite::SqliteFundRepository;
use crate::modules::funds::ports::FundRepository;
use crate::modules::geography::adapters::outbound::sqlite::SqliteGeographyQueries;
use crate::modules::geography::ports::GeographyQueries;
use crate::modules::projects::adapters::outbound::sqlite::SqliteProjectQueries;
use crate::modules::projects::ports::ProjectQueries;
use crate::shared::infrastructure::tabular::UploadSettings;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub funds: Arc<dyn FundRepository + Send + Sync>,
    pub classifications: Arc<dyn ClassificationRepository + Send + Sync>,
    pub geography: Arc<dyn GeographyQueries + Send + Sync>,
    pub fund_projects: Arc<dyn FundProjectRepository + Send + Sync>,
    pub commitments: Arc<dyn CommitmentRepository + Send + Sync>,
    pub projects: Arc<dyn ProjectQueries + Send + Sync>,
    pub upload_settings: Arc<UploadSettings>,
}

impl AppState {
    /// Wires every port to its SQLite adapter on a shared pool.
    pub fn sqlite(pool: SqlitePool, upload_settings: UploadSettings) -> Self {
        Self {
            funds: Arc::new(SqliteFundRepository::new(pool.clone())),
            classifications: Arc::new(SqliteClassificationRepository::new(pool.clone())),
            geography: Arc::new(SqliteGeographyQueries::new(pool.clone())),
            fund_projects: Arc::new(SqliteFundProjectRepository::new(pool.clone())),
            commitments: Arc::new(SqliteCommitmentRepository::new(pool.clone())),
            projects: Arc::new(SqliteProjectQueries::new(pool.clone())),
            upload_settings: Arc::new(upload_settings),
            pool,
        }
    }
}
