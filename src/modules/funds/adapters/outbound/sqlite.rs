use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::modules::funds::core::model::{Fund, FundFilter, FundPatch, FundStatus, FundStatusFilter, NewFund};
use crate::modules::funds::ports::FundRepository;
use crate::shared::core::errors::RepositoryError;
use crate::shared::core::pagination::Page;
use crate::shared::infrastructure::database::{IdCache, NamedTable, push_in_filter};

const SELECT_FUNDS: &str = "SELECT f.id, f.fund_name, ft.name AS fund_type, ff.name AS fund_focus, \
     f.pledge, f.deposit, f.approval, f.disbursement, f.projects_approved \
     FROM funds f \
     LEFT JOIN fund_types ft ON ft.id = f.fund_type_id \
     LEFT JOIN fund_focuses ff ON ff.id = f.fund_focus_id \
     WHERE 1 = 1";

#[derive(Debug, Clone)]
pub struct SqliteFundRepository {
    pool: SqlitePool,
}

impl SqliteFundRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: i64) -> Result<Option<Fund>, RepositoryError> {
        let sql = format!("{SELECT_FUNDS} AND f.id = ?");
        Ok(sqlx::query_as::<_, Fund>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[async_trait]
impl FundRepository for SqliteFundRepository {
    async fn list(&self, filter: &FundFilter, page: Page) -> Result<Vec<Fund>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_FUNDS);
        push_in_filter(&mut qb, "f.fund_type_id", &filter.fund_types);
        push_in_filter(&mut qb, "f.fund_focus_id", &filter.fund_focuses);
        qb.push(" ORDER BY f.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        Ok(qb.build_query_as::<Fund>().fetch_all(&self.pool).await?)
    }

    async fn status(&self, filter: &FundStatusFilter) -> Result<FundStatus, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT CAST(COALESCE(SUM(f.pledge), 0) AS REAL) AS total_pledge, \
             CAST(COALESCE(SUM(f.deposit), 0) AS REAL) AS total_deposit, \
             CAST(COALESCE(SUM(f.approval), 0) AS REAL) AS total_approval \
             FROM funds f WHERE 1 = 1",
        );
        push_in_filter(&mut qb, "f.id", &filter.funds);
        push_in_filter(&mut qb, "f.fund_type_id", &filter.fund_types);
        push_in_filter(&mut qb, "f.fund_focus_id", &filter.fund_focuses);

        Ok(qb.build_query_as::<FundStatus>().fetch_one(&self.pool).await?)
    }

    async fn import(&self, funds: Vec<NewFund>) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = IdCache::new();
        let mut inserted = 0;

        for fund in funds {
            let fund_type_id = match fund.fund_type.as_deref() {
                Some(name) => Some(ids.get_or_create(&mut tx, NamedTable::FundTypes, name).await?),
                None => None,
            };
            let fund_focus_id = match fund.fund_focus.as_deref() {
                Some(name) => Some(ids.get_or_create(&mut tx, NamedTable::FundFocuses, name).await?),
                None => None,
            };

            let result = sqlx::query(
                "INSERT INTO funds (fund_name, fund_type_id, fund_focus_id, pledge, deposit, \
                 approval, disbursement, projects_approved) VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
                 ON CONFLICT (fund_name) DO NOTHING",
            )
            .bind(&fund.fund_name)
            .bind(fund_type_id)
            .bind(fund_focus_id)
            .bind(fund.pledge)
            .bind(fund.deposit)
            .bind(fund.approval)
            .bind(fund.disbursement)
            .bind(fund.projects_approved)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM funds WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, id: i64, patch: FundPatch) -> Result<Option<Fund>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM funds WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        // Unknown classification names are ignored rather than created.
        let fund_type_id: Option<i64> = match patch.fund_type.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => sqlx::query_scalar("SELECT id FROM fund_types WHERE name = ?")
                .bind(name)
                .fetch_optional(&mut *tx)
                .await?,
            None => None,
        };
        let fund_focus_id: Option<i64> = match patch.fund_focus.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => sqlx::query_scalar("SELECT id FROM fund_focuses WHERE name = ?")
                .bind(name)
                .fetch_optional(&mut *tx)
                .await?,
            None => None,
        };

        sqlx::query(
            "UPDATE funds SET \
             fund_name = COALESCE(?, fund_name), \
             fund_type_id = COALESCE(?, fund_type_id), \
             fund_focus_id = COALESCE(?, fund_focus_id), \
             pledge = COALESCE(?, pledge), \
             deposit = COALESCE(?, deposit), \
             approval = COALESCE(?, approval), \
             disbursement = COALESCE(?, disbursement), \
             projects_approved = COALESCE(?, projects_approved) \
             WHERE id = ?",
        )
        .bind(patch.fund_name)
        .bind(fund_type_id)
        .bind(fund_focus_id)
        .bind(patch.pledge)
        .bind(patch.deposit)
        .bind(patch.approval)
        .bind(patch.disbursement)
        .bind(patch.projects_approved)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::on_unique_violation(e, "A fund with this name already exists"))?;

        tx.commit().await?;
        self.find(id).await
    }
}
