use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::modules::fund_projects::core::model::{FundProject, FundProjectFilter, NewFundProject};
use crate::modules::fund_projects::ports::FundProjectRepository;
use crate::shared::core::errors::RepositoryError;
use crate::shared::core::pagination::Page;
use crate::shared::infrastructure::database::{IdCache, NamedTable, push_in_filter};

#[derive(Debug, Clone)]
pub struct SqliteFundProjectRepository {
    pool: SqlitePool,
}

impl SqliteFundProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Funds created by a project import carry no classification or amounts.
async fn get_or_create_fund(conn: &mut SqliteConnection, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query("INSERT INTO funds (fund_name) VALUES (?) ON CONFLICT (fund_name) DO NOTHING")
        .bind(name)
        .execute(&mut *conn)
        .await?;
    sqlx::query_scalar("SELECT id FROM funds WHERE fund_name = ?")
        .bind(name)
        .fetch_one(&mut *conn)
        .await
}

#[async_trait]
impl FundProjectRepository for SqliteFundProjectRepository {
    async fn list(&self, filter: &FundProjectFilter, page: Page) -> Result<Vec<FundProject>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT p.id, p.name, f.fund_name, c.name AS country_name, r.name AS region \
             FROM projects p \
             LEFT JOIN funds f ON f.id = p.fund_id \
             LEFT JOIN countries c ON c.id = p.country_id \
             LEFT JOIN regions r ON r.id = c.region_id \
             WHERE 1 = 1",
        );
        push_in_filter(&mut qb, "p.fund_id", &filter.funds);
        push_in_filter(&mut qb, "p.country_id", &filter.countries);
        push_in_filter(&mut qb, "c.region_id", &filter.regions);
        qb.push(" ORDER BY p.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        Ok(qb.build_query_as::<FundProject>().fetch_all(&self.pool).await?)
    }

    async fn import(&self, projects: Vec<NewFundProject>) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = IdCache::new();
        let mut funds: HashMap<String, i64> = HashMap::new();
        let mut inserted = 0;

        for project in projects {
            let fund_id = match project.fund_name {
                Some(name) => match funds.get(&name) {
                    Some(id) => Some(*id),
                    None => {
                        let id = get_or_create_fund(&mut tx, &name).await?;
                        funds.insert(name, id);
                        Some(id)
                    }
                },
                None => None,
            };
            let country_id = match project.country_name.as_deref() {
                Some(name) => Some(ids.get_or_create(&mut tx, NamedTable::Countries, name).await?),
                None => None,
            };

            let exists: Option<i64> =
                sqlx::query_scalar("SELECT id FROM projects WHERE name = ? AND fund_id IS ?")
                    .bind(&project.name)
                    .bind(fund_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if exists.is_some() {
                continue;
            }

            sqlx::query("INSERT INTO projects (name, fund_id, country_id) VALUES (?, ?, ?)")
                .bind(&project.name)
                .bind(fund_id)
                .bind(country_id)
                .execute(&mut *tx)
                .await?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
