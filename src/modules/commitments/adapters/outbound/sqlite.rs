use std::collections::HashMap;

use async_stream::try_stream;
use async_trait::async_trait;
use futures::TryStreamExt;
use futures::stream::BoxStream;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::modules::commitments::core::model::{
    Commitment, CommitmentFilter, ExportRow, Kpis, NewCommitment, ObjectiveFilter, ObjectiveTotal,
    SankeyFilter, SankeyFlow, SankeySlice, SeriesRow,
};
use crate::modules::commitments::ports::CommitmentRepository;
use crate::shared::core::errors::RepositoryError;
use crate::shared::core::pagination::Page;
use crate::shared::infrastructure::database::{IdCache, NamedTable, push_in_filter};

const EXPORT_SQL: &str = "SELECT cm.id, cm.year, cm.amount_usd_thousand, cm.adaptation_amount_usd_thousand, \
     cm.mitigation_amount_usd_thousand, cm.overlap_amount_usd_thousand, \
     p.name AS project, c.name AS recipient_country, pr.name AS provider, ch.name AS channel_of_delivery \
     FROM commitments cm \
     LEFT JOIN projects p ON p.id = cm.project_id \
     LEFT JOIN countries c ON c.id = cm.recipient_country_id \
     LEFT JOIN funding_entities pr ON pr.id = cm.provider_id \
     LEFT JOIN funding_entities ch ON ch.id = cm.channel_id \
     WHERE cm.year = ? ORDER BY cm.id";

#[derive(Debug, Clone)]
pub struct SqliteCommitmentRepository {
    pool: SqlitePool,
}

impl SqliteCommitmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn has_values(values: &Option<Vec<i64>>) -> bool {
    values.as_ref().is_some_and(|v| !v.is_empty())
}

/// Filters shared by the three sankey queries. Expects `commitments cm` in scope.
fn push_sankey_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &SankeyFilter) {
    qb.push(" AND cm.project_id IS NOT NULL");
    push_in_filter(qb, "cm.year", &filter.years);
    push_in_filter(qb, "cm.recipient_country_id", &filter.country_ids);
    push_in_filter(qb, "cm.project_id", &filter.project_ids);
    if filter.objective.positive_only() {
        qb.push(format_args!(" AND cm.{} > 0", filter.objective.weight_column()));
    }
}

/// Projects are matched by name; the first one stored wins.
async fn get_or_create_project(
    conn: &mut SqliteConnection,
    name: &str,
    country_id: Option<i64>,
) -> Result<i64, sqlx::Error> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM projects WHERE name = ? ORDER BY id LIMIT 1")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    if let Some(id) = existing {
        return Ok(id);
    }
    sqlx::query_scalar("INSERT INTO projects (name, country_id) VALUES (?, ?) RETURNING id")
        .bind(name)
        .bind(country_id)
        .fetch_one(&mut *conn)
        .await
}

async fn optional_id(
    ids: &mut IdCache,
    conn: &mut SqliteConnection,
    table: NamedTable,
    name: Option<&str>,
) -> Result<Option<i64>, sqlx::Error> {
    match name {
        Some(name) => Ok(Some(ids.get_or_create(conn, table, name).await?)),
        None => Ok(None),
    }
}

#[async_trait]
impl CommitmentRepository for SqliteCommitmentRepository {
    async fn list(&self, filter: &CommitmentFilter, page: Page) -> Result<Vec<Commitment>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT cm.id, cm.year, cm.amount_usd_thousand, ch.name AS channel_of_delivery, \
             pr.name AS provider_country, c.name AS recipient_country, p.name AS project \
             FROM commitments cm \
             LEFT JOIN funding_entities ch ON ch.id = cm.channel_id \
             LEFT JOIN funding_entities pr ON pr.id = cm.provider_id \
             LEFT JOIN countries c ON c.id = cm.recipient_country_id \
             LEFT JOIN projects p ON p.id = cm.project_id \
             WHERE 1 = 1",
        );
        push_in_filter(&mut qb, "cm.year", &filter.years);
        push_in_filter(&mut qb, "cm.recipient_country_id", &filter.countries);
        qb.push(" ORDER BY cm.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        Ok(qb.build_query_as::<Commitment>().fetch_all(&self.pool).await?)
    }

    async fn import(&self, commitments: Vec<NewCommitment>) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = IdCache::new();
        let mut projects: HashMap<String, i64> = HashMap::new();
        let mut inserted = 0;

        for commitment in commitments {
            let recipient_id = optional_id(
                &mut ids,
                &mut tx,
                NamedTable::Countries,
                commitment.recipient_country.as_deref(),
            )
            .await?;
            let provider_id =
                optional_id(&mut ids, &mut tx, NamedTable::FundingEntities, commitment.provider.as_deref()).await?;
            let channel_id = optional_id(
                &mut ids,
                &mut tx,
                NamedTable::FundingEntities,
                commitment.channel_of_delivery.as_deref(),
            )
            .await?;
            let project_id = match commitment.project {
                Some(name) => match projects.get(&name) {
                    Some(id) => Some(*id),
                    None => {
                        let id = get_or_create_project(&mut tx, &name, recipient_id).await?;
                        projects.insert(name, id);
                        Some(id)
                    }
                },
                None => None,
            };

            sqlx::query(
                "INSERT INTO commitments (year, amount_usd_thousand, adaptation_amount_usd_thousand, \
                 mitigation_amount_usd_thousand, overlap_amount_usd_thousand, project_id, \
                 recipient_country_id, provider_id, channel_id) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(commitment.year)
            .bind(commitment.amount_usd_thousand)
            .bind(commitment.adaptation_amount_usd_thousand)
            .bind(commitment.mitigation_amount_usd_thousand)
            .bind(commitment.overlap_amount_usd_thousand)
            .bind(project_id)
            .bind(recipient_id)
            .bind(provider_id)
            .bind(channel_id)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn totals_by_objective(&self, filter: &ObjectiveFilter) -> Result<Vec<ObjectiveTotal>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT cm.year, \
             CAST(COALESCE(SUM(cm.adaptation_amount_usd_thousand), 0) AS REAL) AS total_adaptation, \
             CAST(COALESCE(SUM(cm.mitigation_amount_usd_thousand), 0) AS REAL) AS total_mitigation \
             FROM commitments cm WHERE 1 = 1",
        );
        push_in_filter(&mut qb, "cm.year", &filter.years);
        push_in_filter(&mut qb, "cm.recipient_country_id", &filter.recipient_countries);
        qb.push(" GROUP BY cm.year ORDER BY cm.year");

        Ok(qb.build_query_as::<ObjectiveTotal>().fetch_all(&self.pool).await?)
    }

    async fn time_series(&self, filter: &CommitmentFilter) -> Result<Vec<SeriesRow>, RepositoryError> {
        let per_country = has_values(&filter.countries);
        let mut qb = QueryBuilder::<Sqlite>::new(if per_country {
            "SELECT c.name AS series, cm.year, CAST(SUM(cm.amount_usd_thousand) AS REAL) AS amount \
             FROM commitments cm JOIN countries c ON c.id = cm.recipient_country_id WHERE 1 = 1"
        } else {
            "SELECT NULL AS series, cm.year, CAST(SUM(cm.amount_usd_thousand) AS REAL) AS amount \
             FROM commitments cm WHERE 1 = 1"
        });
        push_in_filter(&mut qb, "cm.year", &filter.years);
        push_in_filter(&mut qb, "cm.recipient_country_id", &filter.countries);
        if per_country {
            qb.push(" GROUP BY c.id, c.name, cm.year ORDER BY c.name, cm.year");
        } else {
            qb.push(" GROUP BY cm.year ORDER BY cm.year");
        }

        Ok(qb.build_query_as::<SeriesRow>().fetch_all(&self.pool).await?)
    }

    async fn years(&self) -> Result<Vec<i64>, RepositoryError> {
        Ok(sqlx::query_scalar("SELECT DISTINCT year FROM commitments ORDER BY year")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn kpis(&self) -> Result<Kpis, RepositoryError> {
        Ok(sqlx::query_as::<_, Kpis>(
            "SELECT COUNT(DISTINCT project_id) AS total_projects, \
             COUNT(DISTINCT recipient_country_id) AS total_countries, \
             CAST(COALESCE(SUM(amount_usd_thousand), 0) AS REAL) AS total_amount_usd_thousand \
             FROM commitments",
        )
        .fetch_one(&self.pool)
        .await?)
    }

    async fn sankey(&self, filter: &SankeyFilter, page: Page) -> Result<SankeySlice, RepositoryError> {
        let weight = filter.objective.weight_column();

        let mut count = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(DISTINCT cm.project_id) FROM commitments cm WHERE 1 = 1",
        );
        push_sankey_filters(&mut count, filter);
        let total_projects: i64 = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut rank = QueryBuilder::<Sqlite>::new(
            "SELECT p.id FROM commitments cm JOIN projects p ON p.id = cm.project_id WHERE 1 = 1",
        );
        push_sankey_filters(&mut rank, filter);
        rank.push(format_args!(" GROUP BY p.id, p.name ORDER BY SUM(cm.{weight}) DESC, p.name LIMIT "))
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);
        let ranking: Vec<i64> = rank.build_query_scalar::<i64>().fetch_all(&self.pool).await?;

        if ranking.is_empty() {
            return Ok(SankeySlice { total_projects, ranking, flows: Vec::new() });
        }

        let mut flows = QueryBuilder::<Sqlite>::new(format!(
            "SELECT p.id AS project_id, p.name AS project, c.name AS country, cm.year, \
             CAST(SUM(cm.{weight}) AS REAL) AS amount \
             FROM commitments cm \
             JOIN projects p ON p.id = cm.project_id \
             LEFT JOIN countries c ON c.id = cm.recipient_country_id \
             WHERE 1 = 1"
        ));
        push_sankey_filters(&mut flows, filter);
        push_in_filter(&mut flows, "cm.project_id", &Some(ranking.clone()));
        flows.push(" GROUP BY p.id, p.name, cm.recipient_country_id, c.name, cm.year ORDER BY c.name, cm.year");
        let flows = flows.build_query_as::<SankeyFlow>().fetch_all(&self.pool).await?;

        Ok(SankeySlice { total_projects, ranking, flows })
    }

    fn export(&self, year: i64) -> BoxStream<'static, Result<ExportRow, RepositoryError>> {
        let pool = self.pool.clone();
        Box::pin(try_stream! {
            let mut rows = sqlx::query_as::<_, ExportRow>(EXPORT_SQL).bind(year).fetch(&pool);
            while let Some(row) = rows.try_next().await.map_err(RepositoryError::from)? {
                yield row;
            }
        })
    }
}
