use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::modules::geography::core::model::{Country, Region};
use crate::modules::geography::ports::GeographyQueries;
use crate::shared::core::errors::RepositoryError;

#[derive(Debug, Clone)]
pub struct SqliteGeographyQueries {
    pool: SqlitePool,
}

impl SqliteGeographyQueries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeographyQueries for SqliteGeographyQueries {
    async fn regions(&self) -> Result<Vec<Region>, RepositoryError> {
        Ok(sqlx::query_as::<_, Region>("SELECT id, name FROM regions ORDER BY id")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn countries(&self) -> Result<Vec<Country>, RepositoryError> {
        Ok(sqlx::query_as::<_, Country>(
            "SELECT c.id, c.name, r.name AS region FROM countries c \
             LEFT JOIN regions r ON r.id = c.region_id \
             ORDER BY c.name",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn recipient_countries(&self) -> Result<Vec<Country>, RepositoryError> {
        Ok(sqlx::query_as::<_, Country>(
            "SELECT c.id, c.name, r.name AS region FROM countries c \
             LEFT JOIN regions r ON r.id = c.region_id \
             WHERE EXISTS (SELECT 1 FROM commitments cm WHERE cm.recipient_country_id = c.id) \
             ORDER BY c.name",
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

#[cfg(test)]
mod geography_sqlite_queries_tests {
    use super::*;
    use crate::shared::infrastructure::database::connect_in_memory;
    use rstest::{fixture, rstest};

    #[fixture]
    async fn before_each() -> SqliteGeographyQueries {
        let pool = connect_in_memory().await.expect("in-memory database");
        sqlx::raw_sql(
            "INSERT INTO regions (name) VALUES ('South Asia'), ('Sub-Saharan Africa');
             INSERT INTO countries (name, region_id) VALUES ('Nepal', 1), ('Kenya', 2), ('Atlantis', NULL);
             INSERT INTO commitments (year, recipient_country_id) VALUES (2020, 2), (2021, 2);",
        )
        .execute(&pool)
        .await
        .expect("seed");
        SqliteGeographyQueries::new(pool)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_regions_by_id(#[future] before_each: SqliteGeographyQueries) {
        let queries = before_each.await;

        let regions = queries.regions().await.unwrap();

        let names: Vec<_> = regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["South Asia", "Sub-Saharan Africa"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_countries_by_name_with_their_region(
        #[future] before_each: SqliteGeographyQueries,
    ) {
        let queries = before_each.await;

        let countries = queries.countries().await.unwrap();

        assert_eq!(
            countries,
            vec![
                Country { id: 3, name: "Atlantis".into(), region: None },
                Country { id: 2, name: "Kenya".into(), region: Some("Sub-Saharan Africa".into()) },
                Country { id: 1, name: "Nepal".into(), region: Some("South Asia".into()) },
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_only_list_countries_with_commitments_as_recipients(
        #[future] before_each: SqliteGeographyQueries,
    ) {
        let queries = before_each.await;

        let recipients = queries.recipient_countries().await.unwrap();

        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].name, "Kenya");
    }
}
