use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::modules::projects::core::model::{ProjectPage, ProjectSummary, search_page};
use crate::modules::projects::ports::ProjectQueries;
use crate::shared::core::errors::RepositoryError;
use crate::shared::core::pagination::Page;

const WITH_COMMITMENTS: &str =
    "FROM projects p WHERE EXISTS (SELECT 1 FROM commitments cm WHERE cm.project_id = p.id)";

#[derive(Debug, Clone)]
pub struct SqliteProjectQueries {
    pool: SqlitePool,
}

impl SqliteProjectQueries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectQueries for SqliteProjectQueries {
    async fn with_commitments(&self) -> Result<Vec<ProjectSummary>, RepositoryError> {
        let sql = format!("SELECT p.id, p.name {WITH_COMMITMENTS} ORDER BY p.name, p.id");
        Ok(sqlx::query_as::<_, ProjectSummary>(&sql).fetch_all(&self.pool).await?)
    }

    async fn search_with_commitments(
        &self,
        search: Option<&str>,
        page: Page,
    ) -> Result<ProjectPage, RepositoryError> {
        Ok(search_page(self.with_commitments().await?, search, page))
    }
}

#[cfg(test)]
mod projects_sqlite_queries_tests {
    use super::*;
    use crate::shared::infrastructure::database::connect_in_memory;
    use rstest::{fixture, rstest};

    #[fixture]
    async fn before_each() -> SqliteProjectQueries {
        let pool = connect_in_memory().await.expect("in-memory database");
        sqlx::raw_sql(
            "INSERT INTO projects (name) VALUES ('Solar mini grids'), ('Coastal resilience'),
                 ('Unfunded idea'), ('SOLAR rooftops'), ('100% renewable'), ('ÉCOLE Verte');
             INSERT INTO commitments (year, project_id)
                 VALUES (2020, 1), (2021, 1), (2020, 2), (2020, 4), (2022, 5), (2023, 6);",
        )
        .execute(&pool)
        .await
        .expect("seed");
        SqliteProjectQueries::new(pool)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_distinct_projects_with_commitments(#[future] before_each: SqliteProjectQueries) {
        let queries = before_each.await;

        let projects = queries.with_commitments().await.unwrap();

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["100% renewable", "Coastal resilience", "SOLAR rooftops", "Solar mini grids", "ÉCOLE Verte"]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_search_case_insensitively_and_count_all_matches(
        #[future] before_each: SqliteProjectQueries,
    ) {
        let queries = before_each.await;

        let page = queries.search_with_commitments(Some("solar"), Page::new(1, 1)).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.projects, vec![ProjectSummary { id: 1, name: "Solar mini grids".into() }]);
        assert_eq!((page.limit, page.offset), (1, 1));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_match_wildcards_literally(#[future] before_each: SqliteProjectQueries) {
        let queries = before_each.await;

        let page = queries.search_with_commitments(Some("%"), Page::new(20, 0)).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.projects[0].name, "100% renewable");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fold_accented_capitals(#[future] before_each: SqliteProjectQueries) {
        let queries = before_each.await;

        let page = queries.search_with_commitments(Some("école"), Page::new(20, 0)).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.projects[0].name, "ÉCOLE Verte");
    }
}
