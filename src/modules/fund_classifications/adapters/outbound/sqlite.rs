use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::modules::fund_classifications::core::model::{Classification, ClassificationKind};
use crate::modules::fund_classifications::ports::ClassificationRepository;
use crate::shared::core::errors::RepositoryError;

#[derive(Debug, Clone)]
pub struct SqliteClassificationRepository {
    pool: SqlitePool,
}

impl SqliteClassificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find(
        &self,
        kind: ClassificationKind,
        id: i64,
    ) -> Result<Option<Classification>, RepositoryError> {
        let sql = format!("SELECT id, name FROM {} WHERE id = ?", kind.table());
        Ok(sqlx::query_as::<_, Classification>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[async_trait]
impl ClassificationRepository for SqliteClassificationRepository {
    async fn list(&self, kind: ClassificationKind) -> Result<Vec<Classification>, RepositoryError> {
        let sql = format!("SELECT id, name FROM {} ORDER BY id", kind.table());
        Ok(sqlx::query_as::<_, Classification>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete(&self, kind: ClassificationKind, id: i64) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let exists_sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", kind.table());
        let exists: i64 = sqlx::query_scalar(&exists_sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if exists == 0 {
            return Ok(false);
        }

        let usage_sql = format!("SELECT COUNT(*) FROM funds WHERE {} = ?", kind.fund_column());
        let usage: i64 = sqlx::query_scalar(&usage_sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if usage > 0 {
            return Err(RepositoryError::InUse(format!(
                "Cannot delete {} in use by funds",
                kind.label().to_lowercase()
            )));
        }

        let delete_sql = format!("DELETE FROM {} WHERE id = ?", kind.table());
        sqlx::query(&delete_sql).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn rename(
        &self,
        kind: ClassificationKind,
        id: i64,
        name: Option<String>,
    ) -> Result<Option<Classification>, RepositoryError> {
        let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
            return self.find(kind, id).await;
        };

        let sql = format!("UPDATE {} SET name = ? WHERE id = ?", kind.table());
        let result = sqlx::query(&sql)
            .bind(&name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::on_unique_violation(e, format!("{} '{name}' already exists", kind.label()))
            })?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find(kind, id).await
    }
}
