// SQLite connection handling and small query helpers shared by the adapters.
//
// Responsibilities
// - Open the pool and apply the embedded migrations.
// - Provide the get-or-create by name primitive used by every import.
// - Provide the optional `IN (...)` filter builder used by the listing queries.

pub mod seeding;

use std::collections::HashMap;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

/// Open a pool on `database_url`, creating the database file when it is missing.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(sqlx::Error::from)
}

/// Creates a migrated in-memory database. Every connection to `:memory:` is a
/// separate database, so the pool is pinned to a single connection that never expires.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Tables whose rows are identified by a unique `name` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedTable {
    Regions,
    Countries,
    FundTypes,
    FundFocuses,
    FundingEntities,
}

impl NamedTable {
    pub fn as_str(self) -> &'static str {
        match self {
            NamedTable::Regions => "regions",
            NamedTable::Countries => "countries",
            NamedTable::FundTypes => "fund_types",
            NamedTable::FundFocuses => "fund_focuses",
            NamedTable::FundingEntities => "funding_entities",
        }
    }
}

pub async fn get_or_create(
    conn: &mut SqliteConnection,
    table: NamedTable,
    name: &str,
) -> Result<i64, sqlx::Error> {
    let insert = format!(
        "INSERT INTO {} (name) VALUES (?) ON CONFLICT (name) DO NOTHING",
        table.as_str()
    );
    sqlx::query(&insert).bind(name).execute(&mut *conn).await?;

    let select = format!("SELECT id FROM {} WHERE name = ?", table.as_str());
    sqlx::query_scalar::<_, i64>(&select)
        .bind(name)
        .fetch_one(&mut *conn)
        .await
}

/// Memoizes `get_or_create` for the lifetime of one import.
#[derive(Debug, Default)]
pub struct IdCache {
    ids: HashMap<(NamedTable, String), i64>,
}

impl IdCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_create(
        &mut self,
        conn: &mut SqliteConnection,
        table: NamedTable,
        name: &str,
    ) -> Result<i64, sqlx::Error> {
        if let Some(id) = self.ids.get(&(table, name.to_string())) {
            return Ok(*id);
        }
        let id = get_or_create(conn, table, name).await?;
        self.ids.insert((table, name.to_string()), id);
        Ok(id)
    }
}

/// Appends ` AND <column> IN (?, ...)` when `values` holds at least one id.
/// A missing or empty list means "no filter".
pub fn push_in_filter(qb: &mut QueryBuilder<'_, Sqlite>, column: &str, values: &Option<Vec<i64>>) {
    let Some(values) = values.as_ref().filter(|v| !v.is_empty()) else {
        return;
    };
    qb.push(" AND ").push(column).push(" IN (");
    let mut separated = qb.separated(", ");
    for value in values {
        separated.push_bind(*value);
    }
    separated.push_unseparated(")");
}
