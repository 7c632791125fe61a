use async_trait::async_trait;
use sqlx::{postgres::PgArguments, PgPool};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseManager;
use crate::database::models::{Product, ProductDocument, ProductUpdate};
use crate::database::store::{ProductStore, StoreError};
use crate::filter::{Filter, FilterValue};

const TABLE_NAME: &str = "productos";
const COLUMNS: [&str; 5] = ["id", "identifier", "name", "amount", "category"];
const RETURNING: &str = "RETURNING \"id\", \"identifier\", \"name\", \"amount\", \"category\"";

const CREATE_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS "productos" (
    "id" UUID PRIMARY KEY,
    "identifier" DOUBLE PRECISION,
    "name" TEXT,
    "amount" DOUBLE PRECISION,
    "category" TEXT,
    "created_at" TIMESTAMPTZ NOT NULL DEFAULT now()
)"#;
const CREATE_INDEXES: [&str; 2] = [
    r#"CREATE INDEX IF NOT EXISTS "productos_category_idx" ON "productos" ("category")"#,
    r#"CREATE INDEX IF NOT EXISTS "productos_amount_idx" ON "productos" ("amount")"#,
];

/// Product store over a Postgres table.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
    enable_query_logging: bool,
    slow_query_threshold: Duration,
}

impl PgProductStore {
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            enable_query_logging: config.enable_query_logging,
            slow_query_threshold: Duration::from_millis(config.slow_query_threshold_ms),
        }
    }

    /// Connects the pool and makes sure the table exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = DatabaseManager::connect(config).await?;
        let store = Self::new(pool, config);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        for statement in CREATE_INDEXES {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Product table ready: {}", TABLE_NAME);
        Ok(())
    }

    async fn timed<T, F>(&self, sql: &str, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let started = Instant::now();
        let result = query.await;
        let elapsed = started.elapsed();

        if self.enable_query_logging {
            debug!(elapsed_ms = elapsed.as_millis() as u64, "{}", sql);
        }
        if elapsed > self.slow_query_threshold {
            warn!(elapsed_ms = elapsed.as_millis() as u64, "Slow query: {}", sql);
        }
        Ok(result?)
    }

    fn select_by_key_sql() -> String {
        format!(
            "SELECT {} FROM \"{}\" WHERE \"id\" = $1",
            COLUMNS.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", "),
            TABLE_NAME
        )
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_many(&self, filter: &Filter) -> Result<Vec<Product>, StoreError> {
        let sql_result = filter.to_sql(TABLE_NAME, &COLUMNS)?;
        let mut q = sqlx::query_as::<_, Product>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        self.timed(&sql_result.query, q.fetch_all(&self.pool)).await
    }

    async fn find_by_key(&self, key: Uuid) -> Result<Option<Product>, StoreError> {
        let sql = Self::select_by_key_sql();
        let q = sqlx::query_as::<_, Product>(&sql).bind(key);
        self.timed(&sql, q.fetch_optional(&self.pool)).await
    }

    async fn insert(&self, document: ProductDocument) -> Result<Product, StoreError> {
        let sql = format!(
            "INSERT INTO \"{}\" (\"id\", \"identifier\", \"name\", \"amount\", \"category\") VALUES ($1, $2, $3, $4, $5) {}",
            TABLE_NAME, RETURNING
        );
        let q = sqlx::query_as::<_, Product>(&sql)
            .bind(Uuid::new_v4())
            .bind(document.identifier)
            .bind(document.name)
            .bind(document.amount)
            .bind(document.category);
        self.timed(&sql, q.fetch_one(&self.pool)).await
    }

    async fn update_by_key(&self, key: Uuid, update: ProductUpdate) -> Result<Option<Product>, StoreError> {
        let (sql, identifier, name, amount, category) = match update {
            ProductUpdate::Merge(patch) if patch.is_empty() => return self.find_by_key(key).await,
            ProductUpdate::Merge(patch) => (
                format!(
                    "UPDATE \"{}\" SET \"identifier\" = COALESCE($2, \"identifier\"), \"name\" = COALESCE($3, \"name\"), \
                     \"amount\" = COALESCE($4, \"amount\"), \"category\" = COALESCE($5, \"category\") WHERE \"id\" = $1 {}",
                    TABLE_NAME, RETURNING
                ),
                patch.identifier,
                patch.name,
                patch.amount,
                patch.category,
            ),
            ProductUpdate::Replace(document) => (
                format!(
                    "UPDATE \"{}\" SET \"identifier\" = $2, \"name\" = $3, \"amount\" = $4, \"category\" = $5 WHERE \"id\" = $1 {}",
                    TABLE_NAME, RETURNING
                ),
                document.identifier,
                document.name,
                document.amount,
                document.category,
            ),
        };

        let q = sqlx::query_as::<_, Product>(&sql)
            .bind(key)
            .bind(identifier)
            .bind(name)
            .bind(amount)
            .bind(category);
        self.timed(&sql, q.fetch_optional(&self.pool)).await
    }

    async fn delete_by_key(&self, key: Uuid) -> Result<Option<Product>, StoreError> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = $1 {}", TABLE_NAME, RETURNING);
        let q = sqlx::query_as::<_, Product>(&sql).bind(key);
        self.timed(&sql, q.fetch_optional(&self.pool)).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q FilterValue,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        FilterValue::Number(n) => q.bind(*n),
        FilterValue::Text(s) => q.bind(s),
    }
}
