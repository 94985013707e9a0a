use crate::core::RecentSearches;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL client for per-user recent searches
///
/// Each accepted suggestion is written through immediately; the table
/// never holds more than `capacity` rows per user.
pub struct PostgresClient {
    pool: PgPool,
    capacity: usize,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
        capacity: usize,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool, capacity })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
        capacity: usize,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
            capacity,
        )
        .await
    }

    /// Build a client whose pool connects on first use
    ///
    /// Migrations are not applied; the schema must already exist.
    pub fn connect_lazy(database_url: &str, capacity: usize) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy(database_url)?;

        Ok(Self { pool, capacity })
    }

    /// Record that a user picked a suggestion and return the updated list
    ///
    /// Re-selecting a name (ignoring case) moves it to the front instead of
    /// adding a duplicate. Rows beyond the capacity are pruned in the same
    /// transaction.
    pub async fn record_recent_search(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<RecentSearches, PostgresError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PostgresError::InvalidInput("search name is blank".to_string()));
        }
        let name_key = name.to_lowercase();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO recent_searches (user_id, name, name_key, searched_at)
            VALUES ($1, $2, $3, clock_timestamp())
            ON CONFLICT (user_id, name_key)
            DO UPDATE SET
                name = EXCLUDED.name,
                searched_at = EXCLUDED.searched_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(&name_key)
        .execute(&mut *tx)
        .await?;

        let pruned = sqlx::query(
            r#"
            DELETE FROM recent_searches
            WHERE user_id = $1
              AND name_key NOT IN (
                SELECT name_key FROM recent_searches
                WHERE user_id = $1
                ORDER BY searched_at DESC
                LIMIT $2
              )
            "#,
        )
        .bind(user_id)
        .bind(self.capacity as i64)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::debug!(
            "Recorded recent search for {} (pruned {} old entries)",
            user_id,
            pruned
        );

        self.load_recent_searches(user_id).await
    }

    /// Load a user's recent searches, most recent first
    pub async fn load_recent_searches(&self, user_id: &str) -> Result<RecentSearches, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT name FROM recent_searches
            WHERE user_id = $1
            ORDER BY searched_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(self.capacity as i64)
        .fetch_all(&self.pool)
        .await?;

        let names = rows
            .iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecentSearches::from_entries(names, self.capacity))
    }

    /// Remove all recent searches for a user
    pub async fn clear_recent_searches(&self, user_id: &str) -> Result<u64, PostgresError> {
        let result = sqlx::query("DELETE FROM recent_searches WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        let row = sqlx::query("SELECT 1 AS ok").fetch_one(&self.pool).await?;
        let ok: i32 = row.try_get("ok")?;
        Ok(ok == 1)
    }
}
