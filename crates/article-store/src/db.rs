use collector_core::StoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS articles (
        url TEXT NOT NULL,
        coin TEXT NOT NULL DEFAULT '',
        timestamp INTEGER NOT NULL,
        weighting TEXT NOT NULL DEFAULT '{}',
        score REAL NOT NULL,
        comparative REAL NOT NULL,
        title TEXT NOT NULL,
        source TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        PRIMARY KEY (url, coin)
    )",
    "CREATE INDEX IF NOT EXISTS idx_articles_timestamp ON articles(timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_articles_coin ON articles(coin)",
];

#[derive(Clone)]
pub struct ArticleDb {
    pool: SqlitePool,
}

impl ArticleDb {
    /// Open (creating if missing) the database and initialize the schema.
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .create_if_missing(true);

        // Every in-memory connection is its own database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let db = Self { pool };
        db.init_schema().await?;

        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Connection(format!("schema init failed: {}", e)))?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip check used at startup.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_db_creation() {
        let db = ArticleDb::new("sqlite::memory:").await.unwrap();
        assert!(db.pool().acquire().await.is_ok());
        db.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_schema_init_is_repeatable() {
        let db = ArticleDb::new("sqlite::memory:").await.unwrap();
        db.init_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_url_is_connection_error() {
        let err = ArticleDb::new("postgres://nope").await.err().unwrap();
        assert!(matches!(err, StoreError::Connection(_)));
    }
}
