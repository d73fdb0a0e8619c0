use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        // SQLite serializes writers; waiting beats bubbling up
        // "database is busy" to the handler.
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

/// Idempotently create the itinerary table. Must run once before the server
/// accepts requests.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS itinerary (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            location TEXT NOT NULL,
            date TEXT NOT NULL,
            description TEXT,
            image_url TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Databases created before image generation existed lack this column;
    // the ALTER fails with "duplicate column name" once it is present.
    if let Err(e) = sqlx::query("ALTER TABLE itinerary ADD COLUMN image_url TEXT")
        .execute(pool)
        .await
    {
        tracing::debug!(error = %e, "image_url column already present, skipping migration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory database")
    }

    #[tokio::test]
    async fn init_schema_creates_itinerary_table() {
        let pool = memory_pool().await;
        init_schema(&pool).await.expect("schema init");

        let count: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = 'itinerary'",
        )
        .fetch_one(&pool)
        .await
        .expect("query sqlite_master");

        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let pool = memory_pool().await;
        init_schema(&pool).await.expect("first init");
        init_schema(&pool).await.expect("second init");
    }

    #[tokio::test]
    async fn init_schema_adds_image_url_to_legacy_table() {
        let pool = memory_pool().await;

        // Simulate a database from before the image_url column existed.
        sqlx::query(
            r#"
            CREATE TABLE itinerary (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                location TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .expect("create legacy table");

        init_schema(&pool).await.expect("schema init");

        sqlx::query("INSERT INTO itinerary (location, date, description, image_url) VALUES ('Kyoto', '2024-04-01', 'desc', NULL)")
            .execute(&pool)
            .await
            .expect("insert with image_url column");
    }
}
