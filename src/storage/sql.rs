use super::{KeyValueStore, StoreResult};
use sqlx::any::{AnyConnectOptions, AnyRow};
use sqlx::{AnyConnection, Connection, Row};
use std::str::FromStr;
use tracing::{debug, trace};

/// Store backed by a `kv` table in a MySQL database, or SQLite when built
/// with the `sqlite` feature.
pub struct SqlStore {
    conn: AnyConnection,
}

impl SqlStore {
    pub async fn new(url: &str) -> StoreResult<Self> {
        sqlx::any::install_default_drivers();
        let mut conn = AnyConnection::connect_with(&AnyConnectOptions::from_str(url)?).await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv (name VARCHAR(64) NOT NULL PRIMARY KEY, content TEXT NOT NULL)",
        )
        .execute(&mut conn)
        .await?;
        debug!("key-value table ready");
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqlStore {
    async fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        let row = sqlx::query("SELECT content FROM kv WHERE name = ?")
            .bind(key)
            .fetch_optional(&mut self.conn)
            .await?;
        Ok(row.map(|row: AnyRow| row.get("content")))
    }

    async fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        trace!(key, "storing value");
        let mut trans = self.conn.begin().await?;
        sqlx::query("DELETE FROM kv WHERE name = ?")
            .bind(key)
            .execute(&mut *trans)
            .await?;
        sqlx::query("INSERT INTO kv (name, content) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&mut *trans)
            .await?;
        trans.commit().await?;
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM kv WHERE name = ?")
            .bind(key)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }
}
