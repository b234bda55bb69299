//! Key-value repository holding each user's learning history.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::UserHistory;

/// Stores values as JSON documents under string keys.
#[derive(Clone)]
pub struct HistoryStore {
    pool: SqlitePool,
}

fn history_key(user_id: &str) -> String {
    format!("user_history:{}", user_id)
}

impl HistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn get_raw(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn put_raw(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Load a user's history; a user without stored history starts empty.
    ///
    /// A stored document that no longer decodes is discarded with a warning.
    pub async fn load(&self, user_id: &str) -> Result<UserHistory, AppError> {
        let Some(raw) = self.get_raw(&history_key(user_id)).await? else {
            return Ok(UserHistory::default());
        };

        match serde_json::from_str(&raw) {
            Ok(history) => Ok(history),
            Err(e) => {
                tracing::warn!("Discarding unreadable history for {}: {}", user_id, e);
                Ok(UserHistory::default())
            }
        }
    }

    /// Replace a user's stored history.
    pub async fn save(&self, user_id: &str, history: &UserHistory) -> Result<(), AppError> {
        let raw = serde_json::to_string(history)?;
        self.put_raw(&history_key(user_id), &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::models::SkillLevel;
    use tempfile::TempDir;

    async fn store() -> (HistoryStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let pool = init_database(&dir.path().join("kv.sqlite")).await.unwrap();
        (HistoryStore::new(pool), dir)
    }

    #[tokio::test]
    async fn test_missing_history_is_default() {
        let (store, _dir) = store().await;
        let history = store.load("nobody").await.unwrap();
        assert_eq!(history, UserHistory::default());
        assert_eq!(history.skill_level, SkillLevel::NotAssessed);
    }

    #[tokio::test]
    async fn test_save_replaces_whole_document() {
        let (store, _dir) = store().await;

        let mut history = UserHistory::default();
        history.start_course("i1");
        store.save("u1", &history).await.unwrap();

        history.complete_course("i1", 90, Utc::now());
        history.skill_level = SkillLevel::Intermediate;
        store.save("u1", &history).await.unwrap();

        let loaded = store.load("u1").await.unwrap();
        assert_eq!(loaded, history);
        assert!(store.load("u2").await.unwrap().completed_courses.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_document_loads_as_default() {
        let (store, _dir) = store().await;
        store.put_raw(&history_key("u1"), "{not json").await.unwrap();

        let loaded = store.load("u1").await.unwrap();
        assert_eq!(loaded, UserHistory::default());
    }
}
