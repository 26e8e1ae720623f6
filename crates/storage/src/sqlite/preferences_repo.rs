use async_trait::async_trait;
use mantra_core::model::{Preferences, Theme};
use sqlx::Row;

use super::{SqliteRepository, mapping::ser};
use crate::repository::{PreferencesRepository, StorageError};

#[async_trait]
impl PreferencesRepository for SqliteRepository {
    async fn get_preferences(&self) -> Result<Option<Preferences>, StorageError> {
        let row = sqlx::query("SELECT theme FROM preferences WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row.try_get("theme").map_err(ser)?;
        let theme: Theme = raw.parse().map_err(ser)?;
        Ok(Some(Preferences::with_theme(theme)))
    }

    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO preferences (id, theme)
                VALUES (1, ?1)
                ON CONFLICT(id) DO UPDATE SET theme = excluded.theme
            ",
        )
        .bind(preferences.theme.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
