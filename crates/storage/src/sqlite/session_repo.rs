use mantra_core::model::{PracticeSession, UserId};

use super::{SqliteRepository, mapping::map_session_row};
use crate::repository::{SessionRecord, SessionRepository, StorageError};

#[async_trait::async_trait]
impl SessionRepository for SqliteRepository {
    async fn append_session(&self, session: &PracticeSession) -> Result<(), StorageError> {
        let record = SessionRecord::from_session(session);
        // Local saves always carry a clock-resolved timestamp.
        let created_at = record
            .created_at
            .ok_or_else(|| StorageError::Serialization("missing created_at".into()))?;

        let result = sqlx::query(
            r"
                INSERT INTO practice_sessions (
                    id, user_id, count, word, lost_focus_count, created_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.as_str())
        .bind(i64::from(record.count))
        .bind(record.word.as_deref())
        .bind(record.lost_focus_count.map(i64::from))
        .bind(created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StorageError::Conflict)
            }
            Err(e) => Err(StorageError::Connection(e.to_string())),
        }
    }

    async fn list_recent_sessions(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<PracticeSession>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, user_id, count, word, lost_focus_count, created_at
                FROM practice_sessions
                WHERE user_id = ?1
                ORDER BY created_at DESC, id DESC
                LIMIT ?2
            ",
        )
        .bind(user_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_session_row(&row)?);
        }
        Ok(out)
    }
}
