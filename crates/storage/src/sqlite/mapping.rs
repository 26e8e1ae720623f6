use mantra_core::model::{PracticeSession, SessionId, UserId};
use sqlx::Row;

use crate::repository::{SessionRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn session_id_from_str(raw: &str) -> Result<SessionId, StorageError> {
    raw.parse::<SessionId>()
        .map_err(|_| StorageError::Serialization(format!("invalid session id: {raw}")))
}

pub(crate) fn map_session_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<PracticeSession, StorageError> {
    let id = session_id_from_str(row.try_get::<String, _>("id").map_err(ser)?.as_str())?;
    let user_id = UserId::new(row.try_get::<String, _>("user_id").map_err(ser)?)
        .map_err(ser)?;
    let count = u32_from_i64("count", row.try_get::<i64, _>("count").map_err(ser)?)?;
    let word: Option<String> = row.try_get("word").map_err(ser)?;
    let lost_focus_count = row
        .try_get::<Option<i64>, _>("lost_focus_count")
        .map_err(ser)?
        .map(|v| u32_from_i64("lost_focus_count", v))
        .transpose()?;
    let created_at = row.try_get("created_at").map_err(ser)?;

    SessionRecord {
        id,
        user_id,
        count,
        word,
        lost_focus_count,
        created_at: Some(created_at),
    }
    .into_session()
    .map_err(ser)
}
