use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{SessionId, UserId, Word};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PracticeSessionError {
    #[error("session count must be at least 1")]
    ZeroCount,
}

/// One saved round of word repetitions.
///
/// Immutable after creation; the application never updates or deletes saved
/// sessions. `created_at` is `None` only while a server-assigned timestamp
/// has not resolved yet; aggregation skips such records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSession {
    id: SessionId,
    user_id: UserId,
    count: u32,
    word: Option<Word>,
    lost_focus_count: Option<u32>,
    created_at: Option<DateTime<Utc>>,
}

impl PracticeSession {
    /// Build a new session record at save time.
    ///
    /// # Errors
    ///
    /// Returns `PracticeSessionError::ZeroCount` when `count` is zero; the
    /// caller is expected to treat a zero-count save as a no-op before
    /// constructing a record.
    pub fn new(
        id: SessionId,
        user_id: UserId,
        count: u32,
        word: Option<Word>,
        lost_focus_count: Option<u32>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PracticeSessionError> {
        if count == 0 {
            return Err(PracticeSessionError::ZeroCount);
        }
        Ok(Self {
            id,
            user_id,
            count,
            word,
            lost_focus_count,
            created_at: Some(created_at),
        })
    }

    /// Rehydrate a session from storage.
    ///
    /// Unlike `new`, the timestamp may be absent: remote documents written
    /// moments ago can come back before the server has resolved it.
    ///
    /// # Errors
    ///
    /// Returns `PracticeSessionError::ZeroCount` for a persisted zero count.
    pub fn from_persisted(
        id: SessionId,
        user_id: UserId,
        count: u32,
        word: Option<Word>,
        lost_focus_count: Option<u32>,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Self, PracticeSessionError> {
        if count == 0 {
            return Err(PracticeSessionError::ZeroCount);
        }
        Ok(Self {
            id,
            user_id,
            count,
            word,
            lost_focus_count,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn word(&self) -> Option<&Word> {
        self.word.as_ref()
    }

    #[must_use]
    pub fn lost_focus_count(&self) -> Option<u32> {
        self.lost_focus_count
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn user() -> UserId {
        UserId::new("u-1").unwrap()
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = PracticeSession::new(
            SessionId::generate(),
            user(),
            0,
            None,
            None,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, PracticeSessionError::ZeroCount);
    }

    #[test]
    fn new_session_carries_resolved_timestamp() {
        let session = PracticeSession::new(
            SessionId::generate(),
            user(),
            33,
            Some(Word::new("calm").unwrap()),
            Some(2),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(session.count(), 33);
        assert_eq!(session.word().map(Word::as_str), Some("calm"));
        assert_eq!(session.lost_focus_count(), Some(2));
        assert_eq!(session.created_at(), Some(fixed_now()));
    }

    #[test]
    fn persisted_session_may_lack_timestamp() {
        let session = PracticeSession::from_persisted(
            SessionId::generate(),
            user(),
            1,
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(session.created_at(), None);
    }
}
