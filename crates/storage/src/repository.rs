use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mantra_core::model::{
    PracticeSession, PracticeSessionError, Preferences, SessionId, UserId, Word, WordError,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("not signed in")]
    Unauthorized,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors rehydrating a persisted record into a domain session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionRecordError {
    #[error(transparent)]
    Session(#[from] PracticeSessionError),
    #[error(transparent)]
    Word(#[from] WordError),
}

/// Persisted shape for a practice session.
///
/// Mirrors the domain `PracticeSession` so adapters can serialize without
/// leaking storage concerns into the domain layer. The word label is stored
/// as raw text and re-validated on the way back.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionId,
    pub user_id: UserId,
    pub count: u32,
    pub word: Option<String>,
    pub lost_focus_count: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    #[must_use]
    pub fn from_session(session: &PracticeSession) -> Self {
        Self {
            id: session.id(),
            user_id: session.user_id().clone(),
            count: session.count(),
            word: session.word().map(|w| w.as_str().to_owned()),
            lost_focus_count: session.lost_focus_count(),
            created_at: session.created_at(),
        }
    }

    /// Convert the record back into a domain session.
    ///
    /// # Errors
    ///
    /// Returns `SessionRecordError` if the stored word label or count fails
    /// domain validation.
    pub fn into_session(self) -> Result<PracticeSession, SessionRecordError> {
        let word = self.word.map(Word::new).transpose()?;
        Ok(PracticeSession::from_persisted(
            self.id,
            self.user_id,
            self.count,
            word,
            self.lost_focus_count,
            self.created_at,
        )?)
    }
}

/// Repository contract for session records.
///
/// Records are append-only: the application never updates or deletes them.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist one session record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a record with the same id already
    /// exists, or other storage errors.
    async fn append_session(&self, session: &PracticeSession) -> Result<(), StorageError>;

    /// Sessions for one user, most recent first, limited to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_recent_sessions(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<PracticeSession>, StorageError>;
}

/// Repository contract for the locally persisted preferences.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Fetch the stored preferences, if any were ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails.
    async fn get_preferences(&self) -> Result<Option<Preferences>, StorageError>;

    /// Persist the preferences, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sessions: Arc<Mutex<Vec<PracticeSession>>>,
    preferences: Arc<Mutex<Option<Preferences>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn append_session(&self, session: &PracticeSession) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|s| s.id() == session.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(session.clone());
        Ok(())
    }

    async fn list_recent_sessions(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<PracticeSession>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut matching: Vec<PracticeSession> = guard
            .iter()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect();
        // Most recent first; unresolved timestamps sort last.
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        matching.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(matching)
    }
}

#[async_trait]
impl PreferencesRepository for InMemoryRepository {
    async fn get_preferences(&self) -> Result<Option<Preferences>, StorageError> {
        let guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(*guard)
    }

    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StorageError> {
        let mut guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(*preferences);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
    pub preferences: Arc<dyn PreferencesRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferencesRepository> = Arc::new(repo);
        Self {
            sessions,
            preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mantra_core::model::Theme;
    use mantra_core::time::fixed_now;

    fn build_session(user: &str, count: u32, age_days: i64) -> PracticeSession {
        PracticeSession::new(
            SessionId::generate(),
            UserId::new(user).unwrap(),
            count,
            Some(Word::new("calm").unwrap()),
            None,
            fixed_now() - Duration::days(age_days),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_only_the_requesting_users_sessions() {
        let repo = InMemoryRepository::new();
        repo.append_session(&build_session("alice", 3, 0)).await.unwrap();
        repo.append_session(&build_session("bob", 5, 0)).await.unwrap();

        let alice = UserId::new("alice").unwrap();
        let sessions = repo.list_recent_sessions(&alice, 10).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].user_id(), &alice);
    }

    #[tokio::test]
    async fn recent_sessions_come_back_newest_first_and_limited() {
        let repo = InMemoryRepository::new();
        for age in [2, 0, 1] {
            repo.append_session(&build_session("alice", 1, age)).await.unwrap();
        }

        let alice = UserId::new("alice").unwrap();
        let sessions = repo.list_recent_sessions(&alice, 2).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions[0].created_at() > sessions[1].created_at());
        assert_eq!(sessions[0].created_at(), Some(fixed_now()));
    }

    #[tokio::test]
    async fn duplicate_session_id_is_a_conflict() {
        let repo = InMemoryRepository::new();
        let session = build_session("alice", 3, 0);
        repo.append_session(&session).await.unwrap();
        let err = repo.append_session(&session).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn preferences_roundtrip() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_preferences().await.unwrap().is_none());

        repo.save_preferences(&Preferences::with_theme(Theme::Dark))
            .await
            .unwrap();
        let stored = repo.get_preferences().await.unwrap().unwrap();
        assert_eq!(stored.theme, Theme::Dark);
    }

    #[test]
    fn record_roundtrips_through_domain() {
        let session = build_session("alice", 7, 0);
        let record = SessionRecord::from_session(&session);
        let back = record.into_session().unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn record_with_invalid_word_fails_rehydration() {
        let session = build_session("alice", 7, 0);
        let mut record = SessionRecord::from_session(&session);
        record.word = Some("   ".into());
        assert!(matches!(
            record.into_session(),
            Err(SessionRecordError::Word(_))
        ));
    }
}
