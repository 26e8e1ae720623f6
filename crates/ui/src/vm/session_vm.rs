use mantra_core::model::PracticeSession;

use crate::vm::time_fmt::format_saved_at;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRowVm {
    pub id: String,
    pub word_label: String,
    pub count_label: String,
    pub saved_at_label: String,
}

impl From<&PracticeSession> for SessionRowVm {
    fn from(session: &PracticeSession) -> Self {
        Self {
            id: session.id().to_string(),
            word_label: session
                .word()
                .map_or_else(|| "(no word)".to_string(), |w| w.as_str().to_string()),
            count_label: match session.count() {
                1 => "1 repetition".to_string(),
                n => format!("{n} repetitions"),
            },
            saved_at_label: format_saved_at(session.created_at()),
        }
    }
}

#[must_use]
pub fn map_session_rows(sessions: &[PracticeSession]) -> Vec<SessionRowVm> {
    sessions.iter().map(SessionRowVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantra_core::model::{SessionId, UserId, Word};
    use mantra_core::time::fixed_now;

    #[test]
    fn row_carries_word_count_and_time_labels() {
        let session = PracticeSession::new(
            SessionId::generate(),
            UserId::new("alice").unwrap(),
            21,
            Some(Word::new("calm").unwrap()),
            None,
            fixed_now(),
        )
        .unwrap();

        let row = SessionRowVm::from(&session);
        assert_eq!(row.word_label, "calm");
        assert_eq!(row.count_label, "21 repetitions");
        assert!(!row.saved_at_label.is_empty());
    }

    #[test]
    fn wordless_pending_session_gets_placeholders() {
        let session = PracticeSession::from_persisted(
            SessionId::generate(),
            UserId::new("alice").unwrap(),
            1,
            None,
            None,
            None,
        )
        .unwrap();

        let row = SessionRowVm::from(&session);
        assert_eq!(row.word_label, "(no word)");
        assert_eq!(row.count_label, "1 repetition");
        assert_eq!(row.saved_at_label, "pending sync");
    }
}
