use std::sync::Arc;

use chrono::Duration;
use mantra_core::model::{PracticeSession, SessionId, UserId, Word};
use mantra_core::time::fixed_now;
use storage::repository::{SessionRepository, Storage, StorageError};

use super::test_harness::{
    ViewKind, setup_signed_out_harness, setup_view_harness, setup_view_harness_with_session_repo,
};

fn session(word: Option<&str>, count: u32, age_days: i64) -> PracticeSession {
    PracticeSession::new(
        SessionId::generate(),
        UserId::new("tester").unwrap(),
        count,
        word.map(|w| Word::new(w).unwrap()),
        None,
        fixed_now() - Duration::days(age_days),
    )
    .unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_counter_and_word_picker() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("count-value"), "missing counter in {html}");
    assert!(html.contains("Save"), "missing save button in {html}");
    assert!(html.contains("calm"), "missing word options in {html}");
    assert!(html.contains("No word"), "missing wordless option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_signed_out_prompts_for_sign_in() {
    let mut harness = setup_signed_out_harness(ViewKind::Home).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Sign in to keep a history"),
        "missing sign-in hint in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_heatmap_and_rows() {
    let mut harness = setup_view_harness(ViewKind::History).await;
    harness
        .storage
        .sessions
        .append_session(&session(Some("calm"), 21, 0))
        .await
        .expect("append session");
    harness
        .storage
        .sessions
        .append_session(&session(None, 3, 1))
        .await
        .expect("append session");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("heatmap-cell"), "missing heatmap in {html}");
    assert!(html.contains("level-1"), "missing shaded cell in {html}");
    assert!(html.contains("calm"), "missing word label in {html}");
    assert!(html.contains("(no word)"), "missing placeholder in {html}");
    assert!(
        html.contains("21 repetitions"),
        "missing count label in {html}"
    );
}

struct FailingSessionRepo;

#[async_trait::async_trait]
impl SessionRepository for FailingSessionRepo {
    async fn append_session(&self, _session: &PracticeSession) -> Result<(), StorageError> {
        Err(StorageError::Connection("down".to_string()))
    }

    async fn list_recent_sessions(
        &self,
        _user_id: &UserId,
        _limit: u32,
    ) -> Result<Vec<PracticeSession>, StorageError> {
        Err(StorageError::Connection("down".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_fetch_failure_degrades_to_empty_heatmap() {
    let mut harness = setup_view_harness_with_session_repo(
        ViewKind::History,
        Storage::in_memory(),
        Arc::new(FailingSessionRepo),
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    // The window still renders at full length, just with no shading.
    assert!(html.contains("heatmap-cell"), "missing heatmap in {html}");
    assert!(html.contains("level-0"), "missing zero cells in {html}");
    assert!(!html.contains("level-1"), "unexpected shading in {html}");
    assert!(
        html.contains("No sessions yet."),
        "missing empty list text in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_signed_out_prompts_for_sign_in() {
    let mut harness = setup_signed_out_harness(ViewKind::History).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Sign in to see your practice history."),
        "missing sign-in hint in {html}"
    );
}
