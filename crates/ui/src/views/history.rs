use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HeatmapCellVm, SessionRowVm, map_heatmap_cells, map_session_rows};

const RECENT_SESSIONS_LIMIT: u32 = 20;

#[derive(Clone, Debug, PartialEq)]
struct HistoryData {
    signed_in: bool,
    cells: Vec<HeatmapCellVm>,
    rows: Vec<SessionRowVm>,
}

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let activity = ctx.activity();
    let sessions = ctx.sessions();

    let resource = use_resource(move || {
        let auth = auth.clone();
        let activity = activity.clone();
        let sessions = sessions.clone();
        async move {
            let Some(profile) = auth.current_user() else {
                return Ok::<_, ViewError>(HistoryData {
                    signed_in: false,
                    cells: Vec::new(),
                    rows: Vec::new(),
                });
            };
            let buckets = activity.heatmap(profile.user_id()).await;
            // A failed list degrades to an empty one; the heatmap is already
            // all zeros in that case.
            let recent = sessions
                .list_recent(profile.user_id(), RECENT_SESSIONS_LIMIT)
                .await
                .unwrap_or_default();
            Ok(HistoryData {
                signed_in: true,
                cells: map_heatmap_cells(&buckets),
                rows: map_session_rows(&recent),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page history-page",
            header { class: "view-header",
                h2 { class: "view-title", "History" }
                p { class: "view-subtitle", "Half a year of practice at a glance." }
            }
            div { class: "view-divider" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    if !data.signed_in {
                        p { "Sign in to see your practice history." }
                    } else {
                        div { class: "heatmap",
                            for cell in data.cells {
                                div {
                                    class: "heatmap-cell level-{cell.level}",
                                    title: "{cell.tooltip}",
                                }
                            }
                        }
                        h3 { "Recent sessions" }
                        if data.rows.is_empty() {
                            p { "No sessions yet." }
                        } else {
                            ul { class: "session-list",
                                for row in data.rows {
                                    SessionRow { row }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn SessionRow(row: SessionRowVm) -> Element {
    rsx! {
        li { class: "session-row",
            span { class: "session-word", "{row.word_label}" }
            span { class: "session-count", "{row.count_label}" }
            span { class: "session-time", "{row.saved_at_label}" }
        }
    }
}
