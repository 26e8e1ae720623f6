use dioxus::prelude::*;

use mantra_core::model::{Counter, Word, builtin_words};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StripDayVm, map_strip_days};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(ViewError),
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let sessions = ctx.sessions();
    let activity = ctx.activity();

    let mut counter = use_signal(Counter::new);
    let mut selected_word = use_signal(|| Some(builtin_words()[0].to_string()));
    let mut save_state = use_signal(|| SaveState::Idle);

    let auth_for_strip = auth.clone();
    let strip = use_resource(move || {
        let auth = auth_for_strip.clone();
        let activity = activity.clone();
        async move {
            let Some(profile) = auth.current_user() else {
                return Ok::<Option<Vec<StripDayVm>>, ViewError>(None);
            };
            let buckets = activity.recent_strip(profile.user_id()).await;
            Ok(Some(map_strip_days(&buckets)))
        }
    });
    let strip_state = view_state_from_resource(&strip);

    let word_value = selected_word().unwrap_or_default();
    let auth_for_save = auth.clone();

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Practice" }
                p { class: "view-subtitle", "Pick a word and repeat it, one tap per round." }
            }
            div { class: "view-divider" }

            select {
                class: "word-select",
                value: "{word_value}",
                onchange: move |evt| {
                    let value = evt.value();
                    selected_word.set((!value.is_empty()).then_some(value));
                },
                option { value: "", "No word" }
                for word in builtin_words() {
                    option { value: "{word}", "{word}" }
                }
            }

            button {
                class: "count-button",
                r#type: "button",
                onclick: move |_| counter.write().increment(),
                onfocusout: move |_| counter.write().record_lost_focus(),
                span { class: "count-value", "{counter().count()}" }
                if let Some(word) = selected_word() {
                    span { class: "count-word", "{word}" }
                }
            }

            div { class: "home-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| counter.write().reset(),
                    "Reset"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: save_state() == SaveState::Saving,
                    onclick: move |_| {
                        let auth = auth_for_save.clone();
                        let sessions = sessions.clone();
                        let word = selected_word().and_then(|w| Word::new(w).ok());
                        let mut counter = counter;
                        let mut save_state = save_state;
                        let mut strip = strip;
                        spawn(async move {
                            let Some(profile) = auth.current_user() else {
                                save_state.set(SaveState::Error(ViewError::NotSignedIn));
                                return;
                            };
                            save_state.set(SaveState::Saving);
                            match sessions.save_session(profile.user_id(), counter(), word).await {
                                // Nothing to save: stay quiet, keep the round.
                                Ok(None) => save_state.set(SaveState::Idle),
                                Ok(Some(_)) => {
                                    counter.write().reset();
                                    save_state.set(SaveState::Saved);
                                    strip.restart();
                                }
                                Err(_) => save_state.set(SaveState::Error(ViewError::Unknown)),
                            }
                        });
                    },
                    "Save"
                }
            }
            if save_state() == SaveState::Saved {
                p { class: "save-note", "Saved." }
            }

            section { class: "recent-strip",
                h3 { "Last few days" }
                match strip_state {
                    ViewState::Ready(Some(days)) => rsx! {
                        div { class: "strip-days",
                            for day in days {
                                div { class: "strip-day",
                                    span { class: "strip-label", "{day.label}" }
                                    span { class: "strip-count", "{day.count_label}" }
                                }
                            }
                        }
                    },
                    ViewState::Ready(None) => rsx! {
                        p { class: "strip-hint", "Sign in to keep a history of your practice." }
                    },
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                    },
                }
            }

            if let SaveState::Error(err) = save_state() {
                div {
                    class: "save-modal-overlay",
                    onclick: move |_| save_state.set(SaveState::Idle),
                    div {
                        class: "save-modal",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "save-modal-title", "Save failed" }
                        p { class: "save-modal-body", "{err.message()}" }
                        div { class: "save-modal-actions",
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| save_state.set(SaveState::Idle),
                                "Dismiss"
                            }
                        }
                    }
                }
            }
        }
    }
}
