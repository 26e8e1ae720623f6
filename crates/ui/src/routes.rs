use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use mantra_core::model::Theme;

use crate::context::AppContext;
use crate::views::{HistoryView, HomeView, QuotePanel};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/history", HistoryView)] History {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let theme = use_signal(|| ctx.initial_theme());

    rsx! {
        div { class: "app theme-{theme().as_str()}",
            Sidebar { theme }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar(theme: Signal<Theme>) -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let preferences = ctx.preferences();
    let mut user = use_signal(|| auth.current_user());

    let theme_label = match theme() {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    let auth_for_sign_in = auth.clone();
    let auth_for_sign_out = auth.clone();

    rsx! {
        nav { class: "sidebar",
            h1 { "Mantra" }
            ul {
                li { Link { to: Route::Home {}, "Practice" } }
                li { Link { to: Route::History {}, "History" } }
            }
            div { class: "sidebar-controls",
                button {
                    class: "btn btn-secondary theme-toggle",
                    r#type: "button",
                    onclick: move |_| {
                        let preferences = preferences.clone();
                        let mut theme = theme;
                        spawn(async move {
                            // Failed writes keep the current theme; the toggle
                            // stays in sync with what is actually persisted.
                            if let Ok(next) = preferences.toggle_theme().await {
                                theme.set(next);
                            }
                        });
                    },
                    "{theme_label}"
                }
                if let Some(profile) = user() {
                    p { class: "sidebar-user", "{profile.display_name()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let auth = auth_for_sign_out.clone();
                            let mut user = user;
                            spawn(async move {
                                auth.sign_out().await;
                                user.set(None);
                            });
                        },
                        "Sign out"
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let auth = auth_for_sign_in.clone();
                            let mut user = user;
                            spawn(async move {
                                // A cancelled or failed sign-in leaves the
                                // sidebar as-is.
                                if let Ok(profile) = auth.sign_in().await {
                                    user.set(Some(profile));
                                }
                            });
                        },
                        "Sign in"
                    }
                }
            }
            QuotePanel {}
        }
    }
}
