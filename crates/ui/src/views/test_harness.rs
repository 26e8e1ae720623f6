use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use mantra_core::model::{Theme, UserId};
use mantra_core::time::fixed_now;
use services::{
    ActivityService, ActivityWindows, AuthService, Clock, LocalAuthProvider, PreferencesService,
    SessionService, UserProfile,
};
use storage::repository::{SessionRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::{HistoryView, HomeView};

#[derive(Clone)]
struct TestApp {
    initial_theme: Theme,
    auth: Arc<AuthService>,
    sessions: Arc<SessionService>,
    activity: Arc<ActivityService>,
    preferences: Arc<PreferencesService>,
}

impl UiApp for TestApp {
    fn initial_theme(&self) -> Theme {
        self.initial_theme
    }

    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn sessions(&self) -> Arc<SessionService> {
        Arc::clone(&self.sessions)
    }

    fn activity(&self) -> Arc<ActivityService> {
        Arc::clone(&self.activity)
    }

    fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    History,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::History => rsx! { HistoryView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub auth: Arc<AuthService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    let sessions = Arc::clone(&storage.sessions);
    build_harness(view, storage, sessions, true).await
}

pub async fn setup_signed_out_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    let sessions = Arc::clone(&storage.sessions);
    build_harness(view, storage, sessions, false).await
}

pub async fn setup_view_harness_with_session_repo(
    view: ViewKind,
    storage: Storage,
    sessions: Arc<dyn SessionRepository>,
) -> ViewHarness {
    build_harness(view, storage, sessions, true).await
}

async fn build_harness(
    view: ViewKind,
    storage: Storage,
    sessions: Arc<dyn SessionRepository>,
    signed_in: bool,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let auth = Arc::new(AuthService::new(Arc::new(LocalAuthProvider::new(
        UserProfile::new(UserId::new("tester").unwrap(), Some("Tester".into())),
    ))));
    if signed_in {
        auth.sign_in().await.expect("sign in");
    }

    let session_service = Arc::new(SessionService::new(clock, Arc::clone(&sessions)));
    let activity = Arc::new(ActivityService::new(
        clock,
        Arc::clone(&sessions),
        ActivityWindows::default(),
    ));
    let preferences = Arc::new(PreferencesService::new(Arc::clone(&storage.preferences)));

    let app = Arc::new(TestApp {
        initial_theme: Theme::Light,
        auth: Arc::clone(&auth),
        sessions: session_service,
        activity,
        preferences,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, storage, auth }
}
