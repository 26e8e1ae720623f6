use std::sync::Arc;

use mantra_core::model::Theme;
use services::{ActivityService, AuthService, PreferencesService, SessionService};

/// What the composition root must provide to the views.
pub trait UiApp: Send + Sync {
    /// Theme loaded from preferences before the first frame.
    fn initial_theme(&self) -> Theme;

    fn auth(&self) -> Arc<AuthService>;
    fn sessions(&self) -> Arc<SessionService>;
    fn activity(&self) -> Arc<ActivityService>;
    fn preferences(&self) -> Arc<PreferencesService>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_theme: Theme,

    auth: Arc<AuthService>,
    sessions: Arc<SessionService>,
    activity: Arc<ActivityService>,
    preferences: Arc<PreferencesService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_theme: app.initial_theme(),
            auth: app.auth(),
            sessions: app.sessions(),
            activity: app.activity(),
            preferences: app.preferences(),
        }
    }

    #[must_use]
    pub fn initial_theme(&self) -> Theme {
        self.initial_theme
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<SessionService> {
        Arc::clone(&self.sessions)
    }

    #[must_use]
    pub fn activity(&self) -> Arc<ActivityService> {
        Arc::clone(&self.activity)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
