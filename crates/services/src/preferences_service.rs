use std::sync::Arc;

use mantra_core::model::{Preferences, Theme};
use storage::repository::PreferencesRepository;

use crate::error::PreferencesServiceError;

#[derive(Clone)]
pub struct PreferencesService {
    repo: Arc<dyn PreferencesRepository>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferencesRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted preferences (or defaults if never saved).
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn load(&self) -> Result<Preferences, PreferencesServiceError> {
        let preferences = self.repo.get_preferences().await?;
        Ok(preferences.unwrap_or_default())
    }

    /// Persist the given theme.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn set_theme(&self, theme: Theme) -> Result<(), PreferencesServiceError> {
        self.repo
            .save_preferences(&Preferences::with_theme(theme))
            .await?;
        Ok(())
    }

    /// Flip the persisted theme and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` if loading or saving fails.
    pub async fn toggle_theme(&self) -> Result<Theme, PreferencesServiceError> {
        let current = self.load().await?.theme;
        let next = current.toggled();
        self.set_theme(next).await?;
        Ok(next)
    }
}
