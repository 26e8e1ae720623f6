use thiserror::Error;
use url::Url;

/// Connection settings for the optional hosted backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendSettings {
    base_url: String,
    api_key: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct BackendSettingsDraft {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendSettingsError {
    #[error("backend base URL is missing")]
    MissingBaseUrl,

    #[error("invalid backend base URL")]
    InvalidBaseUrl,
}

impl BackendSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft into usable settings.
    ///
    /// # Errors
    ///
    /// Returns `BackendSettingsError` when the base URL is missing or does
    /// not parse as an absolute URL.
    pub fn validate(self) -> Result<BackendSettings, BackendSettingsError> {
        let base_url = normalize_optional(self.base_url)
            .ok_or(BackendSettingsError::MissingBaseUrl)?;
        if Url::parse(&base_url).is_err() {
            return Err(BackendSettingsError::InvalidBaseUrl);
        }

        Ok(BackendSettings {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: normalize_optional(self.api_key),
        })
    }
}

impl BackendSettings {
    /// Build settings from already-collected values (flags, env).
    ///
    /// # Errors
    ///
    /// Returns `BackendSettingsError` if the base URL is missing or invalid.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, BackendSettingsError> {
        BackendSettingsDraft {
            base_url: Some(base_url.into()),
            api_key,
        }
        .validate()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
