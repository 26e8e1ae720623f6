use std::sync::Arc;

use async_trait::async_trait;
use mantra_core::model::UserId;
use tokio::sync::watch;

use crate::error::AuthError;

/// Identity of the signed-in user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    user_id: UserId,
    display_name: Option<String>,
}

impl UserProfile {
    #[must_use]
    pub fn new(user_id: UserId, display_name: Option<String>) -> Self {
        Self {
            user_id,
            display_name,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Name for the UI; falls back to the raw identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.user_id.as_str())
    }
}

/// Seam to the identity provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Interactive sign-in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Cancelled` when the user abandons the flow, or
    /// transport/provider errors otherwise.
    async fn sign_in(&self) -> Result<UserProfile, AuthError>;

    /// End the provider-side session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the provider cannot be reached.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Tracks the current user and exposes it as an observable stream.
///
/// Sign-in failures leave the current user untouched; they are logged at
/// debug level and surfaced to the caller, which typically ignores them.
#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    current: watch::Sender<Option<UserProfile>>,
}

impl AuthService {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (current, _) = watch::channel(None);
        Self { provider, current }
    }

    /// Run the provider sign-in and publish the resulting profile.
    ///
    /// # Errors
    ///
    /// Propagates the provider's `AuthError`; the current user is unchanged
    /// on failure.
    pub async fn sign_in(&self) -> Result<UserProfile, AuthError> {
        match self.provider.sign_in().await {
            Ok(profile) => {
                self.current.send_replace(Some(profile.clone()));
                Ok(profile)
            }
            Err(err) => {
                tracing::debug!(error = %err, "sign-in failed");
                Err(err)
            }
        }
    }

    /// Clear the current user. Provider-side failures are logged and
    /// otherwise ignored; locally the user is always signed out.
    pub async fn sign_out(&self) {
        if let Err(err) = self.provider.sign_out().await {
            tracing::debug!(error = %err, "provider sign-out failed");
        }
        self.current.send_replace(None);
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.current.borrow().clone()
    }

    /// Observation stream of the current user.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.current.subscribe()
    }
}

/// Fixed single-user provider for offline mode.
pub struct LocalAuthProvider {
    profile: UserProfile,
}

impl LocalAuthProvider {
    #[must_use]
    pub fn new(profile: UserProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self) -> Result<UserProfile, AuthError> {
        Ok(self.profile.clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}
