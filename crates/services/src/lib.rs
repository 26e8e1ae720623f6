#![forbid(unsafe_code)]

pub mod activity_service;
pub mod auth;
pub mod backend;
pub mod error;
pub mod preferences_service;
pub mod quotes;
pub mod session_service;

pub use mantra_core::Clock;

pub use activity_service::{ActivityService, ActivityWindows, SESSION_FETCH_LIMIT};
pub use auth::{AuthProvider, AuthService, LocalAuthProvider, UserProfile};
pub use backend::RemoteBackend;
pub use error::{AuthError, PreferencesServiceError, SessionServiceError};
pub use preferences_service::PreferencesService;
pub use quotes::{QUOTE_ROTATE_SECS, QuoteDeck};
pub use session_service::SessionService;
