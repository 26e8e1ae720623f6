mod backend;
mod counter;
mod ids;
mod preferences;
mod session;
mod word;

pub use backend::{BackendSettings, BackendSettingsDraft, BackendSettingsError};
pub use counter::Counter;
pub use ids::{ParseIdError, SessionId, UserId};
pub use preferences::{Preferences, Theme, ThemeParseError};
pub use session::{PracticeSession, PracticeSessionError};
pub use word::{Word, WordError, builtin_words};
