use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use mantra_core::activity::MAX_WINDOW_DAYS;
use mantra_core::model::{BackendSettings, Theme, UserId};
use services::{
    ActivityService, ActivityWindows, AuthProvider, AuthService, Clock, LocalAuthProvider,
    PreferencesService, RemoteBackend, SessionService, UserProfile,
};
use storage::repository::{SessionRepository, Storage};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidUser { raw: String },
    InvalidHeatmapDays { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUser { raw } => write!(f, "invalid --user value: {raw}"),
            ArgsError::InvalidHeatmapDays { raw } => {
                write!(f, "invalid --heatmap-days value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    initial_theme: Theme,
    auth: Arc<AuthService>,
    sessions: Arc<SessionService>,
    activity: Arc<ActivityService>,
    preferences: Arc<PreferencesService>,
}

impl UiApp for DesktopApp {
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

struct Args {
    db_url: String,
    backend_url: Option<String>,
    api_key: Option<String>,
    user: UserId,
    heatmap_days: usize,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--db <sqlite_url>] [--backend <url>] [--api-key <key>] \
         [--user <id>] [--heatmap-days <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://mantra.sqlite3");
    eprintln!("  --user local          (ignored when --backend is set)");
    eprintln!("  --heatmap-days 182    (1..={MAX_WINDOW_DAYS})");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MANTRA_DB_URL, MANTRA_BACKEND_URL, MANTRA_API_KEY");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("MANTRA_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://mantra.sqlite3".into(), normalize_sqlite_url);
        let mut backend_url = std::env::var("MANTRA_BACKEND_URL").ok();
        let mut api_key = std::env::var("MANTRA_API_KEY").ok();
        let mut user = UserId::new("local").map_err(|_| ArgsError::InvalidUser {
            raw: "local".into(),
        })?;
        let mut heatmap_days = ActivityWindows::default().heatmap_days;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--backend" => {
                    backend_url = Some(require_value(args, "--backend")?);
                }
                "--api-key" => {
                    api_key = Some(require_value(args, "--api-key")?);
                }
                "--user" => {
                    let value = require_value(args, "--user")?;
                    user = UserId::new(&value)
                        .map_err(|_| ArgsError::InvalidUser { raw: value })?;
                }
                "--heatmap-days" => {
                    let value = require_value(args, "--heatmap-days")?;
                    heatmap_days = value
                        .parse::<usize>()
                        .ok()
                        .filter(|days| (1..=MAX_WINDOW_DAYS).contains(days))
                        .ok_or(ArgsError::InvalidHeatmapDays { raw: value })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            backend_url,
            api_key,
            user,
            heatmap_days,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    // `sqlite:file:...` carries its own query options (shared-cache in-memory
    // databases and the like), so it is never treated as a bare path.
    if raw == "sqlite::memory:"
        || raw.starts_with("sqlite://")
        || raw.starts_with("sqlite:file:")
    {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    // In-memory databases and `sqlite:file:` URLs have nothing to create on
    // disk up front; the driver interprets those itself.
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Preferences always live here; session
    // history does too unless a hosted backend is configured.
    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;

    let clock = Clock::default_clock();

    let (auth_provider, session_repo): (Arc<dyn AuthProvider>, Arc<dyn SessionRepository>) =
        match &args.backend_url {
            Some(url) => {
                let settings = BackendSettings::new(url.clone(), args.api_key.clone())?;
                let backend = Arc::new(RemoteBackend::new(settings));
                (
                    Arc::clone(&backend) as Arc<dyn AuthProvider>,
                    backend as Arc<dyn SessionRepository>,
                )
            }
            None => (
                Arc::new(LocalAuthProvider::new(UserProfile::new(
                    args.user.clone(),
                    None,
                ))) as Arc<dyn AuthProvider>,
                Arc::clone(&storage.sessions),
            ),
        };

    let auth = Arc::new(AuthService::new(auth_provider));
    let sessions = Arc::new(SessionService::new(clock, Arc::clone(&session_repo)));
    let activity = Arc::new(ActivityService::new(
        clock,
        session_repo,
        ActivityWindows {
            heatmap_days: args.heatmap_days,
            ..ActivityWindows::default()
        },
    ));
    let preferences = Arc::new(PreferencesService::new(Arc::clone(&storage.preferences)));

    let initial_theme = match preferences.load().await {
        Ok(prefs) => prefs.theme,
        Err(err) => {
            tracing::debug!(error = %err, "loading preferences failed, using default theme");
            Theme::default()
        }
    };

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        initial_theme,
        auth,
        sessions,
        activity,
        preferences,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev
    // setups. Explicitly disable it so the app doesn't behave like a modal.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Mantra")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_urls_pass_through_unchanged() {
        for url in [
            "sqlite::memory:",
            "sqlite:///tmp/mantra.sqlite3",
            "sqlite:file:memdb?mode=memory&cache=shared",
        ] {
            assert_eq!(normalize_sqlite_url(url.to_string()), url);
        }
    }

    #[test]
    fn bare_paths_become_absolute_sqlite_urls() {
        let normalized = normalize_sqlite_url("mantra.sqlite3".into());
        assert!(normalized.starts_with("sqlite://"));
        assert!(normalized.ends_with("/mantra.sqlite3"));

        let prefixed = normalize_sqlite_url("sqlite:mantra.sqlite3".into());
        assert_eq!(prefixed, normalized);
    }

    #[test]
    fn heatmap_days_flag_rejects_out_of_range_values() {
        for raw in ["0", "150000000000", "plenty"] {
            let args = ["--heatmap-days", raw];
            let mut argv = args.iter().map(ToString::to_string);
            assert!(matches!(
                Args::parse(&mut argv),
                Err(ArgsError::InvalidHeatmapDays { .. })
            ));
        }

        let mut argv = ["--heatmap-days", "182"].iter().map(ToString::to_string);
        assert_eq!(Args::parse(&mut argv).unwrap().heatmap_days, 182);
    }
}
