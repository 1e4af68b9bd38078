pub mod duration;
pub mod session;

use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{GatorError, GatorResult};

pub use duration::parse_interval;
pub use session::Session;

const DEFAULT_POLL_INTERVAL: &str = "1m";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit database path from the environment, if any.
    pub db_path: Option<String>,
    pub session_path: PathBuf,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    fn beside_exe(file: &str) -> PathBuf {
        Self::exe_dir()
            .map(|d| d.join(file))
            .unwrap_or_else(|| PathBuf::from(".").join(file))
    }

    pub fn from_env() -> GatorResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let db_path = std::env::var("GATOR_DB_PATH").ok();

        let session_path = std::env::var("GATOR_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::beside_exe("gatorconfig.json"));

        let poll_interval = parse_interval(
            &std::env::var("GATOR_POLL_INTERVAL")
                .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL.to_string()),
        )?;

        let request_timeout = match std::env::var("GATOR_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    GatorError::Config(format!(
                        "GATOR_REQUEST_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
                        raw
                    ))
                })?,
            Err(_) => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            db_path,
            session_path,
            poll_interval,
            request_timeout,
        })
    }

    /// Environment first, then the session file, then `gator.db` beside the
    /// executable.
    pub fn resolve_db_path(&self, session: &Session) -> PathBuf {
        self.db_path
            .as_deref()
            .or(session.db_path())
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::beside_exe("gator.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(db_path: Option<&str>) -> Config {
        Config {
            db_path: db_path.map(str::to_string),
            session_path: PathBuf::from("unused.json"),
            poll_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_env_db_path_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gatorconfig.json");
        std::fs::write(&path, r#"{"db_path": "from-session.db"}"#).unwrap();
        let session = Session::load(&path).unwrap();

        let resolved = config(Some("from-env.db")).resolve_db_path(&session);
        assert_eq!(resolved, PathBuf::from("from-env.db"));
    }

    #[test]
    fn test_session_db_path_used_without_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gatorconfig.json");
        std::fs::write(&path, r#"{"db_path": "from-session.db"}"#).unwrap();
        let session = Session::load(&path).unwrap();

        let resolved = config(None).resolve_db_path(&session);
        assert_eq!(resolved, PathBuf::from("from-session.db"));
    }

    #[test]
    fn test_default_db_path() {
        let dir = TempDir::new().unwrap();
        let session = Session::load(dir.path().join("missing.json")).unwrap();

        let resolved = config(None).resolve_db_path(&session);
        assert!(resolved.ends_with("gator.db"));
    }
}
