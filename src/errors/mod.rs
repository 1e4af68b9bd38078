use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatorError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid duration '{0}': expected e.g. 30s, 1m, 1h30m")]
    InvalidDuration(String),

    // Session errors
    #[error("No user is logged in; run 'login <name>' or 'register <name>' first")]
    NotLoggedIn,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    #[error("Feed already exists: {0}")]
    FeedAlreadyExists(String),

    #[error("Already following feed: {0}")]
    AlreadyFollowing(String),

    #[error("You are not following this feed: {0}")]
    NotFollowing(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedFormat(String),

    #[error("Couldn't parse date '{value}' of entry '{entry}' in feed '{feed}': {source}")]
    DateFormat {
        feed: String,
        entry: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    // Storage errors
    #[error("Duplicate value for unique key: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No such command: {0}")]
    UnknownCommand(String),
}

impl GatorError {
    /// Whether this error is the store rejecting a duplicate unique key.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, GatorError::UniqueViolation(_))
    }
}

pub type GatorResult<T> = Result<T, GatorError>;
