use std::collections::HashMap;

use log::debug;

use crate::cli::commands::Commands;
use crate::cli::handlers;
use crate::config::{Config, Session};
use crate::domain::User;
use crate::errors::{GatorError, GatorResult};
use crate::services::UserService;
use crate::storage::{SqliteStorage, SqliteUserRepository};

/// Everything a command handler may touch.
pub struct AppContext {
    pub config: Config,
    pub session: Session,
    pub storage: SqliteStorage,
}

impl AppContext {
    pub fn new(config: Config, session: Session, storage: SqliteStorage) -> Self {
        Self {
            config,
            session,
            storage,
        }
    }
}

pub type OpenHandler = fn(&mut AppContext, &Commands) -> GatorResult<()>;
pub type LoggedInHandler = fn(&mut AppContext, &Commands, &User) -> GatorResult<()>;

#[derive(Clone, Copy)]
pub enum Handler {
    /// Runs for anyone.
    Open(OpenHandler),
    /// Runs only once `require_user` has resolved the session's user.
    LoggedIn(LoggedInHandler),
}

/// Maps command names to handlers. Built explicitly and handed to the
/// dispatcher, so tests can assemble their own.
#[derive(Default)]
pub struct CommandTable {
    handlers: HashMap<&'static str, Handler>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full gator command set
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register("register", Handler::Open(handlers::register));
        table.register("login", Handler::Open(handlers::login));
        table.register("reset", Handler::Open(handlers::reset));
        table.register("users", Handler::Open(handlers::users));
        table.register("agg", Handler::Open(handlers::agg));
        table.register("feeds", Handler::Open(handlers::feeds));
        table.register("addfeed", Handler::LoggedIn(handlers::add_feed));
        table.register("follow", Handler::LoggedIn(handlers::follow));
        table.register("following", Handler::LoggedIn(handlers::following));
        table.register("unfollow", Handler::LoggedIn(handlers::unfollow));
        table.register("browse", Handler::LoggedIn(handlers::browse));
        table
    }

    /// Register `handler` under `name`, replacing any previous entry
    pub fn register(&mut self, name: &'static str, handler: Handler) {
        self.handlers.insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).copied()
    }

    pub fn dispatch(&self, ctx: &mut AppContext, command: &Commands) -> GatorResult<()> {
        let name = command.name();
        let handler = self
            .get(name)
            .ok_or_else(|| GatorError::UnknownCommand(name.to_string()))?;

        debug!("Dispatching '{}'", name);
        match handler {
            Handler::Open(run) => run(ctx, command),
            Handler::LoggedIn(run) => {
                let user = require_user(ctx)?;
                run(ctx, command, &user)
            }
        }
    }
}

/// Resolve the session's current user against the database.
pub fn require_user(ctx: &AppContext) -> GatorResult<User> {
    let name = ctx
        .session
        .current_user_name()
        .ok_or(GatorError::NotLoggedIn)?;

    UserService::new(SqliteUserRepository::new(ctx.storage.clone())).get(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> AppContext {
        let session_path = dir.path().join("gatorconfig.json");
        let config = Config {
            db_path: None,
            session_path: session_path.clone(),
            poll_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(5),
        };
        let session = Session::load(&session_path).unwrap();
        AppContext::new(config, session, SqliteStorage::in_memory().unwrap())
    }

    fn accept(_: &mut AppContext, _: &Commands) -> GatorResult<()> {
        Ok(())
    }

    fn expect_kahya(_: &mut AppContext, _: &Commands, user: &User) -> GatorResult<()> {
        if user.name == "kahya" {
            Ok(())
        } else {
            Err(GatorError::InvalidInput(format!("got user {}", user.name)))
        }
    }

    #[test]
    fn test_unknown_command() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let table = CommandTable::new();

        let result = table.dispatch(&mut ctx, &Commands::Users);
        assert!(matches!(result, Err(GatorError::UnknownCommand(name)) if name == "users"));
    }

    #[test]
    fn test_open_handler_runs_without_user() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut table = CommandTable::new();
        table.register("users", Handler::Open(accept));

        assert!(table.dispatch(&mut ctx, &Commands::Users).is_ok());
    }

    #[test]
    fn test_logged_in_requires_session_user() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        let mut table = CommandTable::new();
        table.register("following", Handler::LoggedIn(expect_kahya));

        let result = table.dispatch(&mut ctx, &Commands::Following);
        assert!(matches!(result, Err(GatorError::NotLoggedIn)));
    }

    #[test]
    fn test_logged_in_requires_existing_user() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        ctx.session.set_user("ghost").unwrap();
        let mut table = CommandTable::new();
        table.register("following", Handler::LoggedIn(expect_kahya));

        let result = table.dispatch(&mut ctx, &Commands::Following);
        assert!(matches!(result, Err(GatorError::UserNotFound(name)) if name == "ghost"));
    }

    #[test]
    fn test_logged_in_handler_receives_user() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);
        UserService::new(SqliteUserRepository::new(ctx.storage.clone()))
            .register("kahya")
            .unwrap();
        ctx.session.set_user("kahya").unwrap();
        let mut table = CommandTable::new();
        table.register("following", Handler::LoggedIn(expect_kahya));

        assert!(table.dispatch(&mut ctx, &Commands::Following).is_ok());
    }

    #[test]
    fn test_standard_table_access_levels() {
        let table = CommandTable::standard();

        for name in ["register", "login", "reset", "users", "agg", "feeds"] {
            assert!(
                matches!(table.get(name), Some(Handler::Open(_))),
                "{} should be open",
                name
            );
        }
        for name in ["addfeed", "follow", "following", "unfollow", "browse"] {
            assert!(
                matches!(table.get(name), Some(Handler::LoggedIn(_))),
                "{} should require a user",
                name
            );
        }
    }
}
