use clap::{Parser, Subcommand};

use crate::services::post_service::DEFAULT_BROWSE_LIMIT;

#[derive(Parser)]
#[command(name = "gator")]
#[command(about = "Personal RSS aggregator: follow feeds and browse their newest posts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create a user and log in as them
    Register {
        /// Unique user name
        name: String,
    },

    /// Log in as an existing user
    Login {
        /// User name
        name: String,
    },

    /// Delete all users, feeds, follows and posts
    Reset,

    /// List registered users
    Users,

    /// Poll feeds forever, one feed per tick
    Agg {
        /// Time between requests, e.g. 30s, 1m, 1h30m (defaults to GATOR_POLL_INTERVAL)
        interval: Option<String>,
    },

    /// Add a feed and follow it
    #[command(name = "addfeed")]
    AddFeed {
        /// Display name of the feed
        name: String,
        /// RSS feed URL
        url: String,
    },

    /// List all feeds
    Feeds,

    /// Follow an existing feed by URL
    Follow {
        /// Feed URL
        url: String,
    },

    /// List the feeds you follow
    Following,

    /// Stop following a feed
    Unfollow {
        /// Feed URL
        url: String,
    },

    /// Show the newest posts from the feeds you follow
    Browse {
        /// Number of posts to show
        #[arg(default_value_t = DEFAULT_BROWSE_LIMIT)]
        limit: u32,
    },
}

impl Commands {
    /// The name the command is registered under in a `CommandTable`
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Register { .. } => "register",
            Commands::Login { .. } => "login",
            Commands::Reset => "reset",
            Commands::Users => "users",
            Commands::Agg { .. } => "agg",
            Commands::AddFeed { .. } => "addfeed",
            Commands::Feeds => "feeds",
            Commands::Follow { .. } => "follow",
            Commands::Following => "following",
            Commands::Unfollow { .. } => "unfollow",
            Commands::Browse { .. } => "browse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("gator").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_browse_default_limit() {
        assert_eq!(parse(&["browse"]), Commands::Browse { limit: 2 });
        assert_eq!(parse(&["browse", "10"]), Commands::Browse { limit: 10 });
    }

    #[test]
    fn test_addfeed_name_matches_subcommand() {
        let cmd = parse(&["addfeed", "HN", "https://news.ycombinator.com/rss"]);
        assert_eq!(cmd.name(), "addfeed");
        assert_eq!(
            cmd,
            Commands::AddFeed {
                name: "HN".to_string(),
                url: "https://news.ycombinator.com/rss".to_string(),
            }
        );
    }

    #[test]
    fn test_agg_interval_optional() {
        assert_eq!(parse(&["agg"]), Commands::Agg { interval: None });
        assert_eq!(
            parse(&["agg", "30s"]),
            Commands::Agg {
                interval: Some("30s".to_string())
            }
        );
    }

    #[test]
    fn test_negative_browse_limit_rejected() {
        assert!(Cli::try_parse_from(["gator", "browse", "-1"]).is_err());
    }
}
