pub mod sqlite;
pub mod traits;

pub use sqlite::{
    SqliteFeedRepository, SqliteFollowRepository, SqlitePostRepository, SqliteStorage,
    SqliteUserRepository,
};
pub use traits::{FeedRepository, FollowRepository, PostRepository, UserRepository};
