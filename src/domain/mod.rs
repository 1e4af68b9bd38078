pub mod document;
pub mod feed;
pub mod follow;
pub mod post;
pub mod user;

pub use document::{ParsedDocument, ParsedEntry};
pub use feed::{Feed, FeedListing};
pub use follow::{FeedFollow, FollowedFeed};
pub use post::Post;
pub use user::User;
