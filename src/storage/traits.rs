use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Feed, FeedFollow, FeedListing, FollowedFeed, Post, User};
use crate::errors::GatorResult;

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Fails with `UniqueViolation` when the name is taken.
    fn create(&self, user: &User) -> GatorResult<()>;
    fn get_by_name(&self, name: &str) -> GatorResult<Option<User>>;
    fn get_all(&self) -> GatorResult<Vec<User>>;
    /// Deletes every user; feeds, follows and posts cascade.
    fn reset(&self) -> GatorResult<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait FeedRepository: Send + Sync {
    /// Fails with `UniqueViolation` when the URL is already registered.
    fn create(&self, feed: &Feed) -> GatorResult<()>;
    fn get_by_url(&self, url: &str) -> GatorResult<Option<Feed>>;
    fn get_all_with_owners(&self) -> GatorResult<Vec<FeedListing>>;

    /// The feed with the oldest `last_fetched_at`, never-fetched feeds first.
    /// Ties break on `created_at`, then on `id`.
    fn get_next_to_fetch(&self) -> GatorResult<Option<Feed>>;

    /// Sets `last_fetched_at` to `fetched_at` unless the stored value is
    /// already later. Fails with `FeedNotFound` for an unknown id.
    fn mark_fetched(&self, id: Uuid, fetched_at: DateTime<Utc>) -> GatorResult<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait FollowRepository: Send + Sync {
    /// Fails with `UniqueViolation` when the user already follows the feed.
    fn create(&self, follow: &FeedFollow) -> GatorResult<()>;
    fn get_for_user(&self, user_id: Uuid) -> GatorResult<Vec<FollowedFeed>>;
    fn remove(&self, user_id: Uuid, feed_id: Uuid) -> GatorResult<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PostRepository: Send + Sync {
    /// Fails with `UniqueViolation` when a post with the same URL exists.
    /// The existing row is left untouched.
    fn create(&self, post: &Post) -> GatorResult<Post>;
    /// Newest first, across all feeds the user follows.
    fn get_for_user(&self, user_id: Uuid, limit: u32) -> GatorResult<Vec<Post>>;
}
