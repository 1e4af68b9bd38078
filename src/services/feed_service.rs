use url::Url;

use crate::domain::{Feed, FeedFollow, FeedListing, FollowedFeed, User};
use crate::errors::{GatorError, GatorResult};
use crate::storage::traits::{FeedRepository, FollowRepository};

pub struct FeedService<R: FeedRepository, F: FollowRepository> {
    feeds: R,
    follows: F,
}

impl<R: FeedRepository, F: FollowRepository> FeedService<R, F> {
    pub fn new(feeds: R, follows: F) -> Self {
        Self { feeds, follows }
    }

    /// Register a feed owned by `user` and follow it on their behalf
    pub fn add(&self, user: &User, name: &str, url: &str) -> GatorResult<Feed> {
        let url = validate_url(url)?;
        let feed = Feed::new(name.to_string(), url.clone(), user.id);

        self.feeds.create(&feed).map_err(|e| match e {
            GatorError::UniqueViolation(_) => GatorError::FeedAlreadyExists(url),
            other => other,
        })?;

        self.follow_feed(user, &feed)?;
        Ok(feed)
    }

    /// List all feeds with the names of the users who added them
    pub fn list(&self) -> GatorResult<Vec<FeedListing>> {
        self.feeds.get_all_with_owners()
    }

    /// Follow an already registered feed by URL
    pub fn follow(&self, user: &User, url: &str) -> GatorResult<Feed> {
        let feed = self
            .feeds
            .get_by_url(url)?
            .ok_or_else(|| GatorError::FeedNotFound(url.to_string()))?;

        self.follow_feed(user, &feed)?;
        Ok(feed)
    }

    pub fn following(&self, user: &User) -> GatorResult<Vec<FollowedFeed>> {
        self.follows.get_for_user(user.id)
    }

    /// Stop following the feed at `url`; fails if the user does not follow it
    pub fn unfollow(&self, user: &User, url: &str) -> GatorResult<FollowedFeed> {
        let followed = self
            .follows
            .get_for_user(user.id)?
            .into_iter()
            .find(|f| f.feed_url == url)
            .ok_or_else(|| GatorError::NotFollowing(url.to_string()))?;

        self.follows.remove(user.id, followed.feed_id)?;
        Ok(followed)
    }

    fn follow_feed(&self, user: &User, feed: &Feed) -> GatorResult<()> {
        self.follows
            .create(&FeedFollow::new(user.id, feed.id))
            .map_err(|e| match e {
                GatorError::UniqueViolation(_) => GatorError::AlreadyFollowing(feed.url.clone()),
                other => other,
            })
    }
}

/// Feeds are fetched over HTTP, so only absolute http(s) URLs are accepted.
fn validate_url(raw: &str) -> GatorResult<String> {
    let parsed = Url::parse(raw).map_err(|e| GatorError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(raw.to_string()),
        _ => Err(GatorError::InvalidUrl(format!(
            "{}: expected an http or https URL",
            raw
        ))),
    }
}
