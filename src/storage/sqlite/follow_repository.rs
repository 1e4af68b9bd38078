use uuid::Uuid;

use crate::domain::{FeedFollow, FollowedFeed};
use crate::errors::{GatorError, GatorResult};
use crate::storage::sqlite::connection::map_unique_violation;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::FollowRepository;

#[derive(Clone)]
pub struct SqliteFollowRepository {
    storage: SqliteStorage,
}

impl SqliteFollowRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl FollowRepository for SqliteFollowRepository {
    fn create(&self, follow: &FeedFollow) -> GatorResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO feed_follows (id, created_at, updated_at, user_id, feed_id) VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &follow.id,
                &follow.created_at,
                &follow.updated_at,
                &follow.user_id,
                &follow.feed_id,
            ),
        )
        .map_err(|e| map_unique_violation(e, "feed_follows(user_id, feed_id)"))?;

        Ok(())
    }

    fn get_for_user(&self, user_id: Uuid) -> GatorResult<Vec<FollowedFeed>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT feeds.id, feeds.name, feeds.url
             FROM feed_follows
             JOIN feeds ON feeds.id = feed_follows.feed_id
             WHERE feed_follows.user_id = ?1
             ORDER BY feed_follows.created_at, feeds.name",
        )?;

        let follows = stmt.query_map([&user_id], |row| {
            Ok(FollowedFeed {
                feed_id: row.get(0)?,
                feed_name: row.get(1)?,
                feed_url: row.get(2)?,
            })
        })?;

        follows.collect::<Result<Vec<_>, _>>().map_err(GatorError::from)
    }

    fn remove(&self, user_id: Uuid, feed_id: Uuid) -> GatorResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "DELETE FROM feed_follows WHERE user_id = ?1 AND feed_id = ?2",
            (&user_id, &feed_id),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Feed, User};
    use crate::storage::sqlite::{SqliteFeedRepository, SqliteUserRepository};
    use crate::storage::traits::{FeedRepository, UserRepository};

    fn setup() -> (SqliteFollowRepository, User, Feed) {
        let storage = SqliteStorage::in_memory().unwrap();
        let user = User::new("kahya".to_string());
        SqliteUserRepository::new(storage.clone()).create(&user).unwrap();

        let feed = Feed::new(
            "Hacker News".to_string(),
            "https://news.ycombinator.com/rss".to_string(),
            user.id,
        );
        SqliteFeedRepository::new(storage.clone()).create(&feed).unwrap();

        (SqliteFollowRepository::new(storage), user, feed)
    }

    #[test]
    fn test_follow_and_list() {
        let (repo, user, feed) = setup();

        repo.create(&FeedFollow::new(user.id, feed.id)).unwrap();

        let follows = repo.get_for_user(user.id).unwrap();
        assert_eq!(follows.len(), 1);
        assert_eq!(follows[0].feed_id, feed.id);
        assert_eq!(follows[0].feed_name, "Hacker News");
        assert_eq!(follows[0].feed_url, "https://news.ycombinator.com/rss");
    }

    #[test]
    fn test_duplicate_follow_rejected() {
        let (repo, user, feed) = setup();

        repo.create(&FeedFollow::new(user.id, feed.id)).unwrap();
        let result = repo.create(&FeedFollow::new(user.id, feed.id));

        assert!(matches!(result, Err(GatorError::UniqueViolation(_))));
    }

    #[test]
    fn test_remove_follow() {
        let (repo, user, feed) = setup();
        repo.create(&FeedFollow::new(user.id, feed.id)).unwrap();

        repo.remove(user.id, feed.id).unwrap();

        assert!(repo.get_for_user(user.id).unwrap().is_empty());
    }

    #[test]
    fn test_follow_unknown_feed_is_a_database_error() {
        let (repo, user, _) = setup();
        let result = repo.create(&FeedFollow::new(user.id, Uuid::new_v4()));
        assert!(matches!(result, Err(GatorError::Database(_))));
    }
}
