use rusqlite::Row;
use uuid::Uuid;

use crate::domain::Post;
use crate::errors::{GatorError, GatorResult};
use crate::storage::sqlite::connection::map_unique_violation;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::PostRepository;

#[derive(Clone)]
pub struct SqlitePostRepository {
    storage: SqliteStorage,
}

impl SqlitePostRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
        Ok(Post {
            id: row.get(0)?,
            created_at: row.get(1)?,
            updated_at: row.get(2)?,
            title: row.get(3)?,
            url: row.get(4)?,
            description: row.get(5)?,
            published_at: row.get(6)?,
            feed_id: row.get(7)?,
        })
    }
}

impl PostRepository for SqlitePostRepository {
    fn create(&self, post: &Post) -> GatorResult<Post> {
        let conn = self.storage.connection()?;

        // No OR IGNORE: callers rely on the UNIQUE(url) rejection.
        conn.execute(
            "INSERT INTO posts (id, created_at, updated_at, title, url, description, published_at, feed_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            (
                &post.id,
                &post.created_at,
                &post.updated_at,
                &post.title,
                &post.url,
                &post.description,
                &post.published_at,
                &post.feed_id,
            ),
        )
        .map_err(|e| map_unique_violation(e, &format!("posts.url = {}", post.url)))?;

        Ok(post.clone())
    }

    fn get_for_user(&self, user_id: Uuid, limit: u32) -> GatorResult<Vec<Post>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT posts.id, posts.created_at, posts.updated_at, posts.title, posts.url,
                    posts.description, posts.published_at, posts.feed_id
             FROM posts
             JOIN feed_follows ON feed_follows.feed_id = posts.feed_id
             WHERE feed_follows.user_id = ?1
             ORDER BY posts.published_at DESC, posts.id
             LIMIT ?2",
        )?;

        let posts = stmt.query_map((&user_id, limit), Self::from_row)?;
        posts.collect::<Result<Vec<_>, _>>().map_err(GatorError::from)
    }
}
