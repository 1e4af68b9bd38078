use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ingested feed entry. Posts are never updated once stored; the URL is
/// unique across every feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub url: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub feed_id: Uuid,
}

impl Post {
    /// Stamps a fresh identity and `created_at`/`updated_at` of `now`.
    pub fn new(
        feed_id: Uuid,
        title: String,
        url: String,
        description: String,
        published_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title,
            url,
            description,
            published_at,
            feed_id,
        }
    }
}
