use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub url: String,
    pub user_id: Uuid,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl Feed {
    /// A feed that has never been polled.
    pub fn new(name: String, url: String, user_id: Uuid) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name,
            url,
            user_id,
            last_fetched_at: None,
        }
    }
}

/// A feed row joined with the name of the user who added it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedListing {
    pub feed: Feed,
    pub owner_name: String,
}
