use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row};
use uuid::Uuid;

use crate::domain::{Feed, FeedListing};
use crate::errors::{GatorError, GatorResult};
use crate::storage::sqlite::connection::map_unique_violation;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::FeedRepository;

const FEED_COLUMNS: &str =
    "feeds.id, feeds.created_at, feeds.updated_at, feeds.name, feeds.url, feeds.user_id, feeds.last_fetched_at";

#[derive(Clone)]
pub struct SqliteFeedRepository {
    storage: SqliteStorage,
}

impl SqliteFeedRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Feed> {
        Ok(Feed {
            id: row.get(0)?,
            created_at: row.get(1)?,
            updated_at: row.get(2)?,
            name: row.get(3)?,
            url: row.get(4)?,
            user_id: row.get(5)?,
            last_fetched_at: row.get(6)?,
        })
    }
}

impl FeedRepository for SqliteFeedRepository {
    fn create(&self, feed: &Feed) -> GatorResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO feeds (id, created_at, updated_at, name, url, user_id, last_fetched_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                &feed.id,
                &feed.created_at,
                &feed.updated_at,
                &feed.name,
                &feed.url,
                &feed.user_id,
                &feed.last_fetched_at,
            ),
        )
        .map_err(|e| map_unique_violation(e, "feeds.url"))?;

        Ok(())
    }

    fn get_by_url(&self, url: &str) -> GatorResult<Option<Feed>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM feeds WHERE url = ?1", FEED_COLUMNS))?;

        stmt.query_row([url], Self::from_row)
            .optional()
            .map_err(GatorError::from)
    }

    fn get_all_with_owners(&self) -> GatorResult<Vec<FeedListing>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {}, users.name FROM feeds JOIN users ON users.id = feeds.user_id ORDER BY feeds.created_at, feeds.id",
            FEED_COLUMNS
        ))?;

        let listings = stmt.query_map([], |row| {
            Ok(FeedListing {
                feed: Self::from_row(row)?,
                owner_name: row.get(7)?,
            })
        })?;

        listings.collect::<Result<Vec<_>, _>>().map_err(GatorError::from)
    }

    fn get_next_to_fetch(&self) -> GatorResult<Option<Feed>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM feeds ORDER BY last_fetched_at ASC NULLS FIRST, created_at ASC, id ASC LIMIT 1",
            FEED_COLUMNS
        ))?;

        stmt.query_row([], Self::from_row)
            .optional()
            .map_err(GatorError::from)
    }

    fn mark_fetched(&self, id: Uuid, fetched_at: DateTime<Utc>) -> GatorResult<()> {
        let conn = self.storage.connection()?;

        // Timestamps share one text encoding, so string order is time order.
        let updated = conn.execute(
            "UPDATE feeds SET
                last_fetched_at = CASE
                    WHEN last_fetched_at IS NULL OR last_fetched_at < ?2 THEN ?2
                    ELSE last_fetched_at
                END,
                updated_at = ?2
             WHERE id = ?1",
            (&id, &fetched_at),
        )?;

        if updated == 0 {
            return Err(GatorError::FeedNotFound(id.to_string()));
        }

        Ok(())
    }
}
