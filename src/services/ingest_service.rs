use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;
use thiserror::Error;

use crate::domain::{Feed, ParsedDocument, Post};
use crate::errors::{GatorError, GatorResult};
use crate::storage::traits::PostRepository;

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`.
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionReport {
    /// Entries an insert was issued for.
    pub attempted: usize,
    pub inserted: usize,
    pub duplicates: usize,
}

impl fmt::Display for IngestionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attempted, {} inserted, {} duplicates",
            self.attempted, self.inserted, self.duplicates
        )
    }
}

/// Ingestion stopped part-way through a document. Entries counted in
/// `report` stay committed.
#[derive(Error, Debug)]
#[error("{error} (after {report})")]
pub struct PartialIngestion {
    pub report: IngestionReport,
    #[source]
    pub error: GatorError,
}

/// `PUB_DATE_FORMAT` without the weekday.
const PUB_DATE_FORMAT_NO_WEEKDAY: &str = "%d %b %Y %H:%M:%S %z";

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Parse a `pubDate` in `PUB_DATE_FORMAT`. The weekday must be a valid
/// abbreviation but need not agree with the date.
pub fn parse_pub_date(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let parsed = match value.split_once(", ") {
        Some((weekday, rest)) if WEEKDAYS.iter().any(|d| d.eq_ignore_ascii_case(weekday)) => {
            DateTime::parse_from_str(rest, PUB_DATE_FORMAT_NO_WEEKDAY)
        }
        // Let chrono report the error against the full format.
        _ => DateTime::parse_from_str(value, PUB_DATE_FORMAT),
    };
    parsed.map(|dt| dt.with_timezone(&Utc))
}

pub struct IngestService<P: PostRepository> {
    posts: P,
}

impl<P: PostRepository> IngestService<P> {
    pub fn new(posts: P) -> Self {
        Self { posts }
    }

    /// Store every entry of `document` as a post of `feed`, in document order.
    ///
    /// An entry whose URL is already stored is counted as a duplicate and
    /// skipped. An unparseable publication date or any other store error
    /// stops the run; nothing after the failing entry is attempted.
    pub fn ingest(
        &self,
        feed: &Feed,
        document: &ParsedDocument,
    ) -> Result<IngestionReport, PartialIngestion> {
        let mut report = IngestionReport::default();

        for entry in &document.entries {
            let published_at = match parse_pub_date(&entry.pub_date) {
                Ok(published_at) => published_at,
                Err(source) => {
                    let error = GatorError::DateFormat {
                        feed: feed.name.clone(),
                        entry: entry.title.clone(),
                        value: entry.pub_date.clone(),
                        source,
                    };
                    return Err(PartialIngestion { report, error });
                }
            };

            let post = Post::new(
                feed.id,
                entry.title.clone(),
                entry.link.clone(),
                entry.description.clone(),
                published_at,
                Utc::now(),
            );

            report.attempted += 1;
            match self.store(&post) {
                Ok(true) => report.inserted += 1,
                Ok(false) => {
                    debug!("Skipping {} from feed {}: already stored", post.url, feed.name);
                    report.duplicates += 1;
                }
                Err(error) => return Err(PartialIngestion { report, error }),
            }
        }

        Ok(report)
    }

    /// `Ok(false)` when the post already exists.
    fn store(&self, post: &Post) -> GatorResult<bool> {
        match self.posts.create(post) {
            Ok(_) => Ok(true),
            Err(e) if e.is_unique_violation() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
