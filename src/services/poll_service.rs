use std::fmt;
use std::time::Duration;

use chrono::Utc;
use log::{debug, error, info};

use crate::domain::Feed;
use crate::errors::GatorError;
use crate::services::ingest_service::{IngestService, IngestionReport};
use crate::services::ticker::Ticker;
use crate::sources::{rss, DocumentFetcher};
use crate::storage::traits::{FeedRepository, PostRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Selecting,
    Fetching,
    Ingesting,
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PollState::Idle => "idle",
            PollState::Selecting => "selecting",
            PollState::Fetching => "fetching",
            PollState::Ingesting => "ingesting",
        };
        f.write_str(name)
    }
}

/// What a single poll cycle did.
#[derive(Debug)]
pub enum PollOutcome {
    /// No feeds are registered.
    Idle,
    Completed {
        feed: Feed,
        report: IngestionReport,
    },
    /// The cycle ended early. `feed` is `None` when selection itself failed;
    /// `report` covers whatever was committed before the error.
    Failed {
        feed: Option<Feed>,
        report: IngestionReport,
        error: GatorError,
    },
}

/// Polls feeds one at a time, least recently fetched first.
pub struct PollService<F, P, D>
where
    F: FeedRepository,
    P: PostRepository,
    D: DocumentFetcher,
{
    feeds: F,
    ingest: IngestService<P>,
    fetcher: D,
}

impl<F, P, D> PollService<F, P, D>
where
    F: FeedRepository,
    P: PostRepository,
    D: DocumentFetcher,
{
    pub fn new(feeds: F, posts: P, fetcher: D) -> Self {
        Self {
            feeds,
            ingest: IngestService::new(posts),
            fetcher,
        }
    }

    /// Poll forever, one cycle per tick. The first cycle runs immediately.
    /// Cycle failures are logged and never end the loop.
    pub fn run(&self, interval: Duration) -> ! {
        let mut ticker = Ticker::new(interval);
        info!("Collecting feeds every {:?}", ticker.interval());

        loop {
            ticker.tick();
            self.poll_once();
        }
    }

    /// Run one select → mark → fetch → parse → ingest cycle.
    pub fn poll_once(&self) -> PollOutcome {
        let outcome = self.cycle();

        match &outcome {
            PollOutcome::Idle => debug!("No feeds to fetch"),
            PollOutcome::Completed { feed, report } => {
                info!("Fetched feed '{}' ({}): {}", feed.name, feed.id, report)
            }
            PollOutcome::Failed {
                feed: Some(feed),
                report,
                error,
            } => error!(
                "Error scraping feed '{}' ({}): {} [{}]",
                feed.name, feed.id, error, report
            ),
            PollOutcome::Failed {
                feed: None, error, ..
            } => error!("Error selecting next feed: {}", error),
        }
        transition(PollState::Idle);

        outcome
    }

    fn cycle(&self) -> PollOutcome {
        transition(PollState::Selecting);
        let feed = match self.feeds.get_next_to_fetch() {
            Ok(Some(feed)) => feed,
            Ok(None) => return PollOutcome::Idle,
            Err(error) => {
                return PollOutcome::Failed {
                    feed: None,
                    report: IngestionReport::default(),
                    error,
                }
            }
        };

        // Marked before fetching so a feed that hangs or fails still goes to
        // the back of the queue.
        if let Err(error) = self.feeds.mark_fetched(feed.id, Utc::now()) {
            return failed(feed, IngestionReport::default(), error);
        }

        transition(PollState::Fetching);
        let document = match self
            .fetcher
            .fetch(&feed.url)
            .and_then(|bytes| rss::parse(&bytes))
        {
            Ok(document) => document,
            Err(error) => return failed(feed, IngestionReport::default(), error),
        };

        transition(PollState::Ingesting);
        match self.ingest.ingest(&feed, &document) {
            Ok(report) => PollOutcome::Completed { feed, report },
            Err(partial) => failed(feed, partial.report, partial.error),
        }
    }
}

fn failed(feed: Feed, report: IngestionReport, error: GatorError) -> PollOutcome {
    PollOutcome::Failed {
        feed: Some(feed),
        report,
        error,
    }
}

fn transition(state: PollState) {
    debug!("poll cycle -> {}", state);
}
