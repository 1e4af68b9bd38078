pub mod feed_service;
pub mod ingest_service;
pub mod poll_service;
pub mod post_service;
pub mod ticker;
pub mod user_service;

pub use feed_service::FeedService;
pub use ingest_service::{IngestService, IngestionReport, PartialIngestion};
pub use poll_service::{PollOutcome, PollService, PollState};
pub use post_service::PostService;
pub use ticker::Ticker;
pub use user_service::UserService;
