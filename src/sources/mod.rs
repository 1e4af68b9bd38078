pub mod http;
pub mod rss;
pub mod traits;

pub use http::HttpFetcher;
pub use traits::DocumentFetcher;
