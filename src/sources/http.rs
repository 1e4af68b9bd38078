use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::errors::GatorResult;
use crate::sources::traits::DocumentFetcher;

/// Value of the `User-Agent` header on every feed request.
pub const USER_AGENT: &str = "gator";

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// `timeout` bounds the whole request/response cycle, body included.
    pub fn new(timeout: Duration) -> GatorResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> GatorResult<Vec<u8>> {
        let response = self.client.get(url).send()?;
        debug!("GET {} -> {}", url, response.status());

        let bytes = response.bytes()?;
        Ok(bytes.to_vec())
    }
}
