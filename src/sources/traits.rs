use crate::errors::GatorResult;

#[cfg_attr(test, mockall::automock)]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the raw body at `url`. Only transport failures are errors; the
    /// HTTP status is not interpreted.
    fn fetch(&self, url: &str) -> GatorResult<Vec<u8>>;
}
