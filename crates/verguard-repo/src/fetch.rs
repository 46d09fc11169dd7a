//! Transport for repository addresses.
//!
//! `http(s)://` bases go over a blocking HTTP client with a caller-supplied
//! timeout; any other base is treated as a filesystem path, which also keeps
//! tests and air-gapped mirrors off the network.

use std::time::Duration;
use thiserror::Error;

/// A failed fetch. Always non-fatal at the per-repository level: the locator
/// treats it as "try the next repository".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unreachable {address}: {reason}")]
    Unreachable { address: String, reason: String },
}

impl FetchError {
    pub(crate) fn unreachable(address: &str, reason: impl ToString) -> Self {
        Self::Unreachable {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// The IO seam. Production uses [`DefaultFetcher`]; tests substitute an
/// in-memory map.
pub trait Fetcher {
    fn fetch(&self, address: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct DefaultFetcher {
    client: reqwest::blocking::Client,
}

impl DefaultFetcher {
    /// `timeout` bounds each HTTP request end to end; expiry makes that
    /// repository count as unreachable.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for DefaultFetcher {
    fn fetch(&self, address: &str) -> Result<Vec<u8>, FetchError> {
        if address.starts_with("http://") || address.starts_with("https://") {
            let response = self
                .client
                .get(address)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| FetchError::unreachable(address, e))?;
            let body = response
                .bytes()
                .map_err(|e| FetchError::unreachable(address, e))?;
            Ok(body.to_vec())
        } else {
            std::fs::read(address).map_err(|e| FetchError::unreachable(address, e))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_address_reads_file() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let path = tmp.path().join("doc.xml");
        std::fs::write(&path, "<metadata/>").expect("write file");

        let fetcher = DefaultFetcher::new(Duration::from_secs(5)).expect("build fetcher");
        let body = fetcher.fetch(path.to_str().unwrap()).expect("fetch");
        assert_eq!(body, b"<metadata/>");
    }

    #[test]
    fn missing_file_is_unreachable() {
        let fetcher = DefaultFetcher::new(Duration::from_secs(5)).expect("build fetcher");
        let err = fetcher.fetch("/nonexistent/path/doc.xml").unwrap_err();
        assert!(matches!(err, FetchError::Unreachable { .. }));
    }
}
