use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

use super::error::AcquireError;

/// State of one in-flight download, owned by a single request.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    /// URL of the current hop.
    pub url: Url,
    pub dest_dir: PathBuf,
    /// Redirects followed so far.
    pub redirects: u32,
    /// Deadline applied to each hop.
    pub deadline: Duration,
}

impl DownloadTask {
    pub fn new(url: Url, dest_dir: PathBuf, deadline: Duration) -> Self {
        Self {
            url,
            dest_dir,
            redirects: 0,
            deadline,
        }
    }

    /// Parses and checks a source URL.
    pub fn parse_source(raw: &str) -> Result<Url, AcquireError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| AcquireError::invalid_source(raw, e.to_string()))?;
        check_scheme(&url)?;
        Ok(url)
    }

    /// Moves to the next hop given a `Location` header value.
    ///
    /// Relative targets resolve against the current URL. Fails once more than
    /// `max_redirects` hops have been taken. Repeated URLs are not detected.
    pub fn follow(&mut self, location: &str, max_redirects: u32) -> Result<(), AcquireError> {
        self.redirects += 1;
        if self.redirects > max_redirects {
            return Err(AcquireError::TooManyRedirects {
                max: max_redirects,
                last_url: self.url.to_string(),
            });
        }

        let next = self
            .url
            .join(location)
            .map_err(|e| AcquireError::invalid_redirect(location, e.to_string()))?;
        if let Some(reason) = unsupported_scheme(&next) {
            return Err(AcquireError::invalid_redirect(next.as_str(), reason));
        }

        self.url = next;
        Ok(())
    }
}

fn unsupported_scheme(url: &Url) -> Option<String> {
    match url.scheme() {
        "http" | "https" => None,
        other => Some(format!("unsupported scheme '{}'", other)),
    }
}

fn check_scheme(url: &Url) -> Result<(), AcquireError> {
    match unsupported_scheme(url) {
        None => Ok(()),
        Some(reason) => Err(AcquireError::invalid_source(url.as_str(), reason)),
    }
}
