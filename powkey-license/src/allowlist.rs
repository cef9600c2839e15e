//! Allow-list sources.
//!
//! The author publishes a plain-text file with one `subject/project` entry
//! per line. It is fetched fresh on every verification.

use crate::error::{LicenseError, LicenseResult};
use std::time::Duration;
use tracing::debug;

/// Default timeout for the allow-list request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// User agent sent with allow-list requests.
pub const USER_AGENT: &str = concat!("powkey/", env!("CARGO_PKG_VERSION"));

/// Something that can produce the lines of an allow-list.
pub trait AllowListSource {
    /// Fetches the resource at `url` and returns its lines, trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Network`] or [`LicenseError::HttpStatus`] when
    /// the resource cannot be read.
    fn fetch_lines(&self, url: &str) -> LicenseResult<Vec<String>>;
}

impl<S: AllowListSource + ?Sized> AllowListSource for &S {
    fn fetch_lines(&self, url: &str) -> LicenseResult<Vec<String>> {
        (**self).fetch_lines(url)
    }
}

/// Fetches the allow-list over HTTP with a blocking client. Anything but
/// `200 OK` is an error.
#[derive(Debug, Clone)]
pub struct HttpAllowList {
    timeout: Duration,
}

impl HttpAllowList {
    /// Creates a source with the given request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

impl AllowListSource for HttpAllowList {
    fn fetch_lines(&self, url: &str) -> LicenseResult<Vec<String>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LicenseError::Network(format!("http client: {e}")))?;

        debug!(url, timeout_secs = self.timeout.as_secs(), "Fetching allow-list");

        let resp = client
            .get(url)
            .header("Accept", "text/plain,*/*;q=0.8")
            .send()
            .map_err(|e| LicenseError::Network(format!("fetch failed: {e}")))?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(LicenseError::HttpStatus {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| LicenseError::Network(format!("read body: {e}")))?;
        let lines = split_lines(&body);
        debug!(url, entries = lines.len(), "Allow-list fetched");
        Ok(lines)
    }
}

/// An allow-list held in memory, for hosts that ship or cache their own.
#[derive(Debug, Clone, Default)]
pub struct StaticAllowList {
    lines: Vec<String>,
}

impl StaticAllowList {
    /// Creates a source from raw entries.
    pub fn new<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            lines: entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_string())
                .collect(),
        }
    }

    /// Creates a source from a whole allow-list document.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }
}

impl AllowListSource for StaticAllowList {
    fn fetch_lines(&self, _url: &str) -> LicenseResult<Vec<String>> {
        Ok(self.lines.clone())
    }
}

/// Splits a document on any of `\n`, `\r\n` or `\r` and trims every line.
/// Blank lines are dropped.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Exact, case-sensitive membership. Lines are trimmed, the candidate is not.
#[must_use]
pub fn contains<S: AsRef<str>>(lines: &[S], candidate: &str) -> bool {
    lines.iter().any(|l| l.as_ref().trim() == candidate)
}
