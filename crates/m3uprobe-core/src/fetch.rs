//! Low-level HTTP GET primitives for probing.
//!
//! Uses the curl crate (libcurl easy API). Every request is one-shot: a
//! fresh handle per fetch, no connection reuse across probes. Failures come
//! back as a typed [`FetchError`] so the prober can pattern-match on the
//! cause instead of suppressing a blanket exception.

use std::cell::Cell;
use std::time::Duration;

use thiserror::Error;

/// Error from a single attempt-fetch (curl failure or non-200 status).
/// Nothing here escapes the probe boundary; the prober downgrades every
/// variant to a dead outcome.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, DNS, connection, malformed URL).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-200 status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Blocking fetch interface the prober depends on. Production code uses
/// [`CurlFetch`]; tests inject a scripted fetcher.
pub trait Fetch {
    /// GET `url` and return the response body as text (lossy UTF-8).
    /// Requires HTTP 200.
    fn fetch_playlist(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;

    /// GET `url` and report only whether it answered HTTP 200. The body is
    /// not consumed; the transfer is aborted once the status is known.
    fn fetch_ok(&self, url: &str, timeout: Duration) -> Result<(), FetchError>;
}

/// libcurl-backed fetcher carrying the User-Agent for every request.
#[derive(Debug, Clone)]
pub struct CurlFetch {
    user_agent: String,
}

impl CurlFetch {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn handle(&self, url: &str, timeout: Duration) -> Result<curl::easy::Easy, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(timeout)?;
        easy.timeout(timeout)?;
        Ok(easy)
    }
}

impl Fetch for CurlFetch {
    fn fetch_playlist(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let mut easy = self.handle(url, timeout)?;
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        let code = easy.response_code()?;
        if code != 200 {
            return Err(FetchError::Http(code));
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn fetch_ok(&self, url: &str, timeout: Duration) -> Result<(), FetchError> {
        let mut easy = self.handle(url, timeout)?;
        let aborted = Cell::new(false);
        let result = {
            let mut transfer = easy.transfer();
            // Returning a short write count aborts the transfer as soon as
            // the first body bytes arrive; the status line has been read by
            // then and the (possibly huge) body is never drained.
            transfer.write_function(|_data| {
                aborted.set(true);
                Ok(0)
            })?;
            transfer.perform()
        };
        match result {
            Ok(()) => {}
            Err(e) if aborted.get() && e.is_write_error() => {}
            Err(e) => return Err(FetchError::Curl(e)),
        }
        let code = easy.response_code()?;
        if code != 200 {
            return Err(FetchError::Http(code));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted in-memory fetcher for probe and batch tests.

    use super::{Fetch, FetchError};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Maps URLs to playlist bodies and HTTP statuses. URLs with no entry
    /// behave like a dead host (HTTP 404 here; the prober treats curl-level
    /// and status-level failures identically).
    #[derive(Debug, Default)]
    pub struct MockFetch {
        playlists: HashMap<String, String>,
        statuses: HashMap<String, u32>,
        /// Every URL fetched, in call order (guarded for concurrent runs).
        pub hits: Mutex<Vec<String>>,
    }

    impl MockFetch {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `body` with HTTP 200 at `url`.
        pub fn playlist(mut self, url: &str, body: &str) -> Self {
            self.playlists.insert(url.to_string(), body.to_string());
            self.statuses.insert(url.to_string(), 200);
            self
        }

        /// Serve a bare status at `url` (no body).
        pub fn status(mut self, url: &str, code: u32) -> Self {
            self.statuses.insert(url.to_string(), code);
            self
        }

        fn code_for(&self, url: &str) -> u32 {
            self.statuses.get(url).copied().unwrap_or(404)
        }
    }

    impl Fetch for MockFetch {
        fn fetch_playlist(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
            self.hits.lock().unwrap().push(url.to_string());
            match self.code_for(url) {
                200 => Ok(self.playlists.get(url).cloned().unwrap_or_default()),
                code => Err(FetchError::Http(code)),
            }
        }

        fn fetch_ok(&self, url: &str, _timeout: Duration) -> Result<(), FetchError> {
            self.hits.lock().unwrap().push(url.to_string());
            match self.code_for(url) {
                200 => Ok(()),
                code => Err(FetchError::Http(code)),
            }
        }
    }
}
