//! The liveness prober: master playlist fetch, candidate scan, first
//! reachable candidate wins.
//!
//! A probe walks at most two hierarchy levels (master playlist to variant
//! or segment) and requires one successful downstream fetch. HTTP 200 on a
//! nested fetch is accepted as sufficient evidence without validating the
//! nested body; deeper validation would change observable behavior on
//! ambiguous-but-working streams.

use std::fmt;

use url::Url;

use crate::config::ProbeConfig;
use crate::fetch::{Fetch, FetchError};
use crate::playlist;

/// Outcome of probing one URL. Everything except `Live` excludes the target
/// from the working set; the variants keep the failure cause inspectable
/// for logging and tests.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// A nested fetch answered HTTP 200. Carries the candidate that did.
    Live { candidate: String },
    /// The master playlist fetch failed (network error or non-200 status).
    MasterUnreachable(FetchError),
    /// The response body did not begin with `#EXTM3U`.
    NotAPlaylist,
    /// No stream-inf/extinf references were found (malformed or empty).
    NoCandidates,
    /// None of the tried candidates answered HTTP 200.
    AllCandidatesDead,
}

impl ProbeOutcome {
    pub fn is_live(&self) -> bool {
        matches!(self, ProbeOutcome::Live { .. })
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Live { candidate } => write!(f, "live via {}", candidate),
            ProbeOutcome::MasterUnreachable(e) => write!(f, "master fetch failed: {}", e),
            ProbeOutcome::NotAPlaylist => write!(f, "response is not an #EXTM3U playlist"),
            ProbeOutcome::NoCandidates => write!(f, "playlist lists no variants or segments"),
            ProbeOutcome::AllCandidatesDead => write!(f, "no candidate answered HTTP 200"),
        }
    }
}

/// Liveness prober over any [`Fetch`] implementation.
pub struct Prober<F> {
    fetcher: F,
    cfg: ProbeConfig,
}

impl<F: Fetch> Prober<F> {
    pub fn new(fetcher: F, cfg: ProbeConfig) -> Self {
        Self { fetcher, cfg }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.cfg
    }

    /// Probes one playlist URL. Never fails: every fault (network error,
    /// malformed URL, malformed body) degrades to a non-live outcome.
    pub fn probe_outcome(&self, url: &str) -> ProbeOutcome {
        let master = match self.fetcher.fetch_playlist(url, self.cfg.master_timeout()) {
            Ok(body) => body,
            Err(e) => return ProbeOutcome::MasterUnreachable(e),
        };
        if !playlist::looks_like_playlist(&master) {
            return ProbeOutcome::NotAPlaylist;
        }
        let candidates = playlist::candidate_uris(&master);
        if candidates.is_empty() {
            return ProbeOutcome::NoCandidates;
        }

        // First success wins, in listed order; the cap on attempts is hard
        // even if a later candidate would have answered.
        for uri in candidates.iter().take(self.cfg.max_candidates) {
            let Some(resolved) = resolve(url, uri) else {
                tracing::debug!(url, candidate = %uri, "candidate did not resolve");
                continue;
            };
            match self.fetcher.fetch_ok(&resolved, self.cfg.nested_timeout()) {
                Ok(()) => return ProbeOutcome::Live { candidate: resolved },
                Err(e) => {
                    tracing::debug!(url, candidate = %resolved, error = %e, "candidate fetch failed");
                }
            }
        }
        ProbeOutcome::AllCandidatesDead
    }

    /// Boolean form of [`Self::probe_outcome`].
    pub fn probe(&self, url: &str) -> bool {
        let outcome = self.probe_outcome(url);
        if !outcome.is_live() {
            tracing::debug!(url, %outcome, "probe failed");
        }
        outcome.is_live()
    }
}

/// Standard relative-reference resolution of a candidate URI against the
/// master playlist URL. An unparsable base or reference yields `None`.
fn resolve(base: &str, candidate: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(candidate).ok().map(String::from)
}
