// Ordered set of candidate base URLs.
//
// Order is significant: the client tries candidates front to back on every
// call. Construction trims input, drops blank entries and removes
// duplicates while keeping the first occurrence.

use std::fmt;

use serde::Serialize;
use strum::Display;
use url::Url;

use crate::error::Error;

/// Non-empty, deduplicated, ordered list of API base URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    urls: Vec<Url>,
}

impl CandidateSet {
    /// Parse raw URL strings into a candidate set.
    ///
    /// Blank entries are skipped. Fails with [`Error::InvalidUrl`] on the
    /// first malformed entry and [`Error::NoCandidates`] if nothing remains.
    pub fn parse<I, S>(raw: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut urls = Vec::new();
        for entry in raw {
            let trimmed = entry.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            urls.push(Url::parse(trimmed)?);
        }
        Self::from_urls(urls)
    }

    /// Build from already-parsed URLs, removing duplicates in order.
    pub fn from_urls(urls: Vec<Url>) -> Result<Self, Error> {
        let mut unique: Vec<Url> = Vec::with_capacity(urls.len());
        for url in urls {
            if !unique.contains(&url) {
                unique.push(url);
            }
        }
        if unique.is_empty() {
            return Err(Error::NoCandidates);
        }
        Ok(Self { urls: unique })
    }

    /// The highest-priority candidate.
    pub fn primary(&self) -> &Url {
        // Construction guarantees at least one entry.
        &self.urls[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Url> {
        self.urls.iter()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Url;
    type IntoIter = std::slice::Iter<'a, Url>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.urls.iter().map(Url::as_str).collect();
        f.write_str(&joined.join(", "))
    }
}

// ── Endpoint labels ─────────────────────────────────────────────────

/// Human-readable kind of endpoint, shown next to the active URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum EndpointLabel {
    #[strum(serialize = "Local backend")]
    LocalBackend,
    #[strum(serialize = "Cloud Run")]
    CloudRun,
    #[strum(serialize = "API")]
    Api,
}

impl EndpointLabel {
    /// Classify a base URL by its host.
    pub fn for_url(url: &Url) -> Self {
        match url.host_str() {
            Some("localhost" | "127.0.0.1") => Self::LocalBackend,
            Some(host) if host.ends_with("run.app") => Self::CloudRun,
            _ => Self::Api,
        }
    }
}
