//! Response header filtering for AI contexts.
//!
//! Embedding restrictions (frame options, CSP, cross-origin policies) are
//! removed from every response except those of trusted identity/media
//! providers, whose sign-in flows break without them.

use omni_config::schema::PolicyConfig;
use tracing::trace;
use wry::http::{HeaderMap, Uri};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Host is trusted; headers untouched.
    Passthrough,
    /// Number of header names removed.
    Stripped(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPolicy {
    trusted_domains: Vec<String>,
    stripped_headers: Vec<String>,
}

impl NetworkPolicy {
    pub fn new(trusted_domains: Vec<String>, stripped_headers: Vec<String>) -> Self {
        Self {
            trusted_domains: trusted_domains
                .into_iter()
                .map(|d| d.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            stripped_headers: stripped_headers
                .into_iter()
                .map(|h| h.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(
            config.trusted_domains.clone(),
            config.stripped_headers.clone(),
        )
    }

    pub fn stripped_headers(&self) -> &[String] {
        &self.stripped_headers
    }

    /// `host` equals a trusted domain or is one of its subdomains.
    pub fn is_trusted_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.trusted_domains.iter().any(|domain| {
            host == *domain
                || (host.len() > domain.len()
                    && host.ends_with(domain.as_str())
                    && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
        })
    }

    pub fn is_trusted_url(&self, url: &str) -> bool {
        host_of(url).is_some_and(|host| self.is_trusted_host(&host))
    }

    /// Apply the policy to one response. URLs without a parsable host are
    /// treated as untrusted.
    pub fn filter(&self, url: &str, headers: &mut HeaderMap) -> FilterOutcome {
        if self.is_trusted_url(url) {
            return FilterOutcome::Passthrough;
        }
        let removed = self
            .stripped_headers
            .iter()
            .filter(|name| headers.remove(name.as_str()).is_some())
            .count();
        if removed > 0 {
            trace!(url = %url, removed, "response headers stripped");
        }
        FilterOutcome::Stripped(removed)
    }
}

impl Default for NetworkPolicy {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}

pub fn host_of(url: &str) -> Option<String> {
    let uri: Uri = url.parse().ok()?;
    uri.host().map(|h| h.to_ascii_lowercase())
}
