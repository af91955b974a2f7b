// src/interception/host_filter.rs
//! Per-request admission predicate
//!
//! Decides, for every outgoing request, whether the request is routed through
//! the intercepting engine or left to the platform's default transport. The
//! decision is a pure function of the candidate host and the allow-list
//! captured at configuration time: no I/O, no retries, no shared mutable
//! state, safe to call from any number of engine dispatch threads at once.
//!
//! Matching is exact or suffix-at-a-label-boundary. A naive raw string-suffix
//! comparison would admit `evil-googleapis.com` for the entry
//! `googleapis.com`; this implementation requires the character before the
//! suffix to be a `.` so only genuine subdomains match.

use std::sync::Arc;
use tracing::trace;

/// Per-request admission gate
///
/// Implementations must be pure and reentrant: the engine calls `admit` from
/// its internal request-dispatch threads, which may be multiple and
/// concurrent.
pub trait AdmissionPredicate: Send + Sync {
    /// Decide whether a request to `host` is routed through the engine
    fn admit(&self, host: &str) -> bool;
}

/// Allow-list backed admission predicate
///
/// Holds only the normalized allow-list captured from the configuration;
/// cloning is cheap and clones share the list.
#[derive(Debug, Clone)]
pub struct AllowListFilter {
    allow: Arc<[String]>,
}

impl AllowListFilter {
    /// Build a filter from allow-list entries
    ///
    /// Entries are normalized once here: ASCII-lowercased, one trailing dot
    /// stripped, and a leading `"*."` or `"."` stripped so wildcard-style
    /// entries mean the same thing as bare suffixes. Entries that normalize
    /// to the empty string are dropped rather than allowed to match
    /// everything.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allow: Vec<String> = entries
            .into_iter()
            .filter_map(|entry| {
                let entry = normalize_host(entry.as_ref());
                let entry = entry
                    .strip_prefix("*.")
                    .or_else(|| entry.strip_prefix('.'))
                    .unwrap_or(&entry);
                if entry.is_empty() {
                    None
                } else {
                    Some(entry.to_string())
                }
            })
            .collect();

        Self {
            allow: allow.into(),
        }
    }

    /// Build a filter from an optional allow-list
    ///
    /// `None` yields an empty filter that admits nothing.
    pub fn from_allow_list(allow_list: Option<&[String]>) -> Self {
        Self::new(allow_list.unwrap_or_default())
    }

    /// Number of normalized entries
    pub fn len(&self) -> usize {
        self.allow.len()
    }

    /// Whether the filter admits nothing
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty()
    }
}

impl AdmissionPredicate for AllowListFilter {
    fn admit(&self, host: &str) -> bool {
        if self.allow.is_empty() {
            metrics::counter!("netshunt_requests_rejected_total").increment(1);
            return false;
        }

        let host = normalize_host(host);
        if host.is_empty() {
            metrics::counter!("netshunt_requests_rejected_total").increment(1);
            return false;
        }

        let admitted = self
            .allow
            .iter()
            .any(|entry| host_matches(&host, entry));

        trace!(host = %host, admitted, "admission decision");
        if admitted {
            metrics::counter!("netshunt_requests_admitted_total").increment(1);
        } else {
            metrics::counter!("netshunt_requests_rejected_total").increment(1);
        }

        admitted
    }
}

/// Lowercase and strip one trailing dot
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.strip_suffix('.').unwrap_or(host);
    host.to_ascii_lowercase()
}

/// Exact match, or suffix match at a label boundary
fn host_matches(host: &str, entry: &str) -> bool {
    if host == entry {
        return true;
    }
    // "www.googleapis.com" ends with ".googleapis.com"; "evilgoogleapis.com"
    // does not.
    host.len() > entry.len()
        && host.ends_with(entry)
        && host.as_bytes()[host.len() - entry.len() - 1] == b'.'
}
