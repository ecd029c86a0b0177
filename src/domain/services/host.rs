//! Host header parsing for tenant resolution.

use std::net::IpAddr;
use crate::domain::models::tenant::RESERVED_LABELS;

/// Slug used for local development hosts and the non-production fallback.
pub const DEFAULT_TENANT_SLUG: &str = "default";

/// Strips any `:port`, a trailing root dot and IPv6 brackets, then lowercases.
/// Returns `None` for a missing or blank header.
pub fn normalize_host(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let host = if let Some(rest) = raw.strip_prefix('[') {
        rest.split(']').next().unwrap_or_default()
    } else if raw.matches(':').count() > 1 {
        // unbracketed IPv6 literal, no port possible
        raw
    } else {
        match raw.rsplit_once(':') {
            Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
            _ => raw,
        }
    };

    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// True for `localhost` and loopback addresses.
pub fn is_local_host(host: &str) -> bool {
    host == "localhost" || host.parse::<IpAddr>().map(|ip| ip.is_loopback()).unwrap_or(false)
}

/// Derives a tenant slug from the subdomain convention `<slug>.<domain>.<tld>`.
/// Expects a host already passed through [`normalize_host`].
pub fn candidate_slug(host: &str) -> Option<String> {
    if is_local_host(host) {
        return Some(DEFAULT_TENANT_SLUG.to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 3 {
        return None;
    }

    let leftmost = labels[0];
    if leftmost.is_empty() || RESERVED_LABELS.contains(&leftmost) {
        return None;
    }

    Some(leftmost.to_string())
}
