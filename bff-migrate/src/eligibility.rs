//! Decides whether a route file should be rewritten.
//!
//! Content checks run first, then path rules. Path rules are plain substring
//! tests on the full path; a legitimate route under an excluded segment is
//! skipped rather than risk rewriting a public endpoint.

use std::path::Path;

use serde::Serialize;

/// Marker that shows a file already calls the header helper.
pub const HELPER_MARKER: &str = "buildBFFHeaders";

/// Marker for an outbound network call.
pub const FETCH_MARKER: &str = "fetch(";

/// Reason why a file was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyUpdated,
    NoFetchCalls,
    AuthRoute,
    PublicRoute,
    EmailRoute,
    WebhookRoute,
    SubscriptionRoute,
    NoPatternMatched,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyUpdated => write!(f, "Already updated"),
            Self::NoFetchCalls => write!(f, "No fetch calls"),
            Self::AuthRoute => write!(f, "Auth route (public)"),
            Self::PublicRoute => write!(f, "Public route"),
            Self::EmailRoute => write!(f, "Email route (public)"),
            Self::WebhookRoute => write!(f, "Webhook route"),
            Self::SubscriptionRoute => write!(f, "Subscription/payment route"),
            Self::NoPatternMatched => write!(f, "No pattern matched"),
        }
    }
}

/// Classify a route file. Returns `None` when the file should be rewritten.
///
/// First match wins: helper already present, then no outbound calls, then
/// the path rules of [`path_exclusion`].
#[must_use]
pub fn classify(path: &Path, content: &str) -> Option<SkipReason> {
    if content.contains(HELPER_MARKER) {
        return Some(SkipReason::AlreadyUpdated);
    }

    if !content.contains(FETCH_MARKER) {
        return Some(SkipReason::NoFetchCalls);
    }

    path_exclusion(path)
}

/// Path-only exclusions for routes that must keep their own headers.
#[must_use]
pub fn path_exclusion(path: &Path) -> Option<SkipReason> {
    let path_str = path.to_string_lossy();

    if path_str.contains("/auth/") {
        return Some(SkipReason::AuthRoute);
    }

    if path_str.contains("/public/") {
        return Some(SkipReason::PublicRoute);
    }

    if path_str.contains("/email/") {
        return Some(SkipReason::EmailRoute);
    }

    // External payment callbacks carry no tenant context
    if path_str.to_lowercase().contains("webhook") {
        return Some(SkipReason::WebhookRoute);
    }

    if path_str.contains("/subscription/") || path_str.contains("/payment/initiate") {
        return Some(SkipReason::SubscriptionRoute);
    }

    None
}
