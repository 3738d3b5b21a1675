//! Port contracts specific to the add-on workflow.

use async_trait::async_trait;

/// Checks whether a URL answers successfully.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns `true` when fetching `url` succeeds with a success status.
    /// Transport failures count as unreachable.
    async fn is_reachable(&self, url: &str) -> bool;
}
