//! Adapter implementations for add-on ports.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use super::ports::ReachabilityProbe;

/// Probe answering from a fixed set of reachable URLs and recording every
/// URL it was asked about.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    reachable: Arc<RwLock<HashSet<String>>>,
    probed: Arc<RwLock<Vec<String>>>,
}

impl StaticProbe {
    /// Creates a probe for which nothing is reachable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a probe for which exactly `urls` are reachable.
    #[must_use]
    pub fn reaching<S: Into<String>>(urls: impl IntoIterator<Item = S>) -> Self {
        Self {
            reachable: Arc::new(RwLock::new(urls.into_iter().map(Into::into).collect())),
            probed: Arc::default(),
        }
    }

    /// Returns probed URLs in order.
    #[must_use]
    pub fn probed(&self) -> Vec<String> {
        self.probed
            .read()
            .map(|probed| probed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReachabilityProbe for StaticProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        if let Ok(mut probed) = self.probed.write() {
            probed.push(url.to_owned());
        }
        self.reachable
            .read()
            .is_ok_and(|reachable| reachable.contains(url))
    }
}
