//! Revalidation policy.

use std::time::Duration;

use crate::config::BuildSectionConfig;
use crate::config::section::build::DEFAULT_REVALIDATE_SECS;

/// How long a generated page is served before it is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revalidate {
    pub ttl: Duration,
}

impl Revalidate {
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub const fn from_config(build: &BuildSectionConfig) -> Self {
        Self::new(build.revalidate())
    }

    /// A page exactly `ttl` old is already stale.
    pub fn is_stale(&self, age: Duration) -> bool {
        age >= self.ttl
    }

    /// `Cache-Control` value for a generated page.
    pub fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate",
            self.ttl.as_secs()
        )
    }
}

impl Default for Revalidate {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_REVALIDATE_SECS))
    }
}
