//! Generated page cache.
//!
//! Holds one normalized episode per slug together with the instant it was
//! generated and the `Revalidate` policy it was stored under. Reads never
//! wait on regeneration: a slug being regenerated keeps answering with its
//! previous entry until `put` replaces it.

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;

use super::Revalidate;
use crate::episode::DisplayEpisode;

/// A cached page entry.
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub episode: Arc<DisplayEpisode>,
    pub generated_at: Instant,
    pub policy: Revalidate,
}

impl CachedPage {
    fn is_stale_at(&self, now: Instant) -> bool {
        self.policy
            .is_stale(now.saturating_duration_since(self.generated_at))
    }
}

/// Result of a cache lookup.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Generated within its revalidation window.
    Fresh(Arc<DisplayEpisode>),
    /// Past its window; still servable while a regeneration runs.
    Stale(Arc<DisplayEpisode>),
    /// Never generated successfully.
    Missing,
}

impl Lookup {
    #[cfg(test)]
    pub fn episode(&self) -> Option<&Arc<DisplayEpisode>> {
        match self {
            Self::Fresh(episode) | Self::Stale(episode) => Some(episode),
            Self::Missing => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct PageCache {
    pages: DashMap<String, CachedPage>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, slug: &str) -> Lookup {
        self.lookup_at(slug, Instant::now())
    }

    pub fn lookup_at(&self, slug: &str, now: Instant) -> Lookup {
        match self.pages.get(slug) {
            Some(page) if page.is_stale_at(now) => Lookup::Stale(Arc::clone(&page.episode)),
            Some(page) => Lookup::Fresh(Arc::clone(&page.episode)),
            None => Lookup::Missing,
        }
    }

    /// Store a freshly generated episode, replacing any previous entry.
    pub fn put(&self, slug: &str, episode: DisplayEpisode, policy: Revalidate) -> Arc<DisplayEpisode> {
        let episode = Arc::new(episode);
        self.pages.insert(
            slug.to_owned(),
            CachedPage {
                episode: Arc::clone(&episode),
                generated_at: Instant::now(),
                policy,
            },
        );
        episode
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episode::{Locale, normalize, sample_raw};
    use std::time::Duration;

    fn episode() -> DisplayEpisode {
        normalize(&sample_raw(), Locale::En).unwrap()
    }

    #[test]
    fn test_missing() {
        let cache = PageCache::new();
        assert!(matches!(cache.lookup("nope"), Lookup::Missing));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_fresh_then_stale() {
        let cache = PageCache::new();
        let ttl = Duration::from_secs(60);
        let stored = cache.put("e1", episode(), Revalidate::new(ttl));
        let generated_at = cache.pages.get("e1").unwrap().generated_at;

        match cache.lookup_at("e1", generated_at + ttl - Duration::from_millis(1)) {
            Lookup::Fresh(ep) => assert!(Arc::ptr_eq(&ep, &stored)),
            other => panic!("expected fresh, got {other:?}"),
        }

        // exactly `ttl` old is already stale
        match cache.lookup_at("e1", generated_at + ttl) {
            Lookup::Stale(ep) => assert!(Arc::ptr_eq(&ep, &stored)),
            other => panic!("expected stale, got {other:?}"),
        }
    }

    #[test]
    fn test_put_replaces_wholesale() {
        let cache = PageCache::new();
        let first = cache.put("e1", episode(), Revalidate::new(Duration::from_secs(60)));
        let second = cache.put("e1", episode(), Revalidate::new(Duration::from_secs(60)));

        assert_eq!(cache.len(), 1);
        assert!(!Arc::ptr_eq(&first, &second));
        let current = cache.lookup("e1");
        assert!(Arc::ptr_eq(current.episode().unwrap(), &second));
    }

    #[test]
    fn test_zero_ttl_is_immediately_stale() {
        let cache = PageCache::new();
        cache.put("e1", episode(), Revalidate::new(Duration::ZERO));
        assert!(matches!(cache.lookup("e1"), Lookup::Stale(_)));
    }
}
