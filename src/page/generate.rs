//! Page regeneration with per-slug deduplication.
//!
//! ```text
//! request ─► trigger(slug) ──lease held?──► no-op
//!                  │
//!                  └─► thread: fetch ─► normalize ─► PageCache::put
//!                                  └── error ──► cache untouched, remembered
//!                                                while the slug has no page
//! ```
//!
//! `regenerate` takes the same per-slug lease, so a synchronous run never
//! overlaps a background one.

use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use thiserror::Error;

use super::{Lookup, PageCache, Revalidate};
use crate::api::{EpisodeSource, FetchError};
use crate::episode::{DisplayEpisode, Locale, NormalizeError, normalize};
use crate::{debug, log};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("normalize failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("{0} is already being generated")]
    InFlight(String),
}

// =============================================================================
// Leases
// =============================================================================

/// Slugs with a regeneration in flight.
#[derive(Debug, Default, Clone)]
pub struct RegenLocks {
    held: Arc<DashSet<String>>,
}

/// Exclusive right to regenerate one slug. Released on drop.
#[derive(Debug)]
pub struct RegenLease {
    slug: String,
    held: Arc<DashSet<String>>,
}

impl RegenLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` while another lease for `slug` is alive.
    pub fn try_acquire(&self, slug: &str) -> Option<RegenLease> {
        self.held.insert(slug.to_owned()).then(|| RegenLease {
            slug: slug.to_owned(),
            held: Arc::clone(&self.held),
        })
    }

    #[cfg(test)]
    pub fn is_held(&self, slug: &str) -> bool {
        self.held.contains(slug)
    }
}

impl RegenLease {
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl Drop for RegenLease {
    fn drop(&mut self) {
        self.held.remove(&self.slug);
    }
}

// =============================================================================
// Regenerator
// =============================================================================

/// Fetches, normalizes and caches episodes.
pub struct Regenerator {
    source: Arc<dyn EpisodeSource>,
    cache: Arc<PageCache>,
    locks: RegenLocks,
    /// Last failure per slug without a cached page, cleared by the next success.
    failures: DashMap<String, String>,
    locale: Locale,
    revalidate: Revalidate,
}

impl Regenerator {
    pub fn new(
        source: Arc<dyn EpisodeSource>,
        cache: Arc<PageCache>,
        locale: Locale,
        revalidate: Revalidate,
    ) -> Self {
        Self {
            source,
            cache,
            locks: RegenLocks::new(),
            failures: DashMap::new(),
            locale,
            revalidate,
        }
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub const fn revalidate(&self) -> Revalidate {
        self.revalidate
    }

    /// Run one generation on the current thread.
    ///
    /// Fails with `InFlight` while another generation of `slug` holds the
    /// lease. On failure the cache is left as it was.
    pub fn regenerate(&self, slug: &str) -> Result<Arc<DisplayEpisode>, GenerateError> {
        let lease = self
            .locks
            .try_acquire(slug)
            .ok_or_else(|| GenerateError::InFlight(slug.to_owned()))?;
        self.regenerate_leased(&lease)
    }

    fn regenerate_leased(&self, lease: &RegenLease) -> Result<Arc<DisplayEpisode>, GenerateError> {
        let slug = lease.slug();

        match self.fetch_and_normalize(slug) {
            Ok(episode) => {
                self.failures.remove(slug);
                Ok(self.cache.put(slug, episode, self.revalidate))
            }
            Err(e) => {
                // Only slugs without a page ever report a failure
                if matches!(self.cache.lookup(slug), Lookup::Missing) {
                    self.failures.insert(slug.to_owned(), e.to_string());
                }
                Err(e)
            }
        }
    }

    fn fetch_and_normalize(&self, slug: &str) -> Result<DisplayEpisode, GenerateError> {
        let raw = self.source.fetch(slug)?;
        Ok(normalize(&raw, self.locale)?)
    }

    /// Start a background regeneration unless one is already running.
    ///
    /// Returns whether a new regeneration was started.
    pub fn trigger(self: &Arc<Self>, slug: &str) -> bool {
        let Some(lease) = self.locks.try_acquire(slug) else {
            debug!("regen"; "{} already in flight", slug);
            return false;
        };

        let this = Arc::clone(self);
        let spawned = std::thread::Builder::new()
            .name(format!("regen-{slug}"))
            .spawn(move || {
                let slug = lease.slug();
                match this.regenerate_leased(&lease) {
                    Ok(_) => log!("regen"; "generated {}", slug),
                    Err(e) => log!("regen"; "{}: {}", slug, e),
                }
            });

        match spawned {
            Ok(_) => true,
            Err(e) => {
                log!("regen"; "failed to spawn worker for {}: {}", slug, e);
                false
            }
        }
    }

    #[cfg(test)]
    pub fn is_generating(&self, slug: &str) -> bool {
        self.locks.is_held(slug)
    }

    /// The remembered failure for `slug`, if any.
    pub fn failure(&self, slug: &str) -> Option<String> {
        self.failures.get(slug).map(|e| e.value().clone())
    }

    /// Take the remembered failure, so the next request retries.
    pub fn take_failure(&self, slug: &str) -> Option<String> {
        self.failures.remove(slug).map(|(_, e)| e)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawEpisode;
    use crate::episode::sample_raw;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    /// Counts calls; answers from a fixed result.
    struct FakeSource {
        calls: AtomicUsize,
        status: Option<u16>,
    }

    impl FakeSource {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                status: None,
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                status: Some(status),
            }
        }
    }

    impl EpisodeSource for FakeSource {
        fn fetch(&self, _slug: &str) -> Result<RawEpisode, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                Some(status) => Err(FetchError::HttpStatus(status)),
                None => Ok(sample_raw()),
            }
        }
    }

    /// Blocks every fetch until the test sends a go-ahead.
    struct GatedSource {
        gate: Mutex<mpsc::Receiver<()>>,
        calls: AtomicUsize,
    }

    impl EpisodeSource for GatedSource {
        fn fetch(&self, _slug: &str) -> Result<RawEpisode, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.gate.lock().recv();
            Ok(sample_raw())
        }
    }

    fn regenerator(source: Arc<dyn EpisodeSource>, ttl: Duration) -> Arc<Regenerator> {
        Arc::new(Regenerator::new(
            source,
            Arc::new(PageCache::new()),
            Locale::En,
            Revalidate::new(ttl),
        ))
    }

    fn wait_idle(regen: &Regenerator, slug: &str) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while regen.is_generating(slug) {
            assert!(Instant::now() < deadline, "regeneration did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_lease_is_exclusive_and_released_on_drop() {
        let locks = RegenLocks::new();
        let lease = locks.try_acquire("e1").unwrap();
        assert_eq!(lease.slug(), "e1");
        assert!(locks.try_acquire("e1").is_none());
        assert!(locks.try_acquire("e2").is_some());

        drop(lease);
        assert!(!locks.is_held("e1"));
        assert!(locks.try_acquire("e1").is_some());
    }

    #[test]
    fn test_regenerate_caches_episode() {
        let source = Arc::new(FakeSource::ok());
        let regen = regenerator(source.clone(), Duration::from_secs(60));

        let episode = regen.regenerate("e1").unwrap();
        assert_eq!(episode.duration_as_string(), "00:02:05");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(regen.cache().lookup("e1"), Lookup::Fresh(_)));
    }

    #[test]
    fn test_http_500_caches_nothing() {
        let regen = regenerator(Arc::new(FakeSource::failing(500)), Duration::from_secs(60));

        let err = regen.regenerate("e1").unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Fetch(FetchError::HttpStatus(500))
        ));
        assert!(matches!(regen.cache().lookup("e1"), Lookup::Missing));
        assert!(regen.failure("e1").is_some());

        assert!(regen.take_failure("e1").is_some());
        assert!(regen.take_failure("e1").is_none());
    }

    #[test]
    fn test_failure_keeps_stale_page() {
        let cache = Arc::new(PageCache::new());
        let good = Regenerator::new(
            Arc::new(FakeSource::ok()),
            Arc::clone(&cache),
            Locale::En,
            Revalidate::new(Duration::ZERO),
        );
        let stored = good.regenerate("e1").unwrap();

        let bad = Regenerator::new(
            Arc::new(FakeSource::failing(503)),
            Arc::clone(&cache),
            Locale::En,
            Revalidate::new(Duration::ZERO),
        );
        assert!(bad.regenerate("e1").is_err());
        assert!(bad.failure("e1").is_none());

        match cache.lookup("e1") {
            Lookup::Stale(ep) => assert!(Arc::ptr_eq(&ep, &stored)),
            other => panic!("expected stale page, got {other:?}"),
        }
    }

    #[test]
    fn test_success_clears_failure() {
        let regen = regenerator(Arc::new(FakeSource::ok()), Duration::from_secs(60));
        regen.failures.insert("e1".into(), "boom".into());
        regen.regenerate("e1").unwrap();
        assert!(regen.failure("e1").is_none());
    }

    #[test]
    fn test_trigger_deduplicates_in_flight_slug() {
        let (tx, rx) = mpsc::channel();
        let source = Arc::new(GatedSource {
            gate: Mutex::new(rx),
            calls: AtomicUsize::new(0),
        });
        let regen = regenerator(source.clone(), Duration::from_secs(60));

        assert!(regen.trigger("e1"));
        assert!(!regen.trigger("e1"));
        assert!(regen.is_generating("e1"));

        tx.send(()).unwrap();
        wait_idle(&regen, "e1");

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(regen.cache().lookup("e1"), Lookup::Fresh(_)));
    }

    #[test]
    fn test_trigger_again_after_completion() {
        let source = Arc::new(FakeSource::ok());
        let regen = regenerator(source.clone(), Duration::from_secs(60));

        assert!(regen.trigger("e1"));
        wait_idle(&regen, "e1");
        assert!(regen.trigger("e1"));
        wait_idle(&regen, "e1");

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_regenerate_waits_out_background_run() {
        let (tx, rx) = mpsc::channel();
        let source = Arc::new(GatedSource {
            gate: Mutex::new(rx),
            calls: AtomicUsize::new(0),
        });
        let regen = regenerator(source.clone(), Duration::from_secs(60));

        assert!(regen.trigger("e1"));
        assert!(matches!(
            regen.regenerate("e1"),
            Err(GenerateError::InFlight(slug)) if slug == "e1"
        ));
        assert!(regen.failure("e1").is_none());

        tx.send(()).unwrap();
        wait_idle(&regen, "e1");

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tx.send(()).unwrap();
        assert!(regen.regenerate("e1").is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
