//! Session cache for resolved data
//!
//! Resolution is done once and the result shared until the cache is
//! invalidated or asked for a different key. Source file changes do not
//! invalidate it. Failed resolutions are never stored.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::resolver::{MalformedPolicy, Resolve, ResolvedData, SourcePaths};

/// Process-wide cache for drivers that want session-lifetime reuse.
static GLOBAL_CACHE: Lazy<ResolutionCache> = Lazy::new(ResolutionCache::new);

/// Identity of a resolution: same key, same cached result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    sources: SourcePaths,
    policy: MalformedPolicy,
    today: Option<NaiveDate>,
}

impl CacheKey {
    pub fn new(sources: SourcePaths, policy: MalformedPolicy, today: Option<NaiveDate>) -> Self {
        Self {
            sources,
            policy,
            today,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    key: CacheKey,
    data: Arc<ResolvedData>,
    resolved_at: DateTime<Utc>,
}

/// Memoizes one `ResolvedData` per key
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entry: Mutex<Option<CacheEntry>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for the resolver's key, resolving on a miss
    pub fn get_or_resolve<R: Resolve + ?Sized>(
        &self,
        resolver: &R,
    ) -> Result<Arc<ResolvedData>, LoadError> {
        let key = resolver.cache_key();
        let mut entry = self.lock();

        if let Some(cached) = entry.as_ref() {
            if cached.key == key {
                debug!(
                    "Using cached resolution from {}",
                    cached.resolved_at.format("%H:%M:%S")
                );
                return Ok(Arc::clone(&cached.data));
            }
            debug!("Cache key changed; resolving again");
        }

        let data = Arc::new(resolver.resolve()?);
        *entry = Some(CacheEntry {
            key,
            data: Arc::clone(&data),
            resolved_at: Utc::now(),
        });
        Ok(data)
    }

    /// Drop the cached result. Returns whether anything was cached.
    pub fn invalidate(&self) -> bool {
        let dropped = self.lock().take().is_some();
        if dropped {
            info!("Resolution cache cleared");
        }
        dropped
    }

    pub fn is_cached(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The shared process-wide cache
pub fn global() -> &'static ResolutionCache {
    &GLOBAL_CACHE
}
