//! Icon resolution boundary.
//!
//! Icons are resolved externally (favicon fetch, bundled assets); the core
//! only caches the opaque result per url. Cache entries live for seven
//! days, independent of the collection's lifecycle.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::constants::ICON_CACHE_TTL_SECS;

/// External icon resolution: url in, opaque icon reference out.
pub trait IconResolver: Send + Sync {
    fn resolve(&self, url: &str) -> Option<String>;
}

struct CachedIcon {
    icon: Option<String>,
    resolved_at: Instant,
}

/// Url-keyed cache in front of an [`IconResolver`].
pub struct IconCache<R> {
    resolver: R,
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedIcon>>,
}

impl<R: IconResolver> IconCache<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_ttl(resolver, Duration::from_secs(ICON_CACHE_TTL_SECS))
    }

    pub fn with_ttl(resolver: R, ttl: Duration) -> Self {
        Self {
            resolver,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve an icon, consulting the cache first. Misses and expired
    /// entries fall through to the resolver; its answer (including "no
    /// icon") is cached.
    pub fn resolve(&self, url: &str) -> Option<String> {
        {
            let entries = self.entries.read();
            if let Some(cached) = entries.get(url) {
                if cached.resolved_at.elapsed() < self.ttl {
                    return cached.icon.clone();
                }
            }
        }

        let icon = self.resolver.resolve(url);
        self.entries.write().insert(
            url.to_string(),
            CachedIcon {
                icon: icon.clone(),
                resolved_at: Instant::now(),
            },
        );
        icon
    }

    /// Drop expired entries.
    pub fn purge_expired(&self) {
        let mut entries = self.entries.write();
        entries.retain(|_, cached| cached.resolved_at.elapsed() < self.ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
