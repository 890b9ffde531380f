//! The fixed overlay asset and its per-size resize cache
//!
//! The asset is decoded once per process. Resized copies are memoized by
//! exact pixel dimensions so repeated photos of the same resolution reuse
//! bitwise-identical overlay data instead of recomputing the resize.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use lru::LruCache;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// Overlay PNG compiled into the binary; LULA_OVERLAY_PATH overrides it
static BUNDLED_OVERLAY: &[u8] = include_bytes!("../../assets/lula.png");

/// Cache of per-size resized copies of the overlay asset
pub struct OverlayCache {
    source: RgbaImage,
    resized: Mutex<LruCache<(u32, u32), Arc<RgbaImage>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl OverlayCache {
    /// Creates a cache over the given source bitmap with the configured capacity
    pub fn new(source: RgbaImage) -> Self {
        Self::with_capacity(source, config::overlay::CACHE_CAPACITY)
    }

    /// Creates a cache with an explicit entry bound
    pub fn with_capacity(source: RgbaImage, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            source,
            resized: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Loads the overlay asset (bundled bytes, or the LULA_OVERLAY_PATH file)
    pub fn load() -> AppResult<Self> {
        let bytes = match config::OVERLAY_PATH.as_deref() {
            Some(path) => std::fs::read(path)
                .map_err(|e| AppError::AssetLoad(format!("failed to read overlay asset {}: {}", path, e)))?,
            None => BUNDLED_OVERLAY.to_vec(),
        };

        let source = image::load_from_memory(&bytes)
            .map_err(|e| AppError::AssetLoad(format!("failed to decode overlay asset: {}", e)))?
            .to_rgba8();

        log::info!("Overlay asset loaded ({}x{})", source.width(), source.height());
        Ok(Self::new(source))
    }

    /// Native dimensions of the source asset
    pub fn source_dimensions(&self) -> (u32, u32) {
        self.source.dimensions()
    }

    /// Returns the overlay resized to exactly (width, height)
    ///
    /// Previously requested sizes come straight from the cache. The resize
    /// itself runs outside the lock, so two requests racing on a brand-new
    /// size may both compute it; whichever inserts first wins and the loser
    /// adopts the published entry.
    pub fn get(&self, width: u32, height: u32) -> Arc<RgbaImage> {
        let key = (width, height);

        {
            let mut resized = self.resized.lock();
            if let Some(hit) = resized.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Arc::clone(hit);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let scaled = Arc::new(imageops::resize(&self.source, width, height, FilterType::Lanczos3));

        let mut resized = self.resized.lock();
        if let Some(winner) = resized.get(&key) {
            return Arc::clone(winner);
        }
        resized.put(key, Arc::clone(&scaled));
        scaled
    }

    /// Current cache statistics
    pub fn stats(&self) -> CacheStats {
        let size = self.resized.lock().len();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            size,
            hits,
            misses,
            hit_rate,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Process-wide cache instance (singleton)
static OVERLAY_CACHE: OnceCell<OverlayCache> = OnceCell::new();

fn cache() -> AppResult<&'static OverlayCache> {
    OVERLAY_CACHE.get_or_try_init(OverlayCache::load)
}

/// Forces the overlay asset to load
///
/// Called once at startup so a missing or corrupt asset aborts the process
/// instead of failing every user request later.
pub fn init() -> AppResult<()> {
    cache().map(|_| ())
}

/// Returns the shared overlay resized to exactly (width, height)
pub fn get(width: u32, height: u32) -> AppResult<Arc<RgbaImage>> {
    Ok(cache()?.get(width, height))
}

/// Statistics of the process-wide cache
pub fn stats() -> AppResult<CacheStats> {
    Ok(cache()?.stats())
}
