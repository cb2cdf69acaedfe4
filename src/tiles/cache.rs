use crate::tiles::loader::TileKey;
use lru::LruCache;
use std::num::NonZeroUsize;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => panic!("capacity must be non-zero"),
};

/// In-memory tile cache using LRU eviction, keyed by style and coordinate.
/// Holds whatever the caller renders from: raw bytes or uploaded textures.
pub struct TileCache<T> {
    cache: LruCache<TileKey, T>,
}

impl<T> TileCache<T> {
    /// Create a new tile cache; a zero capacity falls back to the default
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Get a tile, marking it most recently used
    pub fn get(&mut self, key: &TileKey) -> Option<&T> {
        self.cache.get(key)
    }

    pub fn put(&mut self, key: TileKey, tile: T) {
        self.cache.put(key, tile);
    }

    pub fn contains(&self, key: &TileKey) -> bool {
        self.cache.contains(key)
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
