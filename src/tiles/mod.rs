pub mod cache;
pub mod loader;
pub mod source;

// Re-exports for convenience
pub use cache::TileCache;
pub use loader::{TileKey, TileLoader, TileResult};
pub use source::{StyleTileSource, TileSource};
