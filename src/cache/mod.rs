//! Booktrack query cache.
//!
//! An in-memory read-through cache that sits in front of the repositories:
//!
//! - Keys are flat strings built from [`QueryKey`] (`book-id-7`,
//!   `books-genre-fantasy`, ...).
//! - Every entry carries a fixed TTL; reads never extend it.
//! - Writes to the store never invalidate entries, so cached results can lag
//!   behind mutations for up to one TTL.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! query_ttl_seconds = 300
//! sweep_interval_seconds = 60
//! ```

mod config;
mod keys;
mod store;

pub use config::CacheConfig;
pub use keys::QueryKey;
pub use store::{Cacheable, CachedValue, QueryCache};
