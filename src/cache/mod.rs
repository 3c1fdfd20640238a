//! Process-lifetime caching of fetched items.
//!
//! The cache is an explicitly constructed value shared by `Arc`, not a global:
//! every front page service owns its own instance.
//! - Entries expire lazily on read after a fixed TTL
//! - Writes overwrite unconditionally (last writer wins)
//! - Nothing is persisted across restarts

mod ttl;

pub use ttl::TtlCache;
