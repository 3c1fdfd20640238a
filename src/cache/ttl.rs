//! In-memory map with time-to-live expiry on read.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tokio::time::Instant;

/// A cached value and when it was stored.
#[derive(Debug, Clone)]
struct Entry<V> {
  value: V,
  inserted_at: Instant,
}

/// Thread-safe TTL cache.
///
/// Readers share the lock, writers take it exclusively. Expired entries are
/// treated as absent but stay in the map until the key is written again.
/// The lock is never held across an await point.
#[derive(Debug)]
pub struct TtlCache<K, V> {
  entries: RwLock<HashMap<K, Entry<V>>>,
  ttl: Duration,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
  pub fn new(ttl: Duration) -> Self {
    Self {
      entries: RwLock::new(HashMap::new()),
      ttl,
    }
  }

  /// Get a value if present and younger than the TTL.
  pub fn get(&self, key: &K) -> Option<V> {
    // A poisoned lock still guards a consistent map: every write is a single insert
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    let entry = entries.get(key)?;

    if entry.inserted_at.elapsed() >= self.ttl {
      return None; // Expired
    }

    Some(entry.value.clone())
  }

  /// Store a value with a fresh timestamp. Last writer wins.
  pub fn insert(&self, key: K, value: V) {
    let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
    entries.insert(
      key,
      Entry {
        value,
        inserted_at: Instant::now(),
      },
    );
  }

  /// Number of stored entries, stale ones included.
  pub fn len(&self) -> usize {
    self
      .entries
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  const TTL: Duration = Duration::from_secs(15 * 60);

  #[tokio::test(start_paused = true)]
  async fn test_get_fresh_entry() {
    let cache = TtlCache::new(TTL);
    cache.insert(1u64, "one");

    assert_eq!(cache.get(&1), Some("one"));
    assert_eq!(cache.get(&2), None);
  }

  #[tokio::test(start_paused = true)]
  async fn test_entry_expires_without_removal() {
    let cache = TtlCache::new(TTL);
    cache.insert(1u64, "one");

    tokio::time::advance(TTL - Duration::from_secs(1)).await;
    assert_eq!(cache.get(&1), Some("one"));

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(cache.get(&1), None);

    // Stale entries are not purged on read
    assert_eq!(cache.len(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_insert_overwrites_and_refreshes() {
    let cache = TtlCache::new(TTL);
    cache.insert(1u64, "old");

    tokio::time::advance(TTL).await;
    assert_eq!(cache.get(&1), None);

    cache.insert(1, "new");
    assert_eq!(cache.get(&1), Some("new"));
    assert_eq!(cache.len(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_zero_ttl_never_hits() {
    let cache = TtlCache::new(Duration::ZERO);
    cache.insert(1u64, 10);

    assert_eq!(cache.get(&1), None);
  }

  #[tokio::test]
  async fn test_concurrent_writers_and_readers() {
    let cache = Arc::new(TtlCache::new(TTL));

    let mut handles = Vec::new();
    for i in 0..16u64 {
      let cache = Arc::clone(&cache);
      handles.push(tokio::spawn(async move {
        cache.insert(i % 4, i);
        cache.get(&(i % 4)).is_some()
      }));
    }

    for handle in handles {
      assert!(handle.await.unwrap());
    }
    assert_eq!(cache.len(), 4);
  }
}
