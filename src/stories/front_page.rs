//! Front page service that wraps an item source with a shared story cache.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::hn::{HnError, ItemSource};

use super::scheduler::{Scheduler, StoryCache};
use super::story::RankedStory;

/// Stories for one page view and how long it took to collect them.
#[derive(Debug, Clone)]
pub struct TopStories {
  pub stories: Vec<RankedStory>,
  pub elapsed: Duration,
}

/// Front page built from the source's ranking.
///
/// Created once per process; the cache it owns lives as long as it does and
/// is shared by every concurrent request.
pub struct FrontPage<S> {
  source: Arc<S>,
  scheduler: Scheduler<S>,
}

impl<S: ItemSource + 'static> FrontPage<S> {
  pub fn new(source: S, cache_ttl: Duration) -> Self {
    let source = Arc::new(source);
    let cache = Arc::new(StoryCache::new(cache_ttl));
    let scheduler = Scheduler::new(Arc::clone(&source), cache);

    Self { source, scheduler }
  }

  /// Set an overall time budget per request. `None` waits until every slot
  /// is settled.
  pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
    self.scheduler = self.scheduler.with_deadline(deadline);
    self
  }

  /// Collect the first `count` story links of the current ranking.
  ///
  /// Fails only when the ranking itself cannot be loaded; individual items
  /// that fail are skipped.
  pub async fn top_stories(&self, count: usize) -> Result<TopStories, HnError> {
    let started = Instant::now();

    let ids = self.source.top_item_ids().await.map_err(|e| {
      warn!(error = %e, "Failed to load top stories");
      match e {
        HnError::UpstreamUnavailable(_) => e,
        other => HnError::UpstreamUnavailable(other.to_string()),
      }
    })?;

    let stories = self.scheduler.fill(&ids, count).await;
    let elapsed = started.elapsed();

    info!(
      requested = count,
      returned = stories.len(),
      candidates = ids.len(),
      cached = self.scheduler.cache().len(),
      elapsed_ms = elapsed.as_millis() as u64,
      "Collected top stories"
    );

    Ok(TopStories { stories, elapsed })
  }
}
