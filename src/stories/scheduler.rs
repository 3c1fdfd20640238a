//! Rank-preserving concurrent fetch of the first `target` stories.
//!
//! One task runs per front page slot. A slot whose item turns out not to be a
//! story link is handed the next unused id from the ranking, so at most
//! `target` fetches are ever in flight and no id is fetched speculatively.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::hn::{ItemId, ItemSource};

use super::story::{CachedOutcome, RankedStory, Story};

/// Item cache shared by every request of a front page service.
pub type StoryCache = TtlCache<ItemId, CachedOutcome>;

/// What a slot task reports back to the coordinator.
#[derive(Debug)]
struct SlotOutcome {
  rank: usize,
  id: ItemId,
  story: Option<Story>,
}

pub struct Scheduler<S> {
  source: Arc<S>,
  cache: Arc<StoryCache>,
  /// Overall time budget of a single `fill`
  deadline: Option<Duration>,
}

impl<S: ItemSource + 'static> Scheduler<S> {
  pub fn new(source: Arc<S>, cache: Arc<StoryCache>) -> Self {
    Self {
      source,
      cache,
      deadline: None,
    }
  }

  /// Give up waiting after `deadline` and return whatever slots are filled.
  pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
    self.deadline = deadline;
    self
  }

  pub fn cache(&self) -> &StoryCache {
    &self.cache
  }

  /// Fill up to `target` slots from `ids`, keeping ranking order.
  ///
  /// Returns fewer than `target` stories when `ids` runs out of story links
  /// or the deadline passes. Ranks of the result are always `0..len`.
  pub async fn fill(&self, ids: &[ItemId], target: usize) -> Vec<RankedStory> {
    let deadline = self.deadline.map(|d| Instant::now() + d);
    let mut tasks = JoinSet::new();

    let mut next_unused = target.min(ids.len());
    for (rank, &id) in ids[..next_unused].iter().enumerate() {
      self.spawn_slot(&mut tasks, rank, id);
    }

    let mut filled: BTreeMap<usize, Story> = BTreeMap::new();
    while filled.len() < target {
      let joined = match deadline {
        Some(at) => match tokio::time::timeout_at(at, tasks.join_next()).await {
          Ok(joined) => joined,
          Err(_) => {
            warn!(
              filled = filled.len(),
              in_flight = tasks.len(),
              "Deadline passed, returning partial front page"
            );
            break;
          }
        },
        None => tasks.join_next().await,
      };

      // None: nothing in flight and nothing left to hand out
      let outcome = match joined {
        Some(Ok(outcome)) => outcome,
        Some(Err(e)) => {
          warn!(error = %e, "Slot task failed, slot stays empty");
          continue;
        }
        None => break,
      };

      match outcome.story {
        Some(story) => {
          filled.insert(outcome.rank, story);
        }
        None => match ids.get(next_unused) {
          Some(&id) => {
            debug!(rank = outcome.rank, rejected = outcome.id, next = id, "Backfilling slot");
            self.spawn_slot(&mut tasks, outcome.rank, id);
            next_unused += 1;
          }
          None => debug!(rank = outcome.rank, "No ids left, slot stays empty"),
        },
      }
    }

    // Dropping `tasks` aborts anything still in flight after a deadline.
    // Renumber so ranks stay dense when some slots were never filled.
    filled
      .into_values()
      .enumerate()
      .map(|(rank, story)| RankedStory { rank, story })
      .collect()
  }

  fn spawn_slot(&self, tasks: &mut JoinSet<SlotOutcome>, rank: usize, id: ItemId) {
    let source = Arc::clone(&self.source);
    let cache = Arc::clone(&self.cache);

    tasks.spawn(async move {
      let story = fetch_story(source.as_ref(), &cache, id).await;
      SlotOutcome { rank, id, story }
    });
  }
}

/// Resolve `id` to a story, consulting the cache first.
///
/// Story links and rejections are cached; fetch errors are not, so a
/// transient failure is retried by the next request.
async fn fetch_story<S: ItemSource + ?Sized>(
  source: &S,
  cache: &StoryCache,
  id: ItemId,
) -> Option<Story> {
  if let Some(cached) = cache.get(&id) {
    debug!(id, "Cache hit");
    return match cached {
      CachedOutcome::Story(story) => Some(story),
      CachedOutcome::Rejected => None,
    };
  }

  let item = match source.get_item(id).await {
    Ok(item) => item,
    Err(e) => {
      debug!(error = %e, "Treating failed item as rejected");
      return None;
    }
  };

  match Story::classify(item) {
    Some(story) => {
      cache.insert(id, CachedOutcome::Story(story.clone()));
      Some(story)
    }
    None => {
      cache.insert(id, CachedOutcome::Rejected);
      None
    }
  }
}
