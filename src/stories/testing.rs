//! In-memory item graph for exercising the front page without a network.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::hn::{HnError, Item, ItemId, ItemSource};

pub fn story(id: ItemId, url: &str) -> Item {
  Item {
    id,
    kind: Item::STORY.to_string(),
    url: Some(url.to_string()),
    title: format!("Story {}", id),
    by: Some("pg".to_string()),
    score: Some(100),
    descendants: Some(3),
  }
}

pub fn comment(id: ItemId) -> Item {
  Item {
    id,
    kind: "comment".to_string(),
    url: None,
    title: String::new(),
    by: Some("dang".to_string()),
    score: None,
    descendants: None,
  }
}

/// In-memory item graph that records every `get_item` call.
#[derive(Default)]
pub struct FakeSource {
  pub top: Vec<ItemId>,
  pub top_fails: bool,
  items: HashMap<ItemId, Item>,
  failing: HashSet<ItemId>,
  delays: HashMap<ItemId, Duration>,
  calls: Mutex<Vec<ItemId>>,
  in_flight: AtomicUsize,
  max_in_flight: AtomicUsize,
}

impl FakeSource {
  pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
    let items: HashMap<_, _> = items.into_iter().map(|i| (i.id, i)).collect();
    let mut top: Vec<_> = items.keys().copied().collect();
    top.sort_unstable();
    Self {
      top,
      items,
      ..Self::default()
    }
  }

  pub fn with_delay(mut self, id: ItemId, delay: Duration) -> Self {
    self.delays.insert(id, delay);
    self
  }

  pub fn with_failure(mut self, id: ItemId) -> Self {
    self.failing.insert(id);
    self
  }

  pub fn calls(&self) -> Vec<ItemId> {
    self.calls.lock().unwrap().clone()
  }

  pub fn max_in_flight(&self) -> usize {
    self.max_in_flight.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ItemSource for FakeSource {
  async fn top_item_ids(&self) -> Result<Vec<ItemId>, HnError> {
    if self.top_fails {
      return Err(HnError::UpstreamUnavailable("connection refused".to_string()));
    }
    Ok(self.top.clone())
  }

  async fn get_item(&self, id: ItemId) -> Result<Item, HnError> {
    self.calls.lock().unwrap().push(id);
    let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    self.max_in_flight.fetch_max(now, Ordering::SeqCst);

    if let Some(delay) = self.delays.get(&id) {
      tokio::time::sleep(*delay).await;
    } else {
      tokio::task::yield_now().await;
    }
    self.in_flight.fetch_sub(1, Ordering::SeqCst);

    if self.failing.contains(&id) {
      return Err(HnError::item(id, "boom"));
    }
    self
      .items
      .get(&id)
      .cloned()
      .ok_or_else(|| HnError::item(id, "item not found"))
  }
}
