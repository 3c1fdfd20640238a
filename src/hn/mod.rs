//! Hacker News item graph access.
//!
//! Items are fetched one at a time; there is no bulk endpoint. The front page
//! code only depends on [`ItemSource`], so tests can swap in an in-memory graph.

mod api_types;
mod client;
mod error;
mod types;

pub use client::HnClient;
pub use error::HnError;
pub use types::{Item, ItemId};

use async_trait::async_trait;

/// Source of ranked ids and individual items.
#[async_trait]
pub trait ItemSource: Send + Sync {
  /// Current front page ranking, best first.
  async fn top_item_ids(&self) -> Result<Vec<ItemId>, HnError>;

  /// Fetch a single item by id.
  async fn get_item(&self, id: ItemId) -> Result<Item, HnError>;
}
