//! Serde-deserializable types matching Hacker News API responses.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use serde::Deserialize;

use super::types::{Item, ItemId};

/// Body of `GET /item/{id}.json`. The API answers `null` for unknown ids,
/// which deserializes to `None` at the call site.
#[derive(Debug, Deserialize)]
pub struct ApiItem {
  pub id: ItemId,
  #[serde(rename = "type", default)]
  pub kind: String,
  pub url: Option<String>,
  #[serde(default)]
  pub title: String,
  pub by: Option<String>,
  pub score: Option<i64>,
  pub descendants: Option<u64>,
  #[serde(default)]
  pub deleted: bool,
  #[serde(default)]
  pub dead: bool,
}

impl ApiItem {
  /// Convert to the domain item.
  ///
  /// Deleted and dead items keep their type tag but lose their URL, so they
  /// never qualify as front page links.
  pub fn into_item(self) -> Item {
    let url = if self.deleted || self.dead {
      None
    } else {
      self.url.filter(|u| !u.is_empty())
    };

    Item {
      id: self.id,
      kind: self.kind,
      url,
      title: self.title,
      by: self.by,
      score: self.score,
      descendants: self.descendants,
    }
  }
}
