/// Hacker News item identifier
pub type ItemId = u64;

/// An item from the Hacker News item graph.
///
/// Only `kind` and `url` drive filtering; everything else is carried through
/// to the rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
  pub id: ItemId,
  pub kind: String, // "story", "comment", "job", "poll", ...
  pub url: Option<String>,
  pub title: String,
  pub by: Option<String>,
  pub score: Option<i64>,
  pub descendants: Option<u64>,
}

impl Item {
  /// Type tag of a story link
  pub const STORY: &'static str = "story";
}
