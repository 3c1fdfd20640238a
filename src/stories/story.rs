use url::Url;

use crate::hn::Item;

/// A front page link: an item that passed the story filter.
///
/// This is what the cache holds. It deliberately has no rank, because the
/// same story may fill a different slot on the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
  pub item: Item,
  /// URL hostname without a leading `www.`; empty when the URL does not parse
  pub host: String,
}

impl Story {
  /// Keep `item` only if it is a story carrying an external URL.
  pub fn classify(item: Item) -> Option<Self> {
    let url = match item.url.as_deref() {
      Some(url) if item.kind == Item::STORY && !url.is_empty() => url,
      _ => return None,
    };
    let host = host_of(url);

    Some(Self { item, host })
  }

  pub fn url(&self) -> &str {
    self.item.url.as_deref().unwrap_or_default()
  }
}

/// A story placed at a slot of the front page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStory {
  /// 0-based slot index in the rendered list
  pub rank: usize,
  pub story: Story,
}

/// Cached result of looking at an item.
#[derive(Debug, Clone)]
pub enum CachedOutcome {
  Story(Story),
  /// Fetched successfully but not a story link
  Rejected,
}

/// Hostname of `url` with any leading `www.` removed, or empty if unparseable.
pub fn host_of(url: &str) -> String {
  Url::parse(url)
    .ok()
    .and_then(|u| {
      u.host_str()
        .map(|h| h.strip_prefix("www.").unwrap_or(h).to_string())
    })
    .unwrap_or_default()
}
