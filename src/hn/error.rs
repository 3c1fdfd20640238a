use thiserror::Error;

use super::types::ItemId;

#[derive(Error, Debug)]
pub enum HnError {
  /// The ranked id list could not be retrieved. Fatal for a front page request.
  #[error("top stories unavailable: {0}")]
  UpstreamUnavailable(String),
  /// A single item could not be fetched or decoded.
  #[error("failed to fetch item {id}: {reason}")]
  ItemFetch { id: ItemId, reason: String },
}

impl HnError {
  pub fn item(id: ItemId, reason: impl ToString) -> Self {
    Self::ItemFetch {
      id,
      reason: reason.to_string(),
    }
  }
}
