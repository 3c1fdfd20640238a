use async_trait::async_trait;
use std::time::Duration;

use crate::config::HnConfig;

use super::api_types::ApiItem;
use super::error::HnError;
use super::types::{Item, ItemId};
use super::ItemSource;

/// Hacker News Firebase API client
#[derive(Clone)]
pub struct HnClient {
  client: reqwest::Client,
  base_url: String,
}

impl HnClient {
  pub fn new(config: &HnConfig) -> Result<Self, HnError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.request_timeout_secs))
      .user_agent(concat!("quiet-hn/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| HnError::UpstreamUnavailable(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
    })
  }

  fn endpoint(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path)
  }
}

#[async_trait]
impl ItemSource for HnClient {
  async fn top_item_ids(&self) -> Result<Vec<ItemId>, HnError> {
    let response = self
      .client
      .get(self.endpoint("topstories.json"))
      .send()
      .await
      .and_then(|r| r.error_for_status())
      .map_err(|e| HnError::UpstreamUnavailable(e.to_string()))?;

    response
      .json::<Vec<ItemId>>()
      .await
      .map_err(|e| HnError::UpstreamUnavailable(format!("Failed to parse top stories: {}", e)))
  }

  async fn get_item(&self, id: ItemId) -> Result<Item, HnError> {
    let response = self
      .client
      .get(self.endpoint(&format!("item/{}.json", id)))
      .send()
      .await
      .and_then(|r| r.error_for_status())
      .map_err(|e| HnError::item(id, e))?;

    let item: Option<ApiItem> = response.json().await.map_err(|e| HnError::item(id, e))?;

    item
      .map(ApiItem::into_item)
      .ok_or_else(|| HnError::item(id, "item not found"))
  }
}
