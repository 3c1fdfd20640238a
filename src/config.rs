use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a fetched item is reused before it is fetched again
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub server: ServerConfig,
  pub stories: StoriesConfig,
  pub hn: HnConfig,
  pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub port: u16,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self { port: 3000 }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoriesConfig {
  /// Number of stories on the front page
  pub count: usize,
  pub cache_ttl_secs: u64,
  /// Per-request time budget; unset waits for every slot
  pub deadline_ms: Option<u64>,
}

impl Default for StoriesConfig {
  fn default() -> Self {
    Self {
      count: 30,
      cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
      deadline_ms: None,
    }
  }
}

impl StoriesConfig {
  pub fn cache_ttl(&self) -> Duration {
    Duration::from_secs(self.cache_ttl_secs)
  }

  pub fn deadline(&self) -> Option<Duration> {
    self.deadline_ms.map(Duration::from_millis)
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HnConfig {
  pub base_url: String,
  pub request_timeout_secs: u64,
}

impl Default for HnConfig {
  fn default() -> Self {
    Self {
      base_url: "https://hacker-news.firebaseio.com/v0".to_string(),
      request_timeout_secs: 10,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
  /// tracing-subscriber filter directive (e.g. "quiet_hn=debug"); RUST_LOG wins
  pub filter: Option<String>,
  /// Write logs to this file instead of stderr
  pub file: Option<PathBuf>,
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./quiet-hn.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/quiet-hn/config.yaml
  ///
  /// Without any file the defaults are used. Call [`Config::validate`] once
  /// command line overrides are applied.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("quiet-hn.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("quiet-hn").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    // An empty file is an empty document, not an error
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_yaml::from_str(contents)?)
  }

  /// Reject settings the server cannot run with.
  pub fn validate(&self) -> Result<()> {
    if self.stories.count == 0 {
      return Err(eyre!("stories.count must be at least 1"));
    }
    if self.hn.base_url.trim().is_empty() {
      return Err(eyre!("hn.base_url must not be empty"));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.stories.count, 30);
    assert_eq!(config.stories.cache_ttl(), DEFAULT_CACHE_TTL);
    assert_eq!(config.stories.deadline(), None);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_partial_file_keeps_other_defaults() {
    let config = Config::parse(
      "server:\n  port: 8080\nstories:\n  count: 10\n  deadline_ms: 2500\n",
    )
    .unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.stories.count, 10);
    assert_eq!(config.stories.deadline(), Some(Duration::from_millis(2500)));
    assert_eq!(config.stories.cache_ttl_secs, 900);
    assert_eq!(config.hn.request_timeout_secs, 10);
  }

  #[test]
  fn test_empty_file_is_default() {
    let config = Config::parse("  \n").unwrap();
    assert_eq!(config.stories.count, 30);
  }

  #[test]
  fn test_zero_stories_rejected() {
    let config = Config::parse("stories:\n  count: 0\n").unwrap();
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_missing_explicit_path_is_error() {
    let err = Config::load(Some(Path::new("/nonexistent/quiet-hn.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }
}
