mod cache;
mod config;
mod hn;
mod logging;
mod render;
mod server;
mod stories;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "quiet-hn")]
#[command(about = "A quiet Hacker News front page: top stories, links only")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./quiet-hn.yaml or $XDG_CONFIG_HOME/quiet-hn/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// The port to start the web server on
  #[arg(short, long)]
  port: Option<u16>,

  /// The number of top stories to display
  #[arg(short = 'n', long)]
  num_stories: Option<usize>,

  /// Seconds a fetched item is reused before it is fetched again
  #[arg(long)]
  cache_ttl_secs: Option<u64>,
}

impl Args {
  /// Command line values win over the config file.
  fn apply(&self, mut config: config::Config) -> config::Config {
    if let Some(port) = self.port {
      config.server.port = port;
    }
    if let Some(count) = self.num_stories {
      config.stories.count = count;
    }
    if let Some(ttl) = self.cache_ttl_secs {
      config.stories.cache_ttl_secs = ttl;
    }
    config
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = args.apply(config::Config::load(args.config.as_deref())?);
  config.validate()?;

  let _log_guard = logging::init(&config.log)?;

  let client = hn::HnClient::new(&config.hn)?;
  let front_page = stories::FrontPage::new(client, config.stories.cache_ttl())
    .with_deadline(config.stories.deadline());

  info!(
    stories = config.stories.count,
    cache_ttl_secs = config.stories.cache_ttl_secs,
    upstream = %config.hn.base_url,
    "Starting quiet-hn"
  );

  let state = Arc::new(server::AppState {
    front_page,
    count: config.stories.count,
  });
  server::serve(config.server.port, state).await
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_args_override_config() {
    let args = Args::parse_from(["quiet-hn", "--port", "8080", "-n", "10"]);
    let config = args.apply(config::Config::default());

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.stories.count, 10);
    assert_eq!(config.stories.cache_ttl_secs, 900);
  }

  #[test]
  fn test_zero_stories_from_cli_is_invalid() {
    let args = Args::parse_from(["quiet-hn", "--num-stories", "0"]);
    let config = args.apply(config::Config::default());

    assert!(config.validate().is_err());
  }
}
