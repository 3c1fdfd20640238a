//! HTTP surface: the rendered front page and a health probe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use color_eyre::{eyre::eyre, Result};
use std::sync::Arc;
use tracing::{error, info};

use crate::hn::ItemSource;
use crate::render;
use crate::stories::FrontPage;

/// Shared state of every request handler.
pub struct AppState<S> {
  pub front_page: FrontPage<S>,
  /// Stories per page
  pub count: usize,
}

pub fn router<S: ItemSource + 'static>(state: Arc<AppState<S>>) -> Router {
  Router::new()
    .route("/", get(index::<S>))
    .route("/healthz", get(healthz))
    .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve<S: ItemSource + 'static>(port: u16, state: Arc<AppState<S>>) -> Result<()> {
  let addr = format!("0.0.0.0:{}", port);
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .map_err(|e| eyre!("Failed to bind {}: {}", addr, e))?;

  info!(%addr, "Listening");

  axum::serve(listener, router(state))
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| eyre!("Server error: {}", e))?;

  info!("Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(error = %e, "Failed to listen for Ctrl-C");
    // Without a signal handler, keep serving
    std::future::pending::<()>().await;
  }
}

async fn index<S: ItemSource + 'static>(State(state): State<Arc<AppState<S>>>) -> Response {
  match state.front_page.top_stories(state.count).await {
    Ok(top) => Html(render::page(&top)).into_response(),
    Err(e) => {
      error!(error = %e, "Front page unavailable");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render::error_page("Failed to load top stories")),
      )
        .into_response()
    }
  }
}

async fn healthz() -> &'static str {
  "ok"
}
