//! HTTP server for the dashboard.
//!
//! Routes:
//! - `GET /` - ranked dashboard with statistics
//! - `GET /key` - color legend
//! - `GET /laggards` - projects quiet for more than two weeks
//!
//! Every dashboard or laggards request reloads the roster and runs its own
//! rendering pass with a fresh feed cache. The HTTP client and compiled
//! templates are shared. Engine failures become a `500` with the error text.

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::MonitorConfig;
use crate::core::{MonitorError, MonitorResult};
use crate::feed::{FeedClient, HttpFetch};
use crate::render::{PageRenderer, index_page, laggards_page};
use crate::roster::load_roster;

/// Shared state handed to every request.
pub struct AppState<F> {
    /// Active configuration
    pub config: MonitorConfig,
    /// Feed client shared by all passes
    pub client: FeedClient<F>,
    /// Compiled page templates
    pub renderer: PageRenderer,
}

/// Cloneable handle to [`AppState`].
pub type SharedState<F> = Arc<AppState<F>>;

impl<F: HttpFetch + Send + Sync + 'static> AppState<F> {
    /// Build the shared state, compiling the page templates.
    pub fn new(config: MonitorConfig, client: FeedClient<F>) -> MonitorResult<SharedState<F>> {
        Ok(Arc::new(Self {
            config,
            client,
            renderer: PageRenderer::new()?,
        }))
    }
}

fn error_response(err: &MonitorError) -> Response {
    error!("Request failed: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}

async fn index<F: HttpFetch + Send + Sync + 'static>(State(state): State<SharedState<F>>) -> Response {
    let result = async {
        let projects = load_roster(&state.config.roster).await?;
        index_page(&state.renderer, &state.client, &projects).await
    }
    .await;

    match result {
        Ok(html) => ([(header::CACHE_CONTROL, state.config.cache_control())], Html(html)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn key<F: HttpFetch + Send + Sync + 'static>(State(state): State<SharedState<F>>) -> Response {
    match state.renderer.render_key() {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn laggards<F: HttpFetch + Send + Sync + 'static>(State(state): State<SharedState<F>>) -> Response {
    let result = async {
        let projects = load_roster(&state.config.roster).await?;
        laggards_page(&state.renderer, &state.client, &projects).await
    }
    .await;

    match result {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Build the axum application router.
///
/// Separated from [`run_server`] so the routes can be exercised without
/// binding a socket.
pub fn build_app<F: HttpFetch + Send + Sync + 'static>(state: SharedState<F>) -> Router {
    Router::new()
        .route("/", get(index::<F>))
        .route("/key", get(key::<F>))
        .route("/laggards", get(laggards::<F>))
        .with_state(state)
}

/// Bind to the configured address and serve until the process stops.
pub async fn run_server<F: HttpFetch + Send + Sync + 'static>(state: SharedState<F>) -> MonitorResult<()> {
    let listener = TcpListener::bind(&state.config.bind).await?;
    info!("rcos-monitor listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_app(state)).await?;
    Ok(())
}
