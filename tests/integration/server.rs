//! Router tests through `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rcos_monitor::config::MonitorConfig;
use rcos_monitor::feed::FeedClient;
use rcos_monitor::server::{AppState, build_app};
use rcos_monitor::test_utils::{StubFetcher, atom_feed_aged};
use tower::ServiceExt;

use crate::common::{OFFLINE_ROSTER, roster_file};

async fn get(app: axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_dashboard_ranks_and_colors() {
    let yaml = format!(
        "{OFFLINE_ROSTER}\n- Project Name: Active\n  Blog: https://active.example.org/atom\n  Source Code: https://github.com/example/active\n  Wiki: https://github.com/example/active/wiki\n  Repo:\n    Type: github\n    URL: https://active.example.org/atom\n"
    );
    let (_temp, path) = roster_file(&yaml);

    let fetcher =
        StubFetcher::new().with_page("https://active.example.org/atom", atom_feed_aged(chrono::Utc::now(), 2));
    let config = MonitorConfig {
        cache_max_age_secs: 60,
        ..MonitorConfig::default()
    }
    .with_overrides(Some(path), None);
    let state = AppState::new(config, FeedClient::new(fetcher)).unwrap();

    let (status, headers, body) = get(build_app(state.clone()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "public, max-age=60");
    assert!(headers.get(header::CONTENT_TYPE).unwrap().to_str().unwrap().starts_with("text/html"));

    let active = body.find(">Active<").unwrap();
    let lighthouse = body.find("Lighthouse").unwrap();
    let dormant = body.find("Dormant").unwrap();
    assert!(active < lighthouse && lighthouse < dormant);
    assert!(body.contains("github</a> ("));
    assert!(body.contains("git</a> (Unavailable)"));
    assert!(body.contains("3 projects, 2 members"));

    // Each request runs its own pass with a fresh cache
    let (status, _, _) = get(build_app(state.clone()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.client.fetcher().calls_for("https://active.example.org/atom"), 2);
}

#[tokio::test]
async fn test_key_route_covers_forty_days() {
    let (_temp, path) = roster_file(OFFLINE_ROSTER);
    let config = MonitorConfig::default().with_overrides(Some(path), None);
    let state = AppState::new(config, FeedClient::new(StubFetcher::new())).unwrap();

    let (status, _, body) = get(build_app(state), "/key").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">0 days old<"));
    assert!(body.contains(">40 days old<"));
    assert!(!body.contains(">41 days old<"));
}

#[tokio::test]
async fn test_laggards_route() {
    let (_temp, path) = roster_file(OFFLINE_ROSTER);
    let config = MonitorConfig::default().with_overrides(Some(path), None);
    let state = AppState::new(config, FeedClient::new(StubFetcher::new())).unwrap();

    let (status, _, body) = get(build_app(state), "/laggards").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Lighthouse"));
    assert!(body.contains("Dormant"));
    assert!(body.contains("100.0"));
}

#[tokio::test]
async fn test_fetch_failure_is_500() {
    let (_temp, path) = roster_file("- Project Name: Broken\n  Blog: https://down.example.org/\n");
    let config = MonitorConfig::default().with_overrides(Some(path), None);
    let state = AppState::new(config, FeedClient::new(StubFetcher::new())).unwrap();

    let (status, _, body) = get(build_app(state), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("https://down.example.org/"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (_temp, path) = roster_file(OFFLINE_ROSTER);
    let config = MonitorConfig::default().with_overrides(Some(path), None);
    let state = AppState::new(config, FeedClient::new(StubFetcher::new())).unwrap();

    let (status, _, _) = get(build_app(state), "/admin").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
