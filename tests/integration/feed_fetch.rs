//! `ReqwestFetcher` against a local mock server.

use chrono::Utc;
use rcos_monitor::core::MonitorError;
use rcos_monitor::feed::{FeedClient, HttpFetch, ReqwestFetcher};
use rcos_monitor::freshness::RenderPass;
use rcos_monitor::roster::{BlogSpec, ProjectRecord};
use rcos_monitor::test_utils::{atom_feed_aged, html_page_linking, rss_feed};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(timeout: Duration) -> ReqwestFetcher {
    ReqwestFetcher::new("rcos-monitor-test", timeout).unwrap()
}

#[tokio::test]
async fn test_get_text_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hello"))
        .and(header("user-agent", "rcos-monitor-test"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hi"))
        .expect(1)
        .mount(&server)
        .await;

    let body = fetcher(Duration::from_secs(5)).get_text(&format!("{}/hello", server.uri())).await.unwrap();
    assert_eq!(body, "hi");
}

#[tokio::test]
async fn test_non_success_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/missing.xml", server.uri());
    let err = fetcher(Duration::from_secs(5)).get_text(&url).await.unwrap_err();
    match err {
        MonitorError::Network {
            url: failed,
            reason,
        } => {
            assert_eq!(failed, url);
            assert!(reason.contains("404"), "unexpected reason: {reason}");
        }
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_string("late").set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let err = fetcher(Duration::from_millis(200))
        .get_text(&format!("{}/slow", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, MonitorError::Network { .. }));
}

#[tokio::test]
async fn test_autodiscovery_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page_linking("feed.xml")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blog/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_feed(&["Sun, 15 Jun 2025 08:00:00 +0000"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = FeedClient::new(fetcher(Duration::from_secs(5)));
    let page = format!("{}/blog/", server.uri());

    assert_eq!(client.resolve_feed_url(&page).await.unwrap(), format!("{}/blog/feed.xml", server.uri()));
}

#[tokio::test]
async fn test_pass_dedups_requests_per_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page_linking("/atom.xml")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/atom.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(atom_feed_aged(Utc::now(), 1)))
        .expect(1)
        .mount(&server)
        .await;

    let blog = BlogSpec::DirectUrl(format!("{}/", server.uri()));
    let projects: Vec<ProjectRecord> = (0..4)
        .map(|i| {
            let mut project = ProjectRecord::named(format!("Project {i}"));
            project.blog = Some(blog.clone());
            project
        })
        .collect();

    let client = FeedClient::new(fetcher(Duration::from_secs(5)));
    let mut pass = RenderPass::new(&client);
    let table = pass.build_table(&projects).await.unwrap();
    pass.finish();

    assert_eq!(table.rows.len(), 4);
    for row in &table.rows {
        assert!(row.score > 2000.0 && row.score < 2002.0, "score {}", row.score);
    }
    // MockServer verifies the `expect(1)` counts on drop
}
