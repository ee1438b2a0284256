//! Full rendering passes over fixture rosters with an in-memory fetcher.

use chrono::Duration;
use rcos_monitor::core::MonitorError;
use rcos_monitor::feed::FeedClient;
use rcos_monitor::freshness::RenderPass;
use rcos_monitor::render::PageRenderer;
use rcos_monitor::test_utils::{
    StubFetcher, atom_feed_aged, html_page_linking, init_test_logging, rss_feed, sample_roster,
};

use crate::common::{OFFLINE_ROSTER, fixed_now, roster};

fn sample_fetcher() -> StubFetcher {
    let now = fixed_now();
    let three_days_ago = (now - Duration::days(3)).to_rfc2822();
    let five_days_ago = (now - Duration::days(5)).to_rfc2822();

    StubFetcher::new()
        .with_page("https://blog.observatory.example.org/", html_page_linking("/feed.xml"))
        .with_page("https://blog.observatory.example.org/feed.xml", rss_feed(&[&three_days_ago]))
        .with_page("https://github.com/example/observatory/commits/main.atom", atom_feed_aged(now, 2))
        .with_page("https://lighthouse.example.org/news.xml", rss_feed(&[&five_days_ago]))
}

#[tokio::test]
async fn test_sample_roster_ranking() {
    init_test_logging(None);
    let projects = roster(sample_roster());
    let client = FeedClient::new(sample_fetcher());
    let mut pass = RenderPass::at(&client, fixed_now());

    let ranked = pass.rank_projects(&projects).await.unwrap();
    let summary: Vec<(&str, f64)> = ranked.iter().map(|r| (r.project.name.as_str(), r.score)).collect();

    // Observatory: min(repo 2, blog 3). Lighthouse: no wiki, min(git 100, blog 5).
    assert_eq!(summary, [("Observatory", 2.0), ("Lighthouse", 1005.0), ("Dormant", 3000.0)]);
}

#[tokio::test]
async fn test_full_page_fetches_each_url_once() {
    let projects = roster(sample_roster());
    let client = FeedClient::new(sample_fetcher());
    let mut pass = RenderPass::at(&client, fixed_now());

    let table = pass.build_table(&projects).await.unwrap();
    let stats = pass.dashboard_stats(&projects).await.unwrap();
    let laggards = pass.laggards(&projects).await.unwrap();

    let fetcher = client.fetcher();
    assert_eq!(fetcher.calls_for("https://blog.observatory.example.org/"), 1);
    assert_eq!(fetcher.calls_for("https://blog.observatory.example.org/feed.xml"), 1);
    assert_eq!(fetcher.calls_for("https://github.com/example/observatory/commits/main.atom"), 1);
    assert_eq!(fetcher.calls_for("https://lighthouse.example.org/news.xml"), 1);
    assert_eq!(fetcher.calls_for("https://lighthouse.example.org/news"), 0);
    assert_eq!(fetcher.total_calls(), 4);

    assert_eq!(table.rows.len(), 3);
    assert_eq!(stats.num_projects, 3);
    assert_eq!(stats.all_three, 1);
    assert_eq!(stats.last_week, 2);
    assert_eq!(stats.members, 3);

    // Lighthouse's git repository counts as 100 days quiet
    let names: Vec<&str> = laggards.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Lighthouse", "Dormant"]);
}

#[tokio::test]
async fn test_shared_blog_fetched_once_for_many_projects() {
    let yaml: String = (0..5)
        .map(|i| format!("- Project Name: Team {i}\n  Blog: https://planet.example.org/\n"))
        .collect();
    let projects = roster(&yaml);

    let client = FeedClient::new(
        StubFetcher::new()
            .with_page("https://planet.example.org/", html_page_linking("https://planet.example.org/rss"))
            .with_page("https://planet.example.org/rss", rss_feed(&["Sat, 14 Jun 2025 12:00:00 +0000"])),
    );
    let mut pass = RenderPass::at(&client, fixed_now());

    let table = pass.build_table(&projects).await.unwrap();
    assert_eq!(table.rows.len(), 5);
    assert!(table.rows.iter().all(|row| row.score == 2001.0));
    assert_eq!(client.fetcher().total_calls(), 2);

    let (hits, misses) = pass.cache().stats();
    assert_eq!(misses, 1);
    assert!(hits > 0);
}

#[tokio::test]
async fn test_git_only_project_scores_1100_and_renders_unavailable() {
    let projects = roster(OFFLINE_ROSTER);
    let client = FeedClient::new(StubFetcher::new());
    let mut pass = RenderPass::at(&client, fixed_now());

    let table = pass.build_table(&projects).await.unwrap();
    let stats = pass.dashboard_stats(&projects).await.unwrap();
    assert_eq!(client.fetcher().total_calls(), 0);

    let lighthouse = &table.rows[0];
    assert_eq!(lighthouse.name, "Lighthouse");
    assert_eq!(lighthouse.score, 1100.0);
    assert_eq!(
        lighthouse.cells[3].html,
        "<a href=\"git:&#x2F;&#x2F;lighthouse.example.org&#x2F;lighthouse.git\">git</a> (Unavailable)"
    );
    assert_eq!(lighthouse.cells[3].style, "background-color:#ff5000;");
    assert_eq!(lighthouse.cells[2].html, "No");
    assert_eq!(lighthouse.cells[2].class, "no");
    assert_eq!(lighthouse.cells[4].class, "yes");

    let html = PageRenderer::new().unwrap().render_index(&table, &stats, pass.now()).unwrap();
    assert!(html.contains("git</a> (Unavailable)"));
    assert!(html.find("Lighthouse").unwrap() < html.find("Dormant").unwrap());
}

#[tokio::test]
async fn test_bogus_repository_type_aborts_pass() {
    let yaml = format!(
        "{OFFLINE_ROSTER}\n- Project Name: Legacy\n  Source Code: https://svn.example.org/legacy\n  Repo:\n    Type: bogus\n    URL: https://svn.example.org/legacy\n"
    );
    let projects = roster(&yaml);
    let client = FeedClient::new(StubFetcher::new());
    let mut pass = RenderPass::at(&client, fixed_now());

    let err = pass.build_table(&projects).await.unwrap_err();
    assert!(matches!(err, MonitorError::UnsupportedRepositoryType { .. }));
    assert!(err.to_string().contains("bogus"));
}

#[tokio::test]
async fn test_unreachable_blog_aborts_pass() {
    let yaml = format!("{OFFLINE_ROSTER}\n- Project Name: Offline Blog\n  Blog: https://gone.example.org/\n");
    let projects = roster(&yaml);
    let client = FeedClient::new(StubFetcher::new());
    let mut pass = RenderPass::at(&client, fixed_now());

    let err = pass.build_table(&projects).await.unwrap_err();
    assert!(matches!(err, MonitorError::Network { ref url, .. } if url == "https://gone.example.org/"));
}
