use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_test::{assert_err, assert_ok};

use redcollect::api::fixture::FixtureApi;
use redcollect::app::{AppContext, CollectorError};
use redcollect::cli::commands;
use redcollect::collector::{CollectRequest, Collector};
use redcollect::config::{Config, Credentials};
use redcollect::export;
use redcollect::throttle::NoDelay;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn credentials() -> Credentials {
    Credentials::new("client-id", "client-secret", "redcollect-tests/0.1")
}

fn collector(name: &str) -> Collector {
    let api = FixtureApi::from_path(&fixture_path(name)).unwrap();
    Collector::new(Arc::new(api), Arc::new(NoDelay))
}

fn context(name: &str, output: Option<PathBuf>) -> AppContext {
    let mut config = Config::default();
    config.collector.output = output;

    let mut ctx = AppContext::with_fixture(config, &fixture_path(name)).unwrap();
    ctx.credentials = credentials();
    ctx
}

#[tokio::test]
async fn collects_ten_items_with_bounded_comments() {
    let items = collector("diy.json")
        .run(&credentials(), &CollectRequest::default())
        .await
        .unwrap();

    assert_eq!(items.len(), 10);
    assert!(items.iter().all(|item| !item.title.is_empty()));

    let counts: Vec<usize> = items.iter().map(|item| item.comments.len()).collect();
    assert_eq!(counts, vec![5, 3, 0, 5, 5, 2, 5, 1, 5, 4]);
}

#[tokio::test]
async fn deferred_replies_keep_their_position() {
    let items = collector("diy.json")
        .run(&credentials(), &CollectRequest::default())
        .await
        .unwrap();

    let ids: Vec<&str> = items[0].comments.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["1d00kc0", "1d00kc1", "1d00km0", "1d00km1", "1d00km2"]
    );
}

#[tokio::test]
async fn every_comment_points_at_its_item() {
    let items = collector("diy.json")
        .run(&credentials(), &CollectRequest::default())
        .await
        .unwrap();

    for item in &items {
        let owners = items.iter().filter(|other| other.id == item.id).count();
        assert_eq!(owners, 1);
        assert!(item.comments.iter().all(|c| c.item_id == item.id));
    }
}

#[tokio::test]
async fn limit_larger_than_feed_returns_whole_feed() {
    let request = CollectRequest {
        limit: 50,
        ..CollectRequest::default()
    };

    let items = collector("diy.json")
        .run(&credentials(), &request)
        .await
        .unwrap();

    assert_eq!(items.len(), 12);
}

#[tokio::test]
async fn repeated_runs_export_identical_bytes() {
    let first = collector("diy.json")
        .run(&credentials(), &CollectRequest::default())
        .await
        .unwrap();
    let second = collector("diy.json")
        .run(&credentials(), &CollectRequest::default())
        .await
        .unwrap();

    let first = export::to_json(&first).unwrap();
    let second = export::to_json(&second).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[tokio::test]
async fn collect_command_writes_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reddit-test-data.json");
    let ctx = context("diy.json", Some(path.clone()));

    let items = assert_ok!(commands::collect(&ctx).await);

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, export::to_json(&items).unwrap());

    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 10);
    assert_eq!(
        parsed[0]["permalink"],
        "https://reddit.com/r/DIY/comments/1d00k/post_0/"
    );
}

#[tokio::test]
async fn failed_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reddit-test-data.json");
    let ctx = context("diy_network_failure.json", Some(path.clone()));

    let err = assert_err!(commands::collect(&ctx).await);

    assert!(matches!(err, CollectorError::Network(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn missing_secret_stops_before_fetching() {
    let api = Arc::new(FixtureApi::from_path(&fixture_path("diy.json")).unwrap());
    let collector = Collector::new(api.clone(), Arc::new(NoDelay));
    let credentials = Credentials {
        client_id: Some("client-id".into()),
        client_secret: None,
        user_agent: "redcollect-tests/0.1".into(),
    };

    let result = collector.run(&credentials, &CollectRequest::default()).await;

    assert!(matches!(
        result,
        Err(CollectorError::MissingCredential("REDDIT_CLIENT_SECRET"))
    ));
    assert_eq!(api.calls(), 0);
}
