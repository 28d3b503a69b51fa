//! Integration tests for mounted portal screens against a mock API.

mod common;

use std::time::Duration;

use campus_portal::models::DashboardRole;
use campus_portal::{
    LoadOutcome, LoadingAggregator, OverlayState, OverlayWatcher, PortalScreens, RefreshTrigger,
};
use common::{mock_portal, settle, test_client, url, HttpError, MockResponse};

#[tokio::test]
async fn test_mount_loads_every_screen_and_hides_overlay() {
    let mock = mock_portal();
    let aggregator = LoadingAggregator::new();
    let refresh = RefreshTrigger::new();
    let overlay = OverlayWatcher::spawn(&aggregator);

    let screens = PortalScreens::new(&test_client(&mock), &aggregator, DashboardRole::Student);
    let mounted = screens.mount(&refresh);
    settle().await;

    assert_eq!(overlay.state(), OverlayState::Hidden);
    assert_eq!(mounted.about.state().data.map(|t| t.len()), Some(2));
    assert_eq!(mounted.news.state().data.map(|n| n.len()), Some(3));
    assert_eq!(
        mounted.dashboard.state().data.and_then(|d| d.greeting),
        Some("Hello".to_string())
    );
    assert!(mounted.errors().is_empty());

    mounted.unmount().await;
}

#[tokio::test]
async fn test_pull_to_refresh_refetches_all_mounted_screens() {
    let mock = mock_portal();
    let aggregator = LoadingAggregator::new();
    let refresh = RefreshTrigger::new();

    let screens = PortalScreens::new(&test_client(&mock), &aggregator, DashboardRole::Parent);
    let mounted = screens.mount(&refresh);
    settle().await;
    assert_eq!(mock.get_requests().len(), 6);

    refresh.pull_to_refresh(&aggregator);
    settle().await;

    for path in [
        "/about",
        "/programs",
        "/events",
        "/news",
        "/institutions",
        "/dashboard/parent",
    ] {
        assert_eq!(mock.request_count(&url(path)), 2, "{} refetched once", path);
    }
    assert!(!aggregator.is_globally_busy());

    mounted.unmount().await;
}

#[tokio::test]
async fn test_failed_screen_does_not_hold_overlay() {
    let mock = mock_portal();
    mock.set_response(
        &url("/events"),
        MockResponse::Error(HttpError::ConnectionFailed("connection refused".to_string())),
    );
    let aggregator = LoadingAggregator::new();
    let refresh = RefreshTrigger::new();
    let overlay = OverlayWatcher::spawn(&aggregator);

    let screens = PortalScreens::new(&test_client(&mock), &aggregator, DashboardRole::Student);
    let mounted = screens.mount(&refresh);
    settle().await;

    assert_eq!(overlay.state(), OverlayState::Hidden);
    let errors = mounted.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "events");

    // The banner's retry button
    mock.set_response(
        &url("/events"),
        MockResponse::json(serde_json::json!({ "success": true, "data": [] })),
    );
    assert_eq!(mounted.events.screen().retry().await, LoadOutcome::Loaded);
    assert!(mounted.errors().is_empty());

    mounted.unmount().await;
}

#[tokio::test]
async fn test_unmount_mid_fetch_hides_overlay() {
    let mock = mock_portal();
    mock.set_response(&url("/news"), MockResponse::Pending);
    let aggregator = LoadingAggregator::new();
    let refresh = RefreshTrigger::new();
    let overlay = OverlayWatcher::spawn(&aggregator);

    let screens = PortalScreens::new(&test_client(&mock), &aggregator, DashboardRole::Student);
    let mounted = screens.mount(&refresh);
    settle().await;

    assert_eq!(overlay.state(), OverlayState::Shown);
    assert_eq!(aggregator.busy_keys().len(), 1);
    assert!(aggregator.get_component_loading("news"));

    mounted.unmount().await;
    settle().await;

    assert_eq!(overlay.state(), OverlayState::Hidden);
    assert!(!aggregator.get_component_loading("news"));
}

#[tokio::test]
async fn test_refresh_during_slow_fetch_restarts_it() {
    let mock = mock_portal();
    let aggregator = LoadingAggregator::new();
    let refresh = RefreshTrigger::new();

    mock.push_response(
        &url("/programs"),
        MockResponse::json(serde_json::json!({ "success": true, "data": [] }))
            .delayed(Duration::from_secs(30)),
    );

    let screens = PortalScreens::new(&test_client(&mock), &aggregator, DashboardRole::Student);
    let mounted = screens.mount(&refresh);
    settle().await;
    assert!(aggregator.get_component_loading("programs"));

    refresh.pull_to_refresh(&aggregator);
    settle().await;

    assert!(!aggregator.is_globally_busy());
    let programs = mounted.programs.state().data.unwrap();
    assert_eq!(programs[0].name, "Computer Science");

    mounted.unmount().await;
}

#[tokio::test]
async fn test_pull_to_refresh_during_manual_retry() {
    let mock = mock_portal();
    let aggregator = LoadingAggregator::new();
    let refresh = RefreshTrigger::new();
    let overlay = OverlayWatcher::spawn(&aggregator);

    let screens = PortalScreens::new(&test_client(&mock), &aggregator, DashboardRole::Student);
    let mounted = screens.mount(&refresh);
    settle().await;
    assert_eq!(mock.request_count(&url("/news")), 1);

    // Slow answer for the retry, quicker one for the refresh that follows it.
    mock.push_response(
        &url("/news"),
        MockResponse::json(serde_json::json!({ "success": true, "data": [] }))
            .delayed(Duration::from_millis(300)),
    );
    mock.push_response(
        &url("/news"),
        MockResponse::json(serde_json::json!({
            "success": true,
            "data": [{ "id": "n9", "title": "Refreshed", "summary": "" }]
        }))
        .delayed(Duration::from_millis(100)),
    );

    let news = mounted.news.screen().clone();
    let retry = tokio::spawn(async move { news.retry().await });
    settle().await;
    assert!(aggregator.get_component_loading("news"));

    refresh.pull_to_refresh(&aggregator);
    settle().await;

    let screen = mounted.news.screen();
    assert_eq!(mock.request_count(&url("/news")), 3, "refresh fetched again");
    assert!(screen.is_loading());
    assert_eq!(screen.is_loading(), aggregator.get_component_loading("news"));
    assert_eq!(overlay.state(), OverlayState::Shown);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!aggregator.is_globally_busy());
    assert_eq!(overlay.state(), OverlayState::Hidden);
    assert_eq!(mounted.news.state().data.unwrap()[0].title, "Refreshed");

    assert_eq!(retry.await.unwrap(), LoadOutcome::Superseded);
    assert_eq!(mounted.news.state().data.map(|n| n.len()), Some(1));
    assert!(!aggregator.is_globally_busy());

    mounted.unmount().await;
}

#[tokio::test]
async fn test_dropping_mounted_portal_hides_overlay_at_once() {
    let mock = mock_portal();
    mock.set_response(&url("/events"), MockResponse::Pending);
    let aggregator = LoadingAggregator::new();
    let refresh = RefreshTrigger::new();

    let screens = PortalScreens::new(&test_client(&mock), &aggregator, DashboardRole::Student);
    let mounted = screens.mount(&refresh);
    settle().await;
    assert!(aggregator.get_component_loading("events"));

    drop(mounted);
    assert!(!aggregator.is_globally_busy());
}
