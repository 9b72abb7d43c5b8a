mod common;

use std::time::Duration;

use chrono::{DateTime, Utc};

use common::{Script, ScriptedConnector, config, record, settle, wait_for};
use tickerboard::{ConnState, Dashboard, EventKind, Level, ProviderConfig, Severity};

const T1: &str = "2024-05-01T12:00:00Z";
const T2: &str = "2024-05-01T12:00:05Z";

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

#[tokio::test(start_paused = true)]
async fn store_keeps_latest_record_per_ticker() {
    let connector = ScriptedConnector::new().script(
        "stocks.example",
        vec![Script::Hold(vec![
            record("AAPL", "Apple", 10.0, 12.0, T1),
            record("MSFT", "Microsoft", 20.0, 21.0, T1),
            record("AAPL", "Apple", 11.0, 13.0, T2),
        ])],
    );
    let dashboard = Dashboard::builder(config(10))
        .with_connector(connector)
        .build();
    let mut rx = dashboard.subscribe();

    dashboard
        .start(ProviderConfig::parse_lenient("Stocks=wss://stocks.example/feed"))
        .await;
    wait_for(&mut rx, EventKind::SessionOpened, "Stocks").await;
    settle().await;

    let view = dashboard.view("Stocks").await.unwrap();
    assert_eq!(view.state, ConnState::Connected);
    assert_eq!(view.severity, Severity::Healthy);
    let tickers: Vec<_> = view.records.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, ["AAPL", "MSFT"]);
    assert_eq!(view.records[0].observed_at, ts(T2));
    assert_eq!(view.records[0].cost.high, 13.0);
}

#[tokio::test(start_paused = true)]
async fn close_then_reopen_notifies_in_order() {
    let connector = ScriptedConnector::new().script(
        "stocks.example",
        vec![Script::Serve(vec![]), Script::Hold(vec![])],
    );
    let dashboard = Dashboard::builder(config(10))
        .with_connector(connector.clone())
        .build();
    let mut rx = dashboard.subscribe();

    dashboard
        .start(ProviderConfig::parse_lenient("Stocks=wss://stocks.example/feed"))
        .await;
    wait_for(&mut rx, EventKind::SessionOpened, "Stocks").await;
    let closed = wait_for(&mut rx, EventKind::SessionClosed, "Stocks").await;
    assert_eq!(closed.attempt, Some(1));
    let scheduled = wait_for(&mut rx, EventKind::ReconnectScheduled, "Stocks").await;
    assert_eq!(scheduled.delay_ms, Some(10_000));
    wait_for(&mut rx, EventKind::SessionOpened, "Stocks").await;
    settle().await;

    let texts: Vec<_> = dashboard
        .notifications()
        .await
        .into_iter()
        .map(|n| (n.level, n.text.to_string()))
        .collect();
    assert_eq!(
        texts,
        [
            (Level::Info, "Connected to Stocks".to_string()),
            (
                Level::Warn,
                "Connection to Stocks was closed. Trying to reconnect".to_string()
            ),
            (Level::Info, "Connected to Stocks".to_string()),
        ]
    );

    let view = dashboard.view("Stocks").await.unwrap();
    assert_eq!(view.attempts, 0);
    assert_eq!(view.severity, Severity::Healthy);
    assert_eq!(connector.dials("stocks.example"), 2);
}

#[tokio::test(start_paused = true)]
async fn exhausted_session_stops_dialing() {
    let connector = ScriptedConnector::new();
    let dashboard = Dashboard::builder(config(3))
        .with_connector(connector.clone())
        .build();
    let mut rx = dashboard.subscribe();

    dashboard
        .start(ProviderConfig::parse_lenient("Stocks=wss://stocks.example/feed"))
        .await;
    let exhausted = wait_for(&mut rx, EventKind::SessionExhausted, "Stocks").await;
    assert_eq!(exhausted.attempt, Some(3));

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(connector.dials("stocks.example"), 3);

    let view = dashboard.view("Stocks").await.unwrap();
    assert_eq!(view.state, ConnState::Exhausted);
    assert_eq!(view.severity, Severity::Unhealthy);
    assert_eq!(view.attempts, 3);

    let notes = dashboard.notifications().await;
    let warns = notes.iter().filter(|n| n.level == Level::Warn).count();
    let errors: Vec<_> = notes.iter().filter(|n| n.level == Level::Error).collect();
    assert_eq!(warns, 3);
    assert_eq!(errors.len(), 1);
    assert_eq!(&*errors[0].text, "Tried to reconnect 2 times. Won't repeat");
    assert_eq!(notes.last().map(|n| n.level), Some(Level::Error));
}

#[tokio::test(start_paused = true)]
async fn severity_follows_consecutive_closes() {
    let dashboard = Dashboard::builder(config(10))
        .with_connector(ScriptedConnector::new())
        .build();
    let mut rx = dashboard.subscribe();

    dashboard
        .start(ProviderConfig::parse_lenient("Stocks=wss://stocks.example/feed"))
        .await;

    wait_for(&mut rx, EventKind::SessionClosed, "Stocks").await;
    let view = dashboard.view("Stocks").await.unwrap();
    assert_eq!(view.severity, Severity::Degraded);

    wait_for(&mut rx, EventKind::SessionClosed, "Stocks").await;
    let view = dashboard.view("Stocks").await.unwrap();
    assert_eq!(view.severity, Severity::Unhealthy);
    assert_eq!(view.attempts, 2);
}

#[tokio::test(start_paused = true)]
async fn providers_are_isolated() {
    let connector = ScriptedConnector::new().script(
        "a.example",
        vec![Script::Hold(vec![record("AAPL", "Apple", 1.0, 2.0, T1)])],
    );
    let dashboard = Dashboard::builder(config(2))
        .with_connector(connector.clone())
        .build();
    let mut rx = dashboard.subscribe();

    dashboard
        .start(ProviderConfig::parse_lenient(
            "A=wss://a.example/feed;B=wss://b.example/feed",
        ))
        .await;
    wait_for(&mut rx, EventKind::SessionExhausted, "B").await;
    settle().await;

    let views = dashboard.views().await;
    let names: Vec<_> = views.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);

    assert_eq!(views[0].state, ConnState::Connected);
    assert_eq!(views[0].severity, Severity::Healthy);
    assert_eq!(views[0].records.len(), 1);
    assert_eq!(views[1].state, ConnState::Exhausted);
    assert!(views[1].records.is_empty());
    assert_eq!(connector.dials("a.example"), 1);
}

#[tokio::test(start_paused = true)]
async fn malformed_payload_is_dropped() {
    let connector = ScriptedConnector::new().script(
        "stocks.example",
        vec![Script::Hold(vec![
            "not json".to_string(),
            r#"{"ticker":"AAPL"}"#.to_string(),
            record("MSFT", "Microsoft", 20.0, 21.0, T1),
        ])],
    );
    let dashboard = Dashboard::builder(config(10))
        .with_connector(connector)
        .build();
    let mut rx = dashboard.subscribe();

    dashboard
        .start(ProviderConfig::parse_lenient("Stocks=wss://stocks.example/feed"))
        .await;
    wait_for(&mut rx, EventKind::RecordDropped, "Stocks").await;
    wait_for(&mut rx, EventKind::RecordDropped, "Stocks").await;
    settle().await;

    let view = dashboard.view("Stocks").await.unwrap();
    assert_eq!(view.state, ConnState::Connected);
    assert_eq!(view.attempts, 0);
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].ticker, "MSFT");
}

#[tokio::test(start_paused = true)]
async fn provider_without_endpoint_ends_exhausted() {
    let connector = ScriptedConnector::new();
    let dashboard = Dashboard::builder(config(2))
        .with_connector(connector.clone())
        .build();
    let mut rx = dashboard.subscribe();

    dashboard.start(ProviderConfig::parse_lenient("Broken")).await;
    let closed = wait_for(&mut rx, EventKind::SessionClosed, "Broken").await;
    assert_eq!(
        closed.reason.as_deref(),
        Some("provider has no endpoint configured")
    );
    let exhausted = wait_for(&mut rx, EventKind::SessionExhausted, "Broken").await;
    assert_eq!(exhausted.attempt, Some(2));

    let view = dashboard.view("Broken").await.unwrap();
    assert_eq!(view.state, ConnState::Exhausted);
    assert!(view.records.is_empty());
}

#[tokio::test(start_paused = true)]
async fn every_session_notifies_when_many_fail_at_once() {
    const PROVIDERS: usize = 400;

    let list: Vec<String> = (0..PROVIDERS)
        .map(|i| format!("P{i}=wss://p{i}.example/feed"))
        .collect();
    let dashboard = Dashboard::builder(config(1))
        .with_connector(ScriptedConnector::new())
        .build();

    dashboard
        .start(ProviderConfig::parse_lenient(&list.join(";")))
        .await;
    settle().await;

    let views = dashboard.views().await;
    assert_eq!(views.len(), PROVIDERS);
    assert!(views.iter().all(|v| v.state == ConnState::Exhausted));

    let notes = dashboard.notifications().await;
    let warns = notes.iter().filter(|n| n.level == Level::Warn).count();
    let errors = notes.iter().filter(|n| n.level == Level::Error).count();
    assert_eq!(warns, PROVIDERS);
    assert_eq!(errors, PROVIDERS);
}
