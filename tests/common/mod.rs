//! Scripted in-memory transport for driving sessions without a network.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use url::Url;

use tickerboard::{BoxLink, Config, Connector, Event, EventKind, Link, ReconnectPolicy, TransportError};

/// What one dial to an endpoint does.
#[derive(Clone, Debug)]
pub enum Script {
    /// Dial fails.
    Refuse,
    /// Dial succeeds, delivers messages, then the peer closes.
    Serve(Vec<String>),
    /// Dial succeeds, delivers messages, then stays open.
    Hold(Vec<String>),
}

/// Connector that replays a per-host script. Hosts without a script left refuse.
#[derive(Default)]
pub struct ScriptedConnector {
    scripts: Mutex<HashMap<String, VecDeque<Script>>>,
    dials: Mutex<HashMap<String, usize>>,
    closes: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(self: &Arc<Self>, host: &str, steps: Vec<Script>) -> Arc<Self> {
        self.scripts
            .lock()
            .unwrap()
            .insert(host.to_string(), steps.into());
        Arc::clone(self)
    }

    /// Number of dials made to `host`.
    pub fn dials(&self, host: &str) -> usize {
        self.dials.lock().unwrap().get(host).copied().unwrap_or(0)
    }

    /// Number of links closed intentionally.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self, endpoint: &Url) -> Result<BoxLink, TransportError> {
        let host = endpoint.host_str().unwrap_or_default().to_string();
        *self.dials.lock().unwrap().entry(host.clone()).or_default() += 1;

        let step = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&host)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Script::Refuse);

        match step {
            Script::Refuse => Err(TransportError::Connect {
                error: "connection refused".into(),
            }),
            Script::Serve(msgs) => Ok(Box::new(ScriptedLink::new(msgs, false, &self.closes))),
            Script::Hold(msgs) => Ok(Box::new(ScriptedLink::new(msgs, true, &self.closes))),
        }
    }
}

struct ScriptedLink {
    msgs: VecDeque<String>,
    hold: bool,
    closes: Arc<AtomicUsize>,
}

impl ScriptedLink {
    fn new(msgs: Vec<String>, hold: bool, closes: &Arc<AtomicUsize>) -> Self {
        Self {
            msgs: msgs.into(),
            hold,
            closes: Arc::clone(closes),
        }
    }
}

#[async_trait]
impl Link for ScriptedLink {
    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        if let Some(msg) = self.msgs.pop_front() {
            return Some(Ok(msg));
        }
        if self.hold {
            std::future::pending::<()>().await;
        }
        None
    }

    async fn close(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Config with a fixed reconnect delay and notifications that never expire.
pub fn config(max_attempts: u32) -> Config {
    Config {
        reconnect: ReconnectPolicy::fixed(max_attempts, Duration::from_secs(10)),
        notification_ttl: Duration::ZERO,
        ..Config::default()
    }
}

pub fn record(ticker: &str, name: &str, low: f64, high: f64, time: &str) -> String {
    format!(
        r#"{{"ticker":"{ticker}","name":"{name}","cost":{{"low":{low},"high":{high},"currency":"USD"}},"time":"{time}"}}"#
    )
}

/// Waits until an event of `kind` for `provider` arrives.
pub async fn wait_for(rx: &mut broadcast::Receiver<Event>, kind: EventKind, provider: &str) -> Event {
    let fut = async {
        loop {
            let ev = rx.recv().await.expect("bus closed");
            if ev.kind == kind && ev.provider.as_deref() == Some(provider) {
                return ev;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(3600), fut)
        .await
        .expect("event not observed")
}

/// Lets every task run until it blocks.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
