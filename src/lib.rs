//! # tickerboard
//!
//! **Tickerboard** is the runtime core of a live market dashboard.
//!
//! It keeps one supervised WebSocket session per configured data provider, stores the
//! latest record per ticker for each provider, classifies connection health and keeps
//! a short-lived list of user-facing notifications about connection changes.
//! Rendering is left to the caller: everything the board needs is exposed as
//! point-in-time snapshots.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ProviderConfig│   │ProviderConfig│   │ProviderConfig│
//!     │ "Stocks=wss" │   │ "Crypto=wss" │   │  "Broken"    │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Dashboard (provider orchestrator)                                │
//! │  - Bus (broadcast events)                                         │
//! │  - NotificationQueue (auto-expiring, ordered)                     │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! │  - Registry (session handles in configuration order)              │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               │
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   │
//!     │ SessionActor │   │ SessionActor │   │ SessionActor │   │
//!     │(connect loop)│   │(connect loop)│   │(connect loop)│   │
//!     │ RecordStore  │   │ RecordStore  │   │ RecordStore  │   │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘   │
//!      │ opened/closed/exhausted ─────────────────────► NotificationQueue
//!      │                  │                  │           (ordered, auto-expiring)
//!      │ Publishes:       │                  │                 │
//!      │ - SessionOpened  │                  │                 │
//!      │ - SessionClosed  │                  │                 │
//!      │ - Reconnect...   │                  │                 │
//!      │ - SessionExh.    │                  │                 │
//!      ▼                  ▼                  ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │                  (capacity: Config::bus_capacity)                 │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │   listener (Dashboard) │
//!                       └───────────┬────────────┘
//!                                   ▼
//!                             SubscriberSet
//!                           (per-sub queues)
//! ```
//!
//! ### Session lifecycle
//! ```text
//! Disconnected ──► Connecting ──► Connected ──► (close) ──► Disconnected
//!      ▲                │                                       │
//!      │                └── dial failed ──────────────► (close) │
//!      │                                                        ▼
//!      └──── sleep(backoff) ◄── attempts < ceiling ──── attempts += 1
//!                                                               │
//!                               attempts >= ceiling ──► Exhausted (terminal)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types                                  |
//! |-------------------|---------------------------------------------------------------|--------------------------------------------|
//! | **Orchestration** | One isolated session per provider, shutdown with grace.       | [`Dashboard`], [`DashboardBuilder`]        |
//! | **Records**       | Latest value per ticker, staleness as a pure function.        | [`Record`], [`RecordStore`], [`age`]       |
//! | **Status**        | Attempt count to severity.                                    | [`classify`], [`Severity`]                 |
//! | **Notifications** | Ordered, auto-expiring, dismissable.                          | [`NotificationQueue`], [`Notification`]    |
//! | **Policies**      | Retry ceiling, delay, optional backoff and jitter.            | [`ReconnectPolicy`], [`BackoffPolicy`]     |
//! | **Transport**     | Pluggable connector, WebSocket by default.                    | [`Connector`], [`WsConnector`]             |
//! | **Subscriber API**| Hook into session lifecycle events.                           | [`Subscribe`], [`LogWriter`]               |
//! | **Configuration** | Provider list parsing and runtime knobs.                      | [`ProviderConfig`], [`Config`]             |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use tickerboard::{Config, Dashboard, LogWriter, ProviderConfig, Subscribe};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let providers = ProviderConfig::parse_lenient(
//!         "Stocks=wss://stocks.example/feed;Crypto=wss://crypto.example/feed",
//!     );
//!
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::default())];
//!     let dashboard = Dashboard::builder(Config::default())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     // Runs until SIGINT/SIGTERM, then tears every session down.
//!     dashboard.run(providers).await?;
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod notifications;
mod policies;
mod providers;
mod records;
mod status;
mod subscribers;
mod transport;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{
    ActorExitReason, ConnState, Dashboard, DashboardBuilder, Lifecycle, Plan, ProviderView,
    SessionMachine, SessionStatus,
};
pub use error::{ConfigError, RuntimeError, TransportError};
pub use events::{Bus, Event, EventKind};
pub use notifications::{Level, Notification, NotificationQueue, describe};
pub use policies::{BackoffPolicy, JitterPolicy, ReconnectPolicy};
pub use providers::ProviderConfig;
pub use records::{Cost, Record, RecordStore, age, format_age};
pub use status::{Severity, classify};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
pub use transport::{BoxLink, Connector, Link, WsConnector};
