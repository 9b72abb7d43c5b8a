//! Runtime core: sessions and their orchestration.
//!
//! The public API from this module is [`Dashboard`] (with its builder) plus the
//! read-side types handed to renderers.
//!
//! Internal modules:
//! - [`machine`]: pure per-session state machine;
//! - [`actor`]: drives one session's connection, store and reconnects;
//! - [`view`]: read-side of a session;
//! - [`registry`]: owns session handles;
//! - [`dashboard`]: orchestrates sessions, notifications and shutdown;
//! - [`shutdown`]: OS signal handling.

mod actor;
mod builder;
mod dashboard;
mod machine;
mod registry;
mod shutdown;
mod view;

pub use actor::ActorExitReason;
pub use builder::DashboardBuilder;
pub use dashboard::Dashboard;
pub use machine::{ConnState, Lifecycle, Plan, SessionMachine};
pub use view::{ProviderView, SessionStatus};
