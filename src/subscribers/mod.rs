//! # Event subscribers.
//!
//! ```text
//! SessionActor ── publish(Event) ──► Bus ──► Dashboard listener
//!                                               └──► SubscriberSet::emit(&Event)
//!                                                        ├──► LogWriter
//!                                                        └──► custom Subscribe impls
//! ```

mod log;
mod set;
mod subscriber;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
