//! Reconnect policies.
//!
//! This module groups the knobs that control **whether** a session redials after a
//! close and **how long** it waits first.
//!
//! ## Contents
//! - [`ReconnectPolicy`] ceiling on consecutive closes + backoff
//! - [`BackoffPolicy`] how delays evolve (first / factor / max + jitter)
//! - [`JitterPolicy`] randomization on top of the computed delay
//!
//! ## Defaults
//! - `ReconnectPolicy::default()` → 1000 attempts.
//! - `BackoffPolicy::default()` → fixed 10 s, no jitter.

mod backoff;
mod jitter;
mod reconnect;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
pub use reconnect::ReconnectPolicy;
