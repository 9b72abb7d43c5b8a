//! User-facing notifications.
//!
//! - [`Notification`], [`Level`] the entry shown to the user
//! - [`NotificationQueue`] shared, ordered, auto-expiring list
//! - [`describe`] maps lifecycle events (`opened` / `closed` / `exhausted`) to text

mod notification;
mod queue;

pub use notification::{Level, Notification, describe};
pub use queue::NotificationQueue;
