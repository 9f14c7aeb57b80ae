//! User-facing error notifications.
//!
//! Cart operations return typed results; a `Notifier` is an optional layer
//! that surfaces failures to the person using the front end.

use tracing::warn;

pub trait Notifier: Send + Sync {
    /// Show an error message. Fire-and-forget.
    fn error(&self, message: &str);
}

/// Reports messages as `warn!` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(target: "rocketcart::notify", "{}", message);
    }
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn error(&self, message: &str) {
        self(message)
    }
}
