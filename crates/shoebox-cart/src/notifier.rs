//! # Notifiers
//!
//! Sinks for user-facing failure messages (toasts, banners, stderr).
//!
//! Notification is fire-and-forget: implementations must not fail and the
//! cart never looks at what they do.

use std::io::Write;
use std::sync::Mutex;

use tracing::warn;

/// Receives one fixed user-facing message per failed cart operation.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Logs notifications as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        warn!(target: "shoebox::notify", "{}", message);
    }
}

/// Writes notifications to stderr, for terminal consumers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        // Nowhere left to report a failed stderr write
        let _ = writeln!(std::io::stderr().lock(), "! {}", message);
    }
}

/// Keeps every message it receives, in order.
///
/// Handy for UI tests and for consumers that render notifications later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drains the messages received so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(
            &mut *self
                .messages
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.notify("first");
        notifier.notify("second");

        assert_eq!(notifier.messages(), vec!["first", "second"]);
        assert_eq!(notifier.take().len(), 2);
        assert!(notifier.messages().is_empty());
    }
}
