use crate::error::Result;

/// The user-facing side of the monitor.
///
/// Delivery is fire-and-forget from the monitor's point of view: a failed call is logged by
/// the caller and never retried.
pub trait Notifier {
    /// Surface a low-space alert.
    fn notify(&self, title: &str, message: &str) -> Result<()>;

    /// Surface a non-fatal error, e.g. an unreadable configuration source.
    fn show_error(&self, message: &str) -> Result<()>;

    /// Block until every notification handed out so far has been seen. Must be called before a
    /// short-lived process exits, or asynchronous notifiers lose what they still show.
    fn wait_idle(&self) {}
}
