//! Observer interface over client state snapshots.
//!
//! Built on a `tokio::sync::watch` channel: subscribers always see the most
//! recent state and are woken when it changes. Intermediate states may be
//! skipped if a subscriber falls behind; rendering only ever needs the latest.

use tokio::sync::watch;

/// A subscription to state snapshots.
///
/// ## Usage Pattern
///
/// ```ignore
/// let mut sub = client.subscribe();
/// while sub.changed().await {
///     render(&sub.current());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Subscription<S> {
    receiver: watch::Receiver<S>,
}

impl<S: Clone> Subscription<S> {
    pub(crate) fn new(receiver: watch::Receiver<S>) -> Self {
        Self { receiver }
    }

    /// Latest snapshot, marking it as seen.
    pub fn current(&mut self) -> S {
        self.receiver.borrow_and_update().clone()
    }

    /// Whether a snapshot newer than the last one seen is available.
    ///
    /// Returns `false` once the publishing client is gone.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next change; `false` means the client was dropped.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}
