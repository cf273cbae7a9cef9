//! Loading flag raised while a submission awaits confirmation.

use std::sync::Arc;

use tokio::sync::watch;

/// Observable boolean, owned by the caller and lent to the submitter.
#[derive(Debug, Clone)]
pub struct LoadingFlag {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingFlag {
    /// New flag, initially false.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender: Arc::new(sender) }
    }

    /// Current value.
    pub fn is_loading(&self) -> bool {
        *self.sender.borrow()
    }

    /// Receiver notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }

    /// Raise the flag until the returned guard is dropped.
    pub fn begin(&self) -> LoadingGuard {
        self.sender.send_replace(true);
        LoadingGuard { sender: self.sender.clone() }
    }
}

/// Lowers the flag on drop, on success and failure paths alike.
#[derive(Debug)]
#[must_use = "the flag drops back to false as soon as the guard is dropped"]
pub struct LoadingGuard {
    sender: Arc<watch::Sender<bool>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.sender.send_replace(false);
    }
}
