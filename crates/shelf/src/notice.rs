//! Transient notices for rejected payloads
//!
//! Every validation rejection is passed to a [`RejectionNotifier`] before the
//! gateway returns its sentinel result. The notice is best effort and carries
//! no programmatic contract; interactive front ends surface it to the user,
//! headless embeddings can silence it.

use parking_lot::Mutex;
use shelf_core::Rejection;
use std::sync::mpsc::{self, Receiver, Sender};

/// Receives a short-lived notice for each rejected payload
pub trait RejectionNotifier: Send + Sync {
    fn notify(&self, rejection: &Rejection);
}

/// Writes the reason to the log at `warn` level (default)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl RejectionNotifier for LogNotifier {
    fn notify(&self, rejection: &Rejection) {
        tracing::warn!("{}", rejection);
    }
}

/// Drops every notice
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl RejectionNotifier for SilentNotifier {
    fn notify(&self, _rejection: &Rejection) {}
}

/// Forwards notices over a channel, e.g. to a UI thread
pub struct ChannelNotifier {
    tx: Mutex<Sender<Rejection>>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, Receiver<Rejection>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx: Mutex::new(tx) }, rx)
    }
}

impl RejectionNotifier for ChannelNotifier {
    fn notify(&self, rejection: &Rejection) {
        // Receiver gone: nobody is showing notices anymore.
        let _ = self.tx.lock().send(rejection.clone());
    }
}
