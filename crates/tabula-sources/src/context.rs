//! Workspace context
//!
//! Related and self sources are anchored at the host's "active" document,
//! which may not exist yet when a table is first evaluated (the host is
//! still starting up). Instead of polling, the host publishes the active
//! document through a watch channel and source construction awaits the first
//! value with a bounded timeout.

use crate::error::{SourceError, SourceResult};
use std::time::Duration;
use tabula_core::DocumentRef;
use tokio::sync::watch;

const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Host side: publishes the currently active document
#[derive(Debug, Clone)]
pub struct WorkspaceHandle {
    tx: watch::Sender<Option<DocumentRef>>,
}

impl WorkspaceHandle {
    pub fn set_active(&self, doc: Option<DocumentRef>) {
        // Receivers having gone away is fine; there is nothing to notify
        let _ = self.tx.send(doc);
    }
}

/// Consumer side: awaits the active document with a bounded timeout
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    rx: watch::Receiver<Option<DocumentRef>>,
    timeout: Duration,
}

impl WorkspaceContext {
    /// Create a linked handle/context pair with the default ready timeout
    pub fn channel() -> (WorkspaceHandle, WorkspaceContext) {
        Self::channel_with_timeout(DEFAULT_READY_TIMEOUT)
    }

    pub fn channel_with_timeout(timeout: Duration) -> (WorkspaceHandle, WorkspaceContext) {
        let (tx, rx) = watch::channel(None);
        (WorkspaceHandle { tx }, WorkspaceContext { rx, timeout })
    }

    /// Context that is already anchored at a fixed document
    pub fn fixed(doc: DocumentRef) -> Self {
        // The value outlives the sender in a watch channel, so the receiver
        // alone is enough here
        let (_tx, rx) = watch::channel(Some(doc));
        WorkspaceContext {
            rx,
            timeout: DEFAULT_READY_TIMEOUT,
        }
    }

    /// Wait for the host to publish an active document
    ///
    /// Fails with [`SourceError::NoActiveDocument`] when the timeout elapses
    /// or the host side is gone without ever publishing one.
    pub async fn active_document(&self) -> SourceResult<DocumentRef> {
        let mut rx = self.rx.clone();
        let wait = async {
            loop {
                if let Some(doc) = rx.borrow_and_update().clone() {
                    return Some(doc);
                }
                if rx.changed().await.is_err() {
                    return None;
                }
            }
        };

        match tokio::time::timeout(self.timeout, wait).await {
            Ok(Some(doc)) => Ok(doc),
            Ok(None) | Err(_) => Err(SourceError::NoActiveDocument(self.timeout)),
        }
    }
}
