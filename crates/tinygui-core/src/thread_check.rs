//! Dispatch-thread tracking.
//!
//! One thread owns a toolkit's message loop and runs every synchronous
//! callback and all default message handling. The loop records that thread
//! in a [`DispatchThread`] when it starts, so other code can ask whether it
//! is running on it:
//!
//! ```
//! use tinygui_core::thread_check::DispatchThread;
//!
//! let dispatch = std::sync::Arc::new(DispatchThread::new());
//! dispatch.mark_current();
//! assert!(dispatch.is_current());
//!
//! let remote = dispatch.clone();
//! assert!(!std::thread::spawn(move || remote.is_current()).join().unwrap());
//! ```

use std::thread::{self, ThreadId};

use parking_lot::RwLock;

/// Remembers which thread runs a message loop.
#[derive(Debug, Default)]
pub struct DispatchThread {
    id: RwLock<Option<ThreadId>>,
}

impl DispatchThread {
    /// A tracker with no thread recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current thread, replacing any previous one.
    pub fn mark_current(&self) {
        let current = thread::current().id();
        let previous = self.id.write().replace(current);
        if previous.is_some_and(|id| id != current) {
            tracing::debug!(target: "tinygui_core", ?previous, ?current, "dispatch thread changed");
        }
    }

    /// Forget the recorded thread.
    pub fn clear(&self) {
        *self.id.write() = None;
    }

    /// The recorded thread, if any.
    pub fn id(&self) -> Option<ThreadId> {
        *self.id.read()
    }

    /// Whether the calling thread is the recorded one.
    ///
    /// Returns `false` if nothing has been recorded.
    pub fn is_current(&self) -> bool {
        self.id() == Some(thread::current().id())
    }
}
