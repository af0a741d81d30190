//! The message loop.
//!
//! Native messages arrive on the toolkit's queue, posted by a backend (or by
//! any thread through [`Toolkit::post`]). The loop looks up the widget that
//! owns each message's native handle and [`dispatch`]es the message to it on
//! the loop's thread, which becomes the toolkit's dispatch thread.
//!
//! ```
//! use tinygui::{MessageLoop, Rect, Toolkit, Window};
//!
//! let (toolkit, backend) = Toolkit::headless().unwrap();
//! let window = Window::new(&toolkit, "Quiz", Rect::new(0, 0, 200, 100));
//! let handle = window.show().unwrap();
//!
//! backend.user_close(&toolkit, handle).unwrap();
//! let mut message_loop = MessageLoop::new(&toolkit);
//! assert_eq!(message_loop.run(), 0);
//! ```

use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use tinygui_core::logging::span_names;
use tinygui_core::{MessageId, PerfSpan};

use crate::backend::NativeHandle;
use crate::toolkit::Toolkit;
use crate::widget::dispatch;

/// An entry in the toolkit's message queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMessage {
    /// A message for the widget owning `handle`.
    Native {
        handle: NativeHandle,
        message: MessageId,
        param1: usize,
        param2: isize,
    },
    /// Stop the loop with an exit code.
    Quit(i32),
}

/// Result of [`MessageLoop::pump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// The queue ran dry after `processed` messages.
    Idle { processed: usize },
    /// A quit message was taken from the queue.
    Quit(i32),
}

/// Delivers queued messages to widgets.
pub struct MessageLoop {
    toolkit: Toolkit,
    processed: u64,
}

impl MessageLoop {
    pub fn new(toolkit: &Toolkit) -> Self {
        Self {
            toolkit: toolkit.clone(),
            processed: 0,
        }
    }

    /// Total number of native messages delivered by this loop.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Run until a quit message arrives and return its code.
    pub fn run(&mut self) -> i32 {
        self.toolkit.dispatch_thread().mark_current();
        tracing::debug!(target: "tinygui::dispatch", "message loop started");
        let _span = PerfSpan::new(span_names::PUMP);

        let code = loop {
            // The toolkit keeps a sender alive, so the queue never disconnects.
            let Ok(message) = self.toolkit.receiver().recv() else {
                break 0;
            };
            if let Some(code) = self.handle(message) {
                break code;
            }
        };

        tracing::debug!(target: "tinygui::dispatch", code, processed = self.processed, "message loop finished");
        code
    }

    /// Run until a quit message arrives or `timeout` elapses. Returns the
    /// quit code, or `None` on timeout.
    pub fn run_timeout(&mut self, timeout: Duration) -> Option<i32> {
        self.toolkit.dispatch_thread().mark_current();
        let _span = PerfSpan::new(span_names::PUMP);
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.toolkit.receiver().recv_timeout(remaining) {
                Ok(message) => {
                    if let Some(code) = self.handle(message) {
                        return Some(code);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    tracing::debug!(target: "tinygui::dispatch", ?timeout, "message loop timed out");
                    return None;
                }
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Deliver every queued message without blocking.
    ///
    /// Stops early at a quit message; messages queued behind it stay
    /// queued.
    pub fn pump(&mut self) -> PumpStatus {
        self.toolkit.dispatch_thread().mark_current();
        let _span = PerfSpan::new(span_names::PUMP);

        let mut processed = 0;
        while let Ok(message) = self.toolkit.receiver().try_recv() {
            if let Some(code) = self.handle(message) {
                return PumpStatus::Quit(code);
            }
            processed += 1;
        }
        PumpStatus::Idle { processed }
    }

    fn handle(&mut self, message: LoopMessage) -> Option<i32> {
        match message {
            LoopMessage::Quit(code) => Some(code),
            LoopMessage::Native {
                handle,
                message,
                param1,
                param2,
            } => {
                self.deliver(handle, message, param1, param2);
                None
            }
        }
    }

    fn deliver(&mut self, handle: NativeHandle, message: MessageId, param1: usize, param2: isize) {
        let Some(widget) = self.toolkit.widget_for(handle) else {
            tracing::trace!(target: "tinygui::dispatch", %handle, %message, "message for an unknown handle dropped");
            return;
        };

        self.processed += 1;
        if let Err(err) = dispatch(&widget, message, param1, param2) {
            tracing::warn!(
                target: "tinygui::dispatch",
                %handle,
                id = %widget.widget_base().id(),
                %message,
                error = %err,
                "dispatch failed"
            );
        }
    }
}
