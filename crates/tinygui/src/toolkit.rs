//! The toolkit context shared by every widget.
//!
//! A [`Toolkit`] bundles the backend, the configuration, the executor used
//! for asynchronous callbacks, the table that routes native handles to
//! widgets and the message queue that feeds a [`MessageLoop`]. It is cheap
//! to clone; every widget keeps one.
//!
//! ```
//! use tinygui::{AsyncPolicy, Toolkit};
//!
//! let toolkit = Toolkit::builder()
//!     .async_policy(AsyncPolicy::Pooled { threads: 2 })
//!     .queue_capacity(64)
//!     .build()
//!     .unwrap();
//! assert_eq!(toolkit.config().queue_capacity, Some(64));
//! ```
//!
//! [`MessageLoop`]: crate::MessageLoop

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::RwLock;
use tinygui_core::{AsyncExecutor, AsyncPolicy, DispatchThread, ExecutorConfig, MessageId};

use crate::backend::{Backend, HeadlessBackend, NativeHandle};
use crate::error::{GuiError, GuiResult};
use crate::message_loop::LoopMessage;
use crate::widget::layout::AnchorMask;
use crate::widget::{WeakWidgetRef, WidgetRef};

/// Toolkit-wide settings.
#[derive(Debug, Clone, Default)]
pub struct ToolkitConfig {
    /// How asynchronous callbacks are run.
    pub executor: ExecutorConfig,
    /// Maximum number of queued messages; `None` means unbounded.
    pub queue_capacity: Option<usize>,
    /// Anchor mask given to newly created controls.
    pub default_anchor: AnchorMask,
}

/// Builder for a [`Toolkit`].
#[derive(Default)]
pub struct ToolkitBuilder {
    config: ToolkitConfig,
    backend: Option<Arc<dyn Backend>>,
}

impl ToolkitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `backend` instead of a fresh [`HeadlessBackend`].
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn async_policy(mut self, policy: AsyncPolicy) -> Self {
        self.config.executor.policy = policy;
        self
    }

    /// Name prefix of asynchronous worker threads.
    pub fn worker_thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.executor.thread_name = name.into();
        self
    }

    pub fn worker_stack_size(mut self, bytes: usize) -> Self {
        self.config.executor.stack_size = Some(bytes);
        self
    }

    /// Bound the message queue. [`Toolkit::post`] fails once it is full.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = Some(capacity);
        self
    }

    pub fn default_anchor(mut self, anchor: AnchorMask) -> Self {
        self.config.default_anchor = anchor;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ToolkitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> GuiResult<Toolkit> {
        let executor = AsyncExecutor::new(self.config.executor.clone())?;
        let (tx, rx) = match self.config.queue_capacity {
            Some(capacity) => crossbeam_channel::bounded(capacity),
            None => crossbeam_channel::unbounded(),
        };
        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(HeadlessBackend::new()) as Arc<dyn Backend>);

        tracing::debug!(
            target: "tinygui::lifecycle",
            policy = ?self.config.executor.policy,
            queue_capacity = ?self.config.queue_capacity,
            "toolkit created"
        );

        Ok(Toolkit {
            inner: Arc::new(ToolkitInner {
                backend,
                config: self.config,
                executor,
                routes: RwLock::new(HashMap::new()),
                tx,
                rx,
                dispatch_thread: DispatchThread::new(),
            }),
        })
    }
}

struct ToolkitInner {
    backend: Arc<dyn Backend>,
    config: ToolkitConfig,
    executor: AsyncExecutor,
    routes: RwLock<HashMap<NativeHandle, WeakWidgetRef>>,
    tx: Sender<LoopMessage>,
    rx: Receiver<LoopMessage>,
    dispatch_thread: DispatchThread,
}

/// Shared context for widgets and the message loop.
#[derive(Clone)]
pub struct Toolkit {
    inner: Arc<ToolkitInner>,
}

impl Toolkit {
    /// A toolkit with default settings over `backend`.
    pub fn new(backend: Arc<dyn Backend>) -> GuiResult<Self> {
        ToolkitBuilder::new().backend(backend).build()
    }

    pub fn builder() -> ToolkitBuilder {
        ToolkitBuilder::new()
    }

    /// A toolkit over a new [`HeadlessBackend`], returned alongside it.
    pub fn headless() -> GuiResult<(Self, Arc<HeadlessBackend>)> {
        let backend = Arc::new(HeadlessBackend::new());
        let toolkit = Self::new(backend.clone())?;
        Ok((toolkit, backend))
    }

    #[inline]
    pub fn backend(&self) -> &dyn Backend {
        self.inner.backend.as_ref()
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.inner.config
    }

    /// The executor every widget's event table hands async callbacks to.
    pub fn executor(&self) -> &AsyncExecutor {
        &self.inner.executor
    }

    pub fn dispatch_thread(&self) -> &DispatchThread {
        &self.inner.dispatch_thread
    }

    /// Whether the caller runs on the thread of this toolkit's message loop.
    pub fn is_dispatch_thread(&self) -> bool {
        self.inner.dispatch_thread.is_current()
    }

    /// Whether two handles refer to the same toolkit.
    pub fn ptr_eq(&self, other: &Toolkit) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // =========================================================================
    // Routing
    // =========================================================================

    pub(crate) fn register_route(&self, handle: NativeHandle, widget: &WidgetRef) {
        self.inner.routes.write().insert(handle, Arc::downgrade(widget));
        tracing::trace!(target: "tinygui::dispatch", %handle, id = %widget.widget_base().id(), "route registered");
    }

    pub(crate) fn unregister_route(&self, handle: NativeHandle) {
        if self.inner.routes.write().remove(&handle).is_some() {
            tracing::trace!(target: "tinygui::dispatch", %handle, "route removed");
        }
    }

    /// The live widget owning `handle`.
    pub fn widget_for(&self, handle: NativeHandle) -> Option<WidgetRef> {
        self.inner.routes.read().get(&handle).and_then(|weak| weak.upgrade())
    }

    /// Number of registered routes.
    pub fn route_count(&self) -> usize {
        self.inner.routes.read().len()
    }

    // =========================================================================
    // Message queue
    // =========================================================================

    /// Queue a native message for the widget owning `handle`.
    ///
    /// Safe to call from any thread.
    pub fn post(&self, handle: NativeHandle, message: MessageId, param1: usize, param2: isize) -> GuiResult<()> {
        self.send(LoopMessage::Native {
            handle,
            message,
            param1,
            param2,
        })
    }

    /// Ask the message loop to return `code`.
    pub fn post_quit(&self, code: i32) -> GuiResult<()> {
        tracing::debug!(target: "tinygui::dispatch", code, "quit posted");
        self.send(LoopMessage::Quit(code))
    }

    fn send(&self, message: LoopMessage) -> GuiResult<()> {
        // The receiver lives as long as the sender, so only a full queue refuses.
        self.inner.tx.try_send(message).map_err(|_| GuiError::QueueFull)
    }

    pub(crate) fn receiver(&self) -> &Receiver<LoopMessage> {
        &self.inner.rx
    }

    /// Number of messages waiting in the queue.
    pub fn pending(&self) -> usize {
        self.inner.rx.len()
    }
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("config", &self.inner.config)
            .field("routes", &self.route_count())
            .field("pending", &self.pending())
            .finish()
    }
}

static_assertions::assert_impl_all!(Toolkit: Send, Sync, Clone);
