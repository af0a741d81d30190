//! Per-object event tables.
//!
//! An [`EventTable`] is a small ordered map from [`MessageId`] to an event
//! slot. Each slot holds the callback, its scheduling mode, an opaque
//! context value, the last payload it fired with, and two gates: the slot's
//! own `enabled` flag and an optional shared [`Condition`]. A slot fires only
//! when both gates pass.
//!
//! # Dispatch
//!
//! [`EventTable::dispatch`] finds the slot for a message, updates the slot's
//! payload under the payload lock, takes a copy of it, releases every table
//! lock and then runs the callback with that copy. Synchronous callbacks run
//! inline on the calling thread; asynchronous callbacks are handed to the
//! table's [`AsyncExecutor`]. Each invocation therefore observes exactly the
//! parameters of the message that triggered it, even when two asynchronous
//! firings of the same slot overlap.
//!
//! Because no table lock is held while a callback runs, a callback may
//! register, enable or disable events on the table that invoked it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use tinygui_core::{AsyncExecutor, EventContext, EventTable, MessageId, SyncMode};
//!
//! let table: EventTable<&'static str> = EventTable::new(AsyncExecutor::default());
//! let seen = Arc::new(AtomicI32::new(0));
//! let seen_in_callback = seen.clone();
//!
//! let slot = table
//!     .register(
//!         MessageId::KEY_DOWN,
//!         move |_sender, _ctx, args| {
//!             seen_in_callback.store(args.param1() as i32, Ordering::SeqCst);
//!         },
//!         EventContext::none(),
//!         SyncMode::Sync,
//!     )
//!     .unwrap();
//!
//! let fired = table.dispatch(&"sender", MessageId::KEY_DOWN, 13, 0).unwrap();
//! assert_eq!(fired.slot, slot);
//! assert_eq!(seen.load(Ordering::SeqCst), 13);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::error::EventError;
use crate::event::{EventPayload, MessageId};
use crate::executor::AsyncExecutor;

/// Callback stored in an event slot.
///
/// Receives the sender the event was dispatched for, the slot's context and
/// an immutable snapshot of the payload.
pub type EventCallback<S> = Arc<dyn Fn(&S, &EventContext, &EventPayload) + Send + Sync>;

/// Whether a slot's callback runs on the dispatching thread or off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Run inline; dispatch returns after the callback does.
    #[default]
    Sync,
    /// Run on a worker; dispatch returns immediately.
    Async,
}

/// Opaque user data attached to an event slot.
#[derive(Clone, Default)]
pub struct EventContext(Option<Arc<dyn Any + Send + Sync>>);

impl EventContext {
    /// A context carrying nothing.
    pub fn none() -> Self {
        Self(None)
    }

    /// Wrap a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    /// Share an already reference-counted value.
    pub fn from_arc(value: Arc<dyn Any + Send + Sync>) -> Self {
        Self(Some(value))
    }

    /// Borrow the value if it is a `T`.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|value| value.downcast_ref::<T>())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventContext")
            .field(&if self.0.is_some() { "Some(..)" } else { "None" })
            .finish()
    }
}

/// A shared boolean that gates an event slot.
///
/// Clones refer to the same flag, so the owner of the flag can switch a
/// slot on and off without touching the table.
#[derive(Debug, Clone)]
pub struct Condition(Arc<AtomicBool>);

impl Condition {
    pub fn new(value: bool) -> Self {
        Self(Arc::new(AtomicBool::new(value)))
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }

    /// Whether two conditions share the same flag.
    pub fn ptr_eq(&self, other: &Condition) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Position of a slot in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(usize);

impl SlotIndex {
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a dispatch that matched an enabled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredEvent {
    /// The slot that fired.
    pub slot: SlotIndex,
    /// How its callback was run.
    pub mode: SyncMode,
    /// The slot's interrupt flag, read after a synchronous callback returned
    /// or after an asynchronous one was launched. False if the callback left
    /// no slot for the message at that index.
    pub interrupt: bool,
    /// The payload the callback received.
    pub payload: EventPayload,
}

struct EventSlot<S> {
    message: MessageId,
    callback: EventCallback<S>,
    mode: SyncMode,
    context: EventContext,
    payload: Mutex<EventPayload>,
    condition: Option<Condition>,
    interrupt: bool,
    enabled: bool,
}

impl<S> EventSlot<S> {
    fn can_fire(&self) -> bool {
        self.enabled && self.condition.as_ref().is_none_or(Condition::get)
    }
}

/// An ordered map from message id to event slot.
pub struct EventTable<S> {
    slots: RwLock<Vec<EventSlot<S>>>,
    executor: AsyncExecutor,
}

impl<S> EventTable<S> {
    /// Create an empty table whose async callbacks run on `executor`.
    pub fn new(executor: AsyncExecutor) -> Self {
        Self {
            slots: RwLock::new(Vec::new()),
            executor,
        }
    }

    /// The executor used for asynchronous slots.
    pub fn executor(&self) -> &AsyncExecutor {
        &self.executor
    }

    /// Register `callback` for `message`.
    ///
    /// An existing slot for the same message is overwritten in place: its
    /// callback, context and mode are replaced, while its payload, condition,
    /// interrupt and enabled flags are kept. Otherwise a new slot is appended
    /// with a payload typed by the message category.
    pub fn register<F>(
        &self,
        message: MessageId,
        callback: F,
        context: EventContext,
        mode: SyncMode,
    ) -> Result<SlotIndex, EventError>
    where
        F: Fn(&S, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        self.register_arc(message, Arc::new(callback), context, mode)
    }

    /// Register an already shared callback. See [`register`](Self::register).
    pub fn register_arc(
        &self,
        message: MessageId,
        callback: EventCallback<S>,
        context: EventContext,
        mode: SyncMode,
    ) -> Result<SlotIndex, EventError> {
        let mut slots = self.slots.write();

        if let Some(index) = slots.iter().position(|slot| slot.message == message) {
            let slot = &mut slots[index];
            slot.callback = callback;
            slot.context = context;
            slot.mode = mode;
            tracing::trace!(target: "tinygui_core::event", %message, index, ?mode, "event slot overwritten");
            return Ok(SlotIndex(index));
        }

        slots
            .try_reserve(1)
            .map_err(|_| EventError::AllocationFailed)?;
        slots.push(EventSlot {
            message,
            callback,
            mode,
            context,
            payload: Mutex::new(EventPayload::for_message(message)),
            condition: None,
            interrupt: false,
            enabled: true,
        });

        let index = slots.len() - 1;
        tracing::trace!(target: "tinygui_core::event", %message, index, ?mode, "event slot added");
        Ok(SlotIndex(index))
    }

    fn with_slot_mut<T>(
        &self,
        index: SlotIndex,
        f: impl FnOnce(&mut EventSlot<S>) -> T,
    ) -> Result<T, EventError> {
        let mut slots = self.slots.write();
        let len = slots.len();
        slots
            .get_mut(index.0)
            .map(f)
            .ok_or(EventError::InvalidSlot { index: index.0, len })
    }

    fn with_slot<T>(&self, index: SlotIndex, f: impl FnOnce(&EventSlot<S>) -> T) -> Result<T, EventError> {
        let slots = self.slots.read();
        let len = slots.len();
        slots
            .get(index.0)
            .map(f)
            .ok_or(EventError::InvalidSlot { index: index.0, len })
    }

    /// Attach (or with `None`, detach) a condition gating the slot.
    pub fn set_condition(&self, index: SlotIndex, condition: Option<Condition>) -> Result<(), EventError> {
        self.with_slot_mut(index, |slot| slot.condition = condition)
    }

    /// Set whether the slot suppresses default handling of its message.
    pub fn set_interrupt(&self, index: SlotIndex, interrupt: bool) -> Result<(), EventError> {
        self.with_slot_mut(index, |slot| slot.interrupt = interrupt)
    }

    /// Enable or disable the slot. Independent of its condition.
    pub fn set_enabled(&self, index: SlotIndex, enabled: bool) -> Result<(), EventError> {
        self.with_slot_mut(index, |slot| slot.enabled = enabled)
    }

    pub fn is_interrupt(&self, index: SlotIndex) -> Result<bool, EventError> {
        self.with_slot(index, |slot| slot.interrupt)
    }

    pub fn is_enabled(&self, index: SlotIndex) -> Result<bool, EventError> {
        self.with_slot(index, |slot| slot.enabled)
    }

    pub fn mode(&self, index: SlotIndex) -> Result<SyncMode, EventError> {
        self.with_slot(index, |slot| slot.mode)
    }

    /// The payload the slot last fired with, or its zeroed initial payload.
    pub fn last_payload(&self, index: SlotIndex) -> Result<EventPayload, EventError> {
        self.with_slot(index, |slot| *slot.payload.lock())
    }

    /// Find the slot registered for `message`.
    pub fn find(&self, message: MessageId) -> Option<SlotIndex> {
        self.slots
            .read()
            .iter()
            .position(|slot| slot.message == message)
            .map(SlotIndex)
    }

    /// Registered messages in slot order.
    pub fn messages(&self) -> Vec<MessageId> {
        self.slots.read().iter().map(|slot| slot.message).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Remove every slot, returning how many there were.
    pub fn clear(&self) -> usize {
        let mut slots = self.slots.write();
        let count = slots.len();
        slots.clear();
        count
    }
}

impl<S> EventTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Fire the slot registered for `message`, if any and if it may fire.
    ///
    /// Returns `None` when there is no slot for the message or when the slot
    /// is disabled or its condition is false.
    #[tracing::instrument(
        skip_all,
        target = "tinygui_core::event",
        level = "trace",
        fields(message = %message, param1 = param1, param2 = param2)
    )]
    pub fn dispatch(&self, sender: &S, message: MessageId, param1: usize, param2: isize) -> Option<FiredEvent> {
        let (slot, callback, context, payload, mode) = {
            let slots = self.slots.read();
            let index = slots.iter().position(|slot| slot.message == message)?;
            let slot = &slots[index];
            if !slot.can_fire() {
                tracing::trace!(target: "tinygui_core::event", index, "slot gated off");
                return None;
            }

            let payload = {
                let mut payload = slot.payload.lock();
                payload.update(message, param1, param2);
                *payload
            };

            (SlotIndex(index), slot.callback.clone(), slot.context.clone(), payload, slot.mode)
        };

        match mode {
            SyncMode::Sync => callback(sender, &context, &payload),
            SyncMode::Async => {
                let sender = sender.clone();
                if let Err(err) = self.executor.spawn(move || callback(&sender, &context, &payload)) {
                    tracing::warn!(target: "tinygui_core::event", %message, error = %err, "async callback was not started");
                }
            }
        }

        // A callback may have cleared the table or reused the index for another
        // message; only the slot still bound to `message` can interrupt.
        let interrupt = self
            .slots
            .read()
            .get(slot.0)
            .is_some_and(|s| s.message == message && s.interrupt);

        Some(FiredEvent {
            slot,
            mode,
            interrupt,
            payload,
        })
    }
}

impl<S> fmt::Debug for EventTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTable")
            .field("messages", &self.messages())
            .field("executor", &self.executor)
            .finish()
    }
}
