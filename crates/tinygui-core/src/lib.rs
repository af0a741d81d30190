//! Core systems for tinyGUI.
//!
//! This crate provides the toolkit-independent substrate the widget crate is
//! built on:
//!
//! - **Object Model**: type tags, monotonically increasing ids and the
//!   re-entrant lock every object owns
//! - **Messages**: message ids, categories and the payloads delivered to
//!   callbacks
//! - **Event Tables**: per-object registration, gating, interrupt flags and
//!   sync/async firing
//! - **Async Execution**: thread-per-event or pooled execution of async
//!   callbacks
//! - **Dispatch Thread**: tracking of the thread that owns a message loop
//!
//! # Event Table Example
//!
//! ```
//! use tinygui_core::{AsyncExecutor, Condition, EventContext, EventTable, MessageId, SyncMode};
//!
//! let table: EventTable<u32> = EventTable::new(AsyncExecutor::default());
//! let slot = table
//!     .register(MessageId::CLOSE, |_, _, _| {}, EventContext::none(), SyncMode::Sync)
//!     .unwrap();
//!
//! // Only fire while the owner says so.
//! let armed = Condition::new(false);
//! table.set_condition(slot, Some(armed.clone())).unwrap();
//! assert!(table.dispatch(&7, MessageId::CLOSE, 0, 0).is_none());
//!
//! armed.set(true);
//! assert!(table.dispatch(&7, MessageId::CLOSE, 0, 0).is_some());
//! ```

mod error;
pub mod event;
pub mod event_table;
pub mod executor;
pub mod logging;
pub mod object;
pub mod thread_check;

pub use error::{CoreError, EventError, Result};
pub use event::{
    EventArgs, EventPayload, MessageCategory, MessageId, MouseEventArgs, high_word, low_word, make_param,
};
pub use event_table::{
    Condition, EventCallback, EventContext, EventTable, FiredEvent, SlotIndex, SyncMode,
};
pub use executor::{AsyncExecutor, AsyncPolicy, ExecutorConfig};
pub use logging::PerfSpan;
pub use object::{Object, ObjectBase, ObjectGuard, ObjectId, ObjectType, object_cast};
pub use thread_check::DispatchThread;
