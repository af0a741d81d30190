//! Error types for tinyGUI core.

use std::fmt;

/// Errors raised by event tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The slot index does not name a slot of this table.
    InvalidSlot {
        /// The slot index that was requested.
        index: usize,
        /// Number of slots in the table at the time of the call.
        len: usize,
    },
    /// The table could not grow to hold another slot.
    AllocationFailed,
    /// An asynchronous callback could not be handed to a worker.
    SpawnFailed(String),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSlot { index, len } => {
                write!(f, "Event slot {index} does not exist (table has {len} slots)")
            }
            Self::AllocationFailed => write!(f, "Failed to grow the event table"),
            Self::SpawnFailed(msg) => write!(f, "Failed to spawn async event worker: {msg}"),
        }
    }
}

impl std::error::Error for EventError {}

/// The main error type for tinyGUI core operations.
#[derive(Debug)]
pub enum CoreError {
    /// Event table error.
    Event(EventError),
    /// The async worker pool could not be built.
    PoolCreation(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(err) => write!(f, "Event error: {err}"),
            Self::PoolCreation(msg) => write!(f, "Failed to create async worker pool: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Event(err) => Some(err),
            Self::PoolCreation(_) => None,
        }
    }
}

impl From<EventError> for CoreError {
    fn from(err: EventError) -> Self {
        Self::Event(err)
    }
}

/// A specialized Result type for tinyGUI core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
