//! Error types for tinyGUI widgets.

use thiserror::Error;
use tinygui_core::{CoreError, EventError, ObjectId};

use crate::backend::BackendError;

/// Errors returned by widget operations.
///
/// A [`GuiError::Backend`] returned from a setter means the in-memory model
/// was already updated; only the native side failed.
#[derive(Debug, Error)]
pub enum GuiError {
    /// A native backend call failed.
    #[error("native call failed: {0}")]
    Backend(#[from] BackendError),

    /// An event table operation failed.
    #[error("event table error: {0}")]
    Event(#[from] EventError),

    /// The toolkit could not be set up.
    #[error("toolkit setup failed: {0}")]
    Core(#[from] CoreError),

    /// The widget was destroyed.
    #[error("widget {0} has been destroyed")]
    Destroyed(ObjectId),

    /// A draw call was made outside a paint session.
    #[error("widget {0} is not painting")]
    NotPainting(ObjectId),

    /// The child is already attached to a container.
    #[error("widget {child} already has a parent")]
    AlreadyParented {
        /// The child being added.
        child: ObjectId,
    },

    /// Adding the child would make a widget its own ancestor.
    #[error("adding widget {child} to {parent} would create a cycle")]
    CircularParentage {
        /// The container.
        parent: ObjectId,
        /// The child being added.
        child: ObjectId,
    },

    /// The widget is not a child of the container.
    #[error("widget {child} is not a child of {parent}")]
    NotAChild {
        /// The container.
        parent: ObjectId,
        /// The widget that was looked up.
        child: ObjectId,
    },

    /// The widget is being dropped and can no longer be shared.
    #[error("widget {0} is no longer referenced")]
    Detached(ObjectId),

    /// Geometry values are inconsistent.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The children list could not grow.
    #[error("failed to grow the children list")]
    AllocationFailed,

    /// A bounded message queue is full.
    #[error("message queue is full")]
    QueueFull,
}

/// A specialized Result type for widget operations.
pub type GuiResult<T> = std::result::Result<T, GuiError>;
