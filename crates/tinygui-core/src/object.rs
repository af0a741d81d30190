//! Object identity and locking for tinyGUI.
//!
//! Every toolkit object (widgets, event payloads, pens, brushes) carries an
//! [`ObjectBase`]: a type tag from a closed set, a process-wide unique
//! [`ObjectId`] and a re-entrant lock owned for the object's whole lifetime.
//!
//! # Key Types
//!
//! - [`Object`] - Base trait that all toolkit objects implement
//! - [`ObjectBase`] - Helper struct for implementing [`Object`]
//! - [`ObjectType`] - Discriminator tag for the closed set of object kinds
//! - [`ObjectId`] - Monotonically increasing numeric identifier
//!
//! # Locking
//!
//! The lock returned by [`ObjectBase::lock`] is re-entrant, so code that
//! already holds an object's lock (for example a callback that bracketed
//! its work with [`ObjectBase::lock`]) may call back into that object's
//! mutators on the same thread without deadlocking.

use std::any::Any;
use std::fmt;

use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard};

/// Next identifier handed out by [`ObjectBase::new`].
static NEXT_OBJECT_ID: Mutex<u64> = Mutex::new(1);

/// A unique numeric identifier for a toolkit object.
///
/// Identifiers are assigned in creation order and are never reused within a
/// process. Widgets also use the identifier as their native control id and
/// as the basis of their native class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }

    /// Create an ObjectId from a raw u64 value.
    ///
    /// The id is not checked against live objects.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    fn next() -> Self {
        let mut next = NEXT_OBJECT_ID.lock();
        let id = *next;
        *next += 1;
        Self(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of object kinds known to the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// A plain object with no widget behaviour.
    Object,
    /// A generic widget.
    Widget,
    /// A top-level window.
    Window,
    /// An embeddable control.
    Control,
    /// A push button.
    Button,
    /// A single or multi line text box.
    TextBox,
    /// A static text label.
    Label,
    /// The payload of a non-pointer event.
    EventArgs,
    /// The payload of a pointer event.
    MouseEventArgs,
    /// A stroke description used while painting.
    Pen,
    /// A fill description used while painting.
    Brush,
}

impl ObjectType {
    /// Returns the type name used in logs and tree dumps.
    pub fn name(self) -> &'static str {
        match self {
            Self::Object => "Object",
            Self::Widget => "Widget",
            Self::Window => "Window",
            Self::Control => "Control",
            Self::Button => "Button",
            Self::TextBox => "TextBox",
            Self::Label => "Label",
            Self::EventArgs => "EventArgs",
            Self::MouseEventArgs => "MouseEventArgs",
            Self::Pen => "Pen",
            Self::Brush => "Brush",
        }
    }

    /// Whether objects of this kind take part in the widget tree.
    pub fn is_widget(self) -> bool {
        matches!(
            self,
            Self::Widget | Self::Window | Self::Control | Self::Button | Self::TextBox | Self::Label
        )
    }

    /// Whether objects of this kind are embeddable controls.
    pub fn is_control(self) -> bool {
        matches!(self, Self::Control | Self::Button | Self::TextBox | Self::Label)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Guard returned by [`ObjectBase::lock`].
pub type ObjectGuard<'a> = ReentrantMutexGuard<'a, ()>;

/// Base trait for every toolkit object.
pub trait Object: Any + Send + Sync {
    /// The shared identity and lock of this object.
    fn object_base(&self) -> &ObjectBase;

    /// Get this object's unique identifier.
    fn object_id(&self) -> ObjectId {
        self.object_base().id()
    }

    /// Get this object's type tag.
    fn object_type(&self) -> ObjectType {
        self.object_base().object_type()
    }
}

/// Helper for implementing the [`Object`] trait.
///
/// The lock is created together with the identifier, before any other
/// field of the owning object can be reached, and lives until the owner is
/// dropped.
pub struct ObjectBase {
    id: ObjectId,
    kind: ObjectType,
    lock: ReentrantMutex<()>,
}

impl ObjectBase {
    /// Create a new object base with a fresh identifier.
    pub fn new(kind: ObjectType) -> Self {
        let id = ObjectId::next();
        tracing::trace!(target: "tinygui_core::object", %id, kind = kind.name(), "object created");
        Self {
            id,
            kind,
            lock: ReentrantMutex::new(()),
        }
    }

    /// Get the object's unique identifier.
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the object's type tag.
    #[inline]
    pub fn object_type(&self) -> ObjectType {
        self.kind
    }

    /// Acquire the object's lock, blocking until it is available.
    ///
    /// The lock is re-entrant: a thread that already holds it acquires it
    /// again immediately.
    pub fn lock(&self) -> ObjectGuard<'_> {
        self.lock.lock()
    }

    /// Try to acquire the object's lock without blocking.
    pub fn try_lock(&self) -> Option<ObjectGuard<'_>> {
        self.lock.try_lock()
    }

    /// Whether any thread currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("locked", &self.lock.is_locked())
            .finish()
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        tracing::trace!(target: "tinygui_core::object", id = %self.id, kind = self.kind.name(), "object dropped");
    }
}

/// Safe downcast function for [`Object`] trait objects.
///
/// Returns `Some(&T)` if the object is of type `T`, otherwise `None`.
pub fn object_cast<T: Object>(obj: &dyn Object) -> Option<&T> {
    (obj as &dyn Any).downcast_ref::<T>()
}

static_assertions::assert_impl_all!(ObjectBase: Send, Sync);
