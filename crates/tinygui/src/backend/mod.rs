//! The boundary between widgets and the native windowing layer.
//!
//! Widgets never talk to a platform directly. They describe native
//! resources with a [`NativeSpec`] and push later changes through a
//! [`Backend`]. Every call can fail; widgets report such failures to their
//! caller but keep the in-memory change they already made.
//!
//! Messages flow the other way through the toolkit's message queue (see
//! [`crate::Toolkit::post`]).

mod headless;

pub use headless::{BackendCall, HeadlessBackend, NativeRecord};

use std::fmt;

use thiserror::Error;
use tinygui_core::{ObjectId, ObjectType};

use crate::geometry::{Rect, Size};
use crate::widget::painting::DrawCommand;
use crate::widget::style::Style;

/// Opaque identifier of a native resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(u64);

impl NativeHandle {
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }

    /// Encode the handle in a message parameter.
    #[inline]
    pub fn to_param(self) -> isize {
        self.0 as isize
    }

    /// Decode a handle from a message parameter.
    #[inline]
    pub fn from_param(param: isize) -> Self {
        Self(param as u64)
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Everything needed to create the native resource behind a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeSpec {
    pub kind: ObjectType,
    pub class_name: String,
    pub text: String,
    pub style: Style,
    pub rect: Rect,
    pub enabled: bool,
    pub parent: Option<NativeHandle>,
    /// Numeric id; notifications from the control carry it.
    pub control_id: ObjectId,
}

/// Names a backend operation, for error reports and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOp {
    Create,
    Destroy,
    ApplyGeometry,
    ApplyStyle,
    ApplyText,
    ApplyEnabled,
    Repaint,
    ClientSize,
    WindowRect,
    ReadText,
    BeginPaint,
    EndPaint,
    Draw,
}

/// Errors reported by a [`Backend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The handle does not name a live native resource.
    #[error("native handle {0} does not exist")]
    NoSuchHandle(NativeHandle),

    /// The platform refused the call.
    #[error("{op:?} was rejected: {reason}")]
    Rejected {
        /// The operation that failed.
        op: BackendOp,
        /// Platform-specific reason.
        reason: String,
    },

    /// A paint call was made without an open paint session.
    #[error("no paint session is open on {0}")]
    NotPainting(NativeHandle),
}

/// Outbound calls from widgets to the native windowing layer.
pub trait Backend: Send + Sync {
    /// Create a native resource.
    fn create(&self, spec: &NativeSpec) -> Result<NativeHandle, BackendError>;

    /// Destroy a native resource and every native child it owns.
    fn destroy(&self, handle: NativeHandle) -> Result<(), BackendError>;

    /// Move and resize.
    fn apply_geometry(&self, handle: NativeHandle, rect: Rect) -> Result<(), BackendError>;

    fn apply_style(&self, handle: NativeHandle, style: Style) -> Result<(), BackendError>;

    fn apply_text(&self, handle: NativeHandle, text: &str) -> Result<(), BackendError>;

    fn apply_enabled(&self, handle: NativeHandle, enabled: bool) -> Result<(), BackendError>;

    /// Ask for a paint message to be delivered later.
    fn request_repaint(&self, handle: NativeHandle) -> Result<(), BackendError>;

    /// Size of the area inside the frame.
    fn client_size(&self, handle: NativeHandle) -> Result<Size, BackendError>;

    /// Outer rectangle as the platform currently sees it.
    fn window_rect(&self, handle: NativeHandle) -> Result<Rect, BackendError>;

    /// Current native text, which the user may have edited.
    fn read_text(&self, handle: NativeHandle) -> Result<String, BackendError>;

    fn begin_paint(&self, handle: NativeHandle) -> Result<(), BackendError>;

    fn end_paint(&self, handle: NativeHandle) -> Result<(), BackendError>;

    fn draw(&self, handle: NativeHandle, command: &DrawCommand) -> Result<(), BackendError>;
}
