//! tinyGUI - a small retained-mode widget toolkit.
//!
//! Windows and controls form a tree of shared widgets. Each widget owns an
//! event table that maps native messages to callbacks, run inline on the
//! dispatch thread or on a worker. When a container's client area changes,
//! its children follow their anchor masks: stretching, shifting, staying put
//! or re-centering.
//!
//! The native side sits behind the [`Backend`] trait. [`HeadlessBackend`]
//! implements it in memory and can also stand in for the user.
//!
//! # Example
//!
//! ```
//! use tinygui::{AnchorMask, Button, EventContext, MessageLoop, Rect, Size, SyncMode, Toolkit, Widget, Window};
//!
//! let (toolkit, backend) = Toolkit::headless().unwrap();
//! let window = Window::new(&toolkit, "Quiz", Rect::new(0, 0, 200, 100));
//! let next = Button::new(&toolkit, "Next", Rect::new(120, 70, 70, 20));
//! next.set_anchor(AnchorMask::RIGHT | AnchorMask::BOTTOM);
//! window.add_child(next.clone()).unwrap();
//!
//! let window_handle = window.show().unwrap();
//! let remote = toolkit.clone();
//! next.set_on_click(move |_, _, _| { let _ = remote.post_quit(7); }, EventContext::none(), SyncMode::Sync)
//!     .unwrap();
//!
//! backend.user_resize(&toolkit, window_handle, Size::new(300, 150)).unwrap();
//! let button_handle = next.widget_base().native_handle().unwrap();
//! backend.user_click(&toolkit, button_handle, next.position()).unwrap();
//!
//! assert_eq!(MessageLoop::new(&toolkit).run(), 7);
//! assert_eq!(next.rect(), Rect::new(220, 120, 70, 20));
//! ```

pub mod backend;
pub mod error;
pub mod geometry;
pub mod message_loop;
pub mod prelude;
pub mod toolkit;
pub mod widget;

pub use tinygui_core::{
    AsyncExecutor, AsyncPolicy, Condition, CoreError, DispatchThread, EventArgs, EventContext, EventError,
    EventPayload, ExecutorConfig, FiredEvent, MessageCategory, MessageId, MouseEventArgs, Object, ObjectBase,
    ObjectId, ObjectType, SlotIndex, SyncMode, high_word, low_word, make_param,
};

pub use backend::{Backend, BackendCall, BackendError, BackendOp, HeadlessBackend, NativeHandle, NativeRecord, NativeSpec};
pub use error::{GuiError, GuiResult};
pub use geometry::{Geometry, Point, PositionBounds, Rect, Size, SizeDelta};
pub use message_loop::{LoopMessage, MessageLoop, PumpStatus};
pub use toolkit::{Toolkit, ToolkitBuilder, ToolkitConfig};
pub use widget::{
    AnchorMask, Brush, Button, Color, Control, ControlBase, DispatchOutcome, DrawCommand, Label, Pen, PenStyle,
    Style, TextBox, TreeStyle, WeakWidgetRef, Widget, WidgetBase, WidgetRef, WidgetTreeDebug, Window, dispatch,
    widget_cast,
};
