//! Top-level windows.
//!
//! A window is the root of a widget tree. Unlike controls it tracks a client
//! area separately from its outer size: children are laid out in the client
//! area, and it is the client size delta that drives anchor relayout.
//!
//! # Example
//!
//! ```
//! use tinygui::{AnchorMask, Button, Rect, Size, Toolkit, Widget, Window};
//!
//! let (toolkit, _backend) = Toolkit::headless().unwrap();
//! let window = Window::new(&toolkit, "Quiz", Rect::new(0, 0, 200, 100));
//! let next = Button::new(&toolkit, "Next", Rect::new(120, 70, 70, 20));
//! next.set_anchor(AnchorMask::RIGHT | AnchorMask::BOTTOM);
//! window.add_child(next.clone()).unwrap();
//!
//! window.resize(Size::new(300, 150)).unwrap();
//! assert_eq!(next.rect(), Rect::new(220, 120, 70, 20));
//! ```

use std::sync::{Arc, Weak};

use tinygui_core::logging::span_names;
use tinygui_core::{
    EventContext, EventPayload, MessageId, Object, ObjectBase, ObjectType, PerfSpan, SlotIndex, SyncMode, high_word,
    low_word,
};

use super::register_gated;
use crate::backend::NativeHandle;
use crate::error::GuiResult;
use crate::geometry::{Rect, Size};
use crate::toolkit::Toolkit;
use crate::widget::layout::propagate_resize;
use crate::widget::style::Style;
use crate::widget::{Widget, WidgetBase};

/// A top-level window.
pub struct Window {
    base: WidgetBase,
}

impl Window {
    /// Native class name of windows.
    pub const CLASS_NAME: &'static str = "TinyguiWindow";

    /// Create a resizable, maximizable window. Nothing is shown until
    /// [`show`](Self::show).
    pub fn new(toolkit: &Toolkit, title: &str, rect: Rect) -> Arc<Window> {
        Arc::new_cyclic(|this: &Weak<Window>| Window {
            base: WidgetBase::new(
                toolkit,
                this.clone(),
                ObjectType::Window,
                Self::CLASS_NAME,
                title,
                Style::OVERLAPPED_WINDOW,
                rect,
            ),
        })
    }

    /// Create the native window and every native child in slot order, then
    /// record the client size the platform reports.
    pub fn show(&self) -> GuiResult<NativeHandle> {
        let _span = PerfSpan::new(span_names::SHOW);
        let handle = self.base.realize(None)?;
        if let Some(client) = self.base.native_client_size()? {
            self.base.set_client_size(client)?;
        }
        tracing::debug!(target: "tinygui::lifecycle", id = %self.object_id(), %handle, client = %self.client_size(), "window shown");
        Ok(handle)
    }

    pub fn is_resizable(&self) -> bool {
        self.base.style().has(Style::THICK_FRAME)
    }

    /// Allow or forbid resizing by the user.
    pub fn set_resizable(&self, resizable: bool) -> GuiResult<()> {
        let _guard = self.base.lock();
        self.base.set_style(self.base.style().with(Style::THICK_FRAME, resizable))
    }

    pub fn is_maximizable(&self) -> bool {
        self.base.style().has(Style::MAXIMIZE_BOX)
    }

    pub fn set_maximizable(&self, maximizable: bool) -> GuiResult<()> {
        let _guard = self.base.lock();
        self.base.set_style(self.base.style().with(Style::MAXIMIZE_BOX, maximizable))
    }

    /// Register a callback for a left click in the client area. It only
    /// fires while the window is enabled.
    pub fn set_on_click<F>(&self, callback: F, context: EventContext, mode: SyncMode) -> GuiResult<SlotIndex>
    where
        F: Fn(&Window, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        register_gated(self, MessageId::LBUTTON_UP, callback, context, mode)
    }

    /// Change the outer frame through `update`, then relay out by the client
    /// delta. Without a native window the client area follows the outer size,
    /// measured from the client size held before the update.
    fn reframe(&self, update: impl FnOnce(&WidgetBase) -> GuiResult<()>) -> GuiResult<()> {
        let (client, applied) = {
            let _guard = self.base.lock();
            let previous = self.base.client_size();
            update(&self.base)?;
            let applied = self.base.apply_native_geometry();
            let client = match self.base.native_client_size()? {
                Some(client) => client,
                None => {
                    self.base.set_client_size(previous)?;
                    self.base.size()
                }
            };
            (client, applied)
        };
        let relaid = self.update_client(client);
        applied.and(relaid)
    }

    fn update_client(&self, client: Size) -> GuiResult<()> {
        let delta = self.base.set_client_size(client)?;
        propagate_resize(&self.base, delta)
    }
}

impl Object for Window {
    fn object_base(&self) -> &ObjectBase {
        self.base.object()
    }
}

impl Widget for Window {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    /// Resize the outer frame and relay out children by the change of the
    /// client area.
    fn resize(&self, size: Size) -> GuiResult<()> {
        self.reframe(|base| base.set_size_model(size).map(drop))
    }

    fn set_bounds(&self, min: Size, max: Size) -> GuiResult<()> {
        self.reframe(|base| base.set_size_bounds_model(min, max).map(drop))
    }

    fn on_message(&self, message: MessageId, _param1: usize, param2: isize) -> GuiResult<()> {
        match message {
            MessageId::SIZE => {
                let client = Size::new(i32::from(low_word(param2) as u16), i32::from(high_word(param2) as u16));
                self.update_client(client)
            }
            MessageId::WINDOW_POS_CHANGED => {
                let (rect, client) = {
                    let _guard = self.base.lock();
                    (self.base.native_window_rect()?, self.base.native_client_size()?)
                };
                if let Some(rect) = rect {
                    self.base.adopt_rect(rect)?;
                }
                match client {
                    Some(client) => self.update_client(client),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}
