//! Push button control.
//!
//! A click on a native button reaches its container as a command message;
//! the dispatcher forwards it to the button as a
//! [`CLICKED`](MessageId::CLICKED) notification.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use tinygui::{Button, EventContext, MessageId, Rect, SyncMode, Toolkit, WidgetRef, dispatch};
//!
//! let (toolkit, _backend) = Toolkit::headless().unwrap();
//! let ok = Button::new(&toolkit, "OK", Rect::new(10, 10, 80, 24));
//! let clicks = Arc::new(AtomicUsize::new(0));
//!
//! let counter = clicks.clone();
//! ok.set_on_click(
//!     move |_button, _ctx, _args| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     },
//!     EventContext::none(),
//!     SyncMode::Sync,
//! )
//! .unwrap();
//!
//! let sender: WidgetRef = ok.clone();
//! dispatch(&sender, MessageId::CLICKED, 0, 0).unwrap();
//! assert_eq!(clicks.load(Ordering::SeqCst), 1);
//! ```

use std::sync::{Arc, Weak};

use tinygui_core::{EventContext, EventPayload, MessageId, ObjectType, SlotIndex, SyncMode};

use super::{ControlBase, register_gated};
use crate::error::GuiResult;
use crate::geometry::{Point, Rect};
use crate::toolkit::Toolkit;
use crate::widget::style::Style;
use crate::widget::{Widget, WidgetBase};

/// A push button.
pub struct Button {
    control: ControlBase,
}

impl Button {
    /// Native class name of buttons.
    pub const CLASS_NAME: &'static str = "BUTTON";

    pub fn new(toolkit: &Toolkit, text: &str, rect: Rect) -> Arc<Button> {
        Arc::new_cyclic(|this: &Weak<Button>| Button {
            control: ControlBase::new(
                toolkit,
                this.clone(),
                ObjectType::Button,
                Self::CLASS_NAME,
                text,
                Style::TAB_STOP,
                rect,
            ),
        })
    }

    /// Register the click callback. It only fires while the button is
    /// enabled.
    pub fn set_on_click<F>(&self, callback: F, context: EventContext, mode: SyncMode) -> GuiResult<SlotIndex>
    where
        F: Fn(&Button, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        register_gated(self, MessageId::CLICKED, callback, context, mode)
    }
}

super::control_accessors!(Button);

impl Widget for Button {
    fn widget_base(&self) -> &WidgetBase {
        self.control.widget_base()
    }

    fn control_base(&self) -> Option<&ControlBase> {
        Some(&self.control)
    }

    fn move_to(&self, pos: Point) -> GuiResult<()> {
        self.control.move_to(pos)
    }
}
