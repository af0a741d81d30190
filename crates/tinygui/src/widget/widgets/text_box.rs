//! Editable text control.

use std::sync::{Arc, Weak};

use tinygui_core::{EventContext, EventPayload, MessageId, ObjectType, SlotIndex, SyncMode};

use super::{ControlBase, register_gated};
use crate::error::GuiResult;
use crate::geometry::{Point, Rect};
use crate::toolkit::Toolkit;
use crate::widget::style::Style;
use crate::widget::{Widget, WidgetBase};

/// A single or multi-line edit box.
///
/// The user edits the native text directly. Before a
/// [`TEXT_CHANGED`](MessageId::TEXT_CHANGED) notification reaches the
/// callbacks, the model text is refreshed from the native side, so
/// [`Widget::text`] inside a text-changed callback returns what the user
/// typed.
pub struct TextBox {
    control: ControlBase,
    multiline: bool,
}

impl TextBox {
    /// Native class name of edit boxes.
    pub const CLASS_NAME: &'static str = "EDIT";

    pub fn new(toolkit: &Toolkit, text: &str, rect: Rect, multiline: bool) -> Arc<TextBox> {
        let style = if multiline {
            Style::MULTILINE | Style::AUTO_VSCROLL
        } else {
            Style::AUTO_HSCROLL
        };
        Arc::new_cyclic(|this: &Weak<TextBox>| TextBox {
            control: ControlBase::new(
                toolkit,
                this.clone(),
                ObjectType::TextBox,
                Self::CLASS_NAME,
                text,
                style | Style::BORDER | Style::TAB_STOP,
                rect,
            ),
            multiline,
        })
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn is_number_only(&self) -> bool {
        self.widget_base().style().has(Style::NUMBER)
    }

    /// Restrict input to digits.
    pub fn set_number_only(&self, number_only: bool) -> GuiResult<()> {
        let base = self.widget_base();
        let _guard = base.lock();
        base.set_style(base.style().with(Style::NUMBER, number_only))
    }

    pub fn set_on_text_changed<F>(&self, callback: F, context: EventContext, mode: SyncMode) -> GuiResult<SlotIndex>
    where
        F: Fn(&TextBox, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        self.on_event(MessageId::TEXT_CHANGED, callback, context, mode)
    }

    /// Register a callback for left clicks on the box. Like a button click
    /// it only fires while the box is enabled.
    pub fn set_on_click<F>(&self, callback: F, context: EventContext, mode: SyncMode) -> GuiResult<SlotIndex>
    where
        F: Fn(&TextBox, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        register_gated(self, MessageId::LBUTTON_UP, callback, context, mode)
    }
}

super::control_accessors!(TextBox);

impl Widget for TextBox {
    fn widget_base(&self) -> &WidgetBase {
        self.control.widget_base()
    }

    fn control_base(&self) -> Option<&ControlBase> {
        Some(&self.control)
    }

    fn move_to(&self, pos: Point) -> GuiResult<()> {
        self.control.move_to(pos)
    }

    fn prepare_message(&self, message: MessageId, _param1: usize, _param2: isize) -> GuiResult<()> {
        if message == MessageId::TEXT_CHANGED {
            self.widget_base().refresh_text()?;
        }
        Ok(())
    }
}
