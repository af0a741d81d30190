//! Static text control.

use std::sync::{Arc, Weak};

use tinygui_core::ObjectType;

use super::ControlBase;
use crate::error::GuiResult;
use crate::geometry::{Point, Rect};
use crate::toolkit::Toolkit;
use crate::widget::style::Style;
use crate::widget::{Widget, WidgetBase};

/// A label showing read-only text.
pub struct Label {
    control: ControlBase,
}

impl Label {
    /// Native class name of labels.
    pub const CLASS_NAME: &'static str = "STATIC";

    pub fn new(toolkit: &Toolkit, text: &str, rect: Rect) -> Arc<Label> {
        Arc::new_cyclic(|this: &Weak<Label>| Label {
            control: ControlBase::new(
                toolkit,
                this.clone(),
                ObjectType::Label,
                Self::CLASS_NAME,
                text,
                Style::NOTIFY,
                rect,
            ),
        })
    }
}

super::control_accessors!(Label);

impl Widget for Label {
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
