//! Controls: widgets that live inside a container.
//!
//! [`ControlBase`] extends [`WidgetBase`] with an anchor mask and position
//! bounds. Every control type embeds one and overrides
//! [`Widget::move_to`] to clamp against the bounds. [`Control`] itself is a
//! plain container control, useful as a panel that groups other controls.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tinygui_core::ObjectType;

use crate::error::GuiResult;
use crate::geometry::{Point, PositionBounds, Rect};
use crate::toolkit::Toolkit;
use crate::widget::layout::AnchorMask;
use crate::widget::style::Style;
use crate::widget::{WeakWidgetRef, Widget, WidgetBase};

#[derive(Debug, Clone, Copy)]
struct ControlLayout {
    anchor: AnchorMask,
    bounds: PositionBounds,
}

/// Shared state of every control.
pub struct ControlBase {
    widget: WidgetBase,
    layout: Mutex<ControlLayout>,
}

impl ControlBase {
    /// Create a control base. The child and visible style bits are added,
    /// and the anchor starts at the toolkit's default.
    pub fn new(
        toolkit: &Toolkit,
        this: WeakWidgetRef,
        kind: ObjectType,
        class_name: impl Into<String>,
        text: &str,
        style: Style,
        rect: Rect,
    ) -> Self {
        Self {
            widget: WidgetBase::new(toolkit, this, kind, class_name, text, style | Style::CONTROL, rect),
            layout: Mutex::new(ControlLayout {
                anchor: toolkit.config().default_anchor,
                bounds: PositionBounds::UNBOUNDED,
            }),
        }
    }

    #[inline]
    pub fn widget_base(&self) -> &WidgetBase {
        &self.widget
    }

    pub fn anchor(&self) -> AnchorMask {
        self.layout.lock().anchor
    }

    /// Set the edges this control follows when its container is resized.
    pub fn set_anchor(&self, anchor: AnchorMask) {
        let _guard = self.widget.lock();
        self.layout.lock().anchor = anchor;
        tracing::trace!(target: "tinygui::layout", id = %self.widget.id(), ?anchor, "anchor changed");
    }

    pub fn position_bounds(&self) -> PositionBounds {
        self.layout.lock().bounds
    }

    /// Replace the position bounds and re-clamp the last requested position.
    pub fn set_position_bounds(&self, bounds: PositionBounds) -> GuiResult<()> {
        let _guard = self.widget.lock();
        self.layout.lock().bounds = bounds;
        self.move_to(self.widget.real_rect().origin)
    }

    /// Move, clamping the effective position into the position bounds.
    pub fn move_to(&self, pos: Point) -> GuiResult<()> {
        let _guard = self.widget.lock();
        let bounds = self.position_bounds();
        self.widget.set_position_model(pos, Some(&bounds))?;
        self.widget.apply_native_geometry()
    }
}

/// A container control.
pub struct Control {
    control: ControlBase,
}

impl Control {
    /// Class name of native container controls.
    pub const CLASS_NAME: &'static str = "TinyguiControl";

    pub fn new(toolkit: &Toolkit, rect: Rect) -> Arc<Control> {
        Arc::new_cyclic(|this: &Weak<Control>| Control {
            control: ControlBase::new(
                toolkit,
                this.clone(),
                ObjectType::Control,
                Self::CLASS_NAME,
                "",
                Style::NONE,
                rect,
            ),
        })
    }
}

super::control_accessors!(Control);

impl Widget for Control {
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
