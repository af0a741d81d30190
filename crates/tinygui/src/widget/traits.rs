//! Core widget trait definitions.
//!
//! This module defines the [`Widget`] trait which every window and control
//! implements. The trait has one required method, [`Widget::widget_base`];
//! everything else has a default built on [`WidgetBase`] that specialized
//! widgets override where they behave differently. Controls clamp moves
//! against their position bounds, windows track a client area that differs
//! from their outer size, text boxes refresh their text before a change
//! notification is delivered.
//!
//! # Key Types
//!
//! - [`Widget`] - Base trait for all widgets
//! - [`WidgetRef`] / [`WeakWidgetRef`] - Shared handles to widgets
//! - [`widget_cast`] - Downcast from `dyn Widget` to a concrete widget

use std::any::Any;
use std::sync::{Arc, Weak};

use tinygui_core::{EventContext, EventPayload, MessageId, Object, SlotIndex, SyncMode};

use super::base::WidgetBase;
use super::layout::{AnchorMask, propagate_resize};
use super::painting::{Brush, DrawCommand, Pen};
use super::widgets::ControlBase;
use crate::error::{GuiError, GuiResult};
use crate::geometry::{Point, Rect, Size};

/// A shared reference to a widget.
pub type WidgetRef = Arc<dyn Widget>;

/// A non-owning reference to a widget.
pub type WeakWidgetRef = Weak<dyn Widget>;

/// Base trait for all widgets.
///
/// # Implementing Widget
///
/// ```ignore
/// struct Tile {
///     control: ControlBase,
///     value: Mutex<u32>,
/// }
///
/// impl Object for Tile {
///     fn object_base(&self) -> &ObjectBase {
///         self.control.widget_base().object()
///     }
/// }
///
/// impl Widget for Tile {
///     fn widget_base(&self) -> &WidgetBase {
///         self.control.widget_base()
///     }
///
///     fn control_base(&self) -> Option<&ControlBase> {
///         Some(&self.control)
///     }
///
///     fn move_to(&self, pos: Point) -> GuiResult<()> {
///         self.control.move_to(pos)
///     }
/// }
/// ```
pub trait Widget: Object {
    /// The shared widget state.
    fn widget_base(&self) -> &WidgetBase;

    /// The control state, for widgets embedded in a container.
    fn control_base(&self) -> Option<&ControlBase> {
        None
    }

    /// Edges of the container this widget follows on resize.
    fn anchor(&self) -> AnchorMask {
        self.control_base().map(ControlBase::anchor).unwrap_or_default()
    }

    /// Size of the area children are laid out in.
    fn client_size(&self) -> Size {
        self.widget_base().client_size()
    }

    // =========================================================================
    // Overridable operations
    // =========================================================================

    /// Move the widget. The base implementation does not clamp.
    fn move_to(&self, pos: Point) -> GuiResult<()> {
        let base = self.widget_base();
        let _guard = base.lock();
        base.set_position_model(pos, None)?;
        base.apply_native_geometry()
    }

    /// Resize the widget and relay out its children by the change of its
    /// effective size.
    fn resize(&self, size: Size) -> GuiResult<()> {
        let base = self.widget_base();
        let (delta, applied) = {
            let _guard = base.lock();
            let delta = base.set_size_model(size)?;
            (delta, base.apply_native_geometry())
        };
        let relaid = propagate_resize(base, delta);
        applied.and(relaid)
    }

    /// Move and resize in one step.
    fn set_geometry(&self, rect: Rect) -> GuiResult<()> {
        let moved = self.move_to(rect.origin);
        let resized = self.resize(rect.size);
        moved.and(resized)
    }

    /// Replace the size bounds; the effective size is re-clamped from the
    /// last requested size.
    fn set_bounds(&self, min: Size, max: Size) -> GuiResult<()> {
        let base = self.widget_base();
        let (delta, applied) = {
            let _guard = base.lock();
            let delta = base.set_size_bounds_model(min, max)?;
            (delta, base.apply_native_geometry())
        };
        let relaid = propagate_resize(base, delta);
        applied.and(relaid)
    }

    fn set_enabled(&self, enabled: bool) -> GuiResult<()> {
        self.widget_base().set_enabled(enabled)
    }

    fn set_text(&self, text: &str) -> GuiResult<()> {
        self.widget_base().set_text(text)
    }

    /// Tear down the widget and its subtree.
    fn destroy(&self) -> GuiResult<()> {
        self.widget_base().destroy()
    }

    /// Runs before the event table sees a message.
    fn prepare_message(&self, _message: MessageId, _param1: usize, _param2: isize) -> GuiResult<()> {
        Ok(())
    }

    /// Widget-specific default handling, run unless the fired slot
    /// interrupts.
    fn on_message(&self, _message: MessageId, _param1: usize, _param2: isize) -> GuiResult<()> {
        Ok(())
    }

    // =========================================================================
    // Convenience accessors
    // =========================================================================

    fn position(&self) -> Point {
        self.widget_base().position()
    }

    fn size(&self) -> Size {
        self.widget_base().size()
    }

    fn rect(&self) -> Rect {
        self.widget_base().rect()
    }

    fn text(&self) -> String {
        self.widget_base().text()
    }

    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    fn parent(&self) -> Option<WidgetRef> {
        self.widget_base().parent()
    }

    fn children(&self) -> Vec<WidgetRef> {
        self.widget_base().children()
    }

    fn add_child(&self, child: WidgetRef) -> GuiResult<()> {
        self.widget_base().add_child(child)
    }

    fn remove_child(&self, child: &WidgetRef) -> GuiResult<()> {
        self.widget_base().remove_child(child)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register a callback for `message` that receives the concrete widget.
    fn on_event<F>(&self, message: MessageId, callback: F, context: EventContext, mode: SyncMode) -> GuiResult<SlotIndex>
    where
        Self: Sized,
        F: Fn(&Self, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        let base = self.widget_base();
        let _guard = base.lock();
        if base.is_destroyed() {
            return Err(GuiError::Destroyed(base.id()));
        }
        Ok(base.events().register(message, typed_callback(callback), context, mode)?)
    }

    fn set_on_paint<F>(&self, callback: F, context: EventContext, mode: SyncMode) -> GuiResult<SlotIndex>
    where
        Self: Sized,
        F: Fn(&Self, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        self.on_event(MessageId::PAINT, callback, context, mode)
    }

    /// Register a close callback. Interrupt the returned slot to keep the
    /// widget alive when the user closes it.
    fn set_on_close<F>(&self, callback: F, context: EventContext, mode: SyncMode) -> GuiResult<SlotIndex>
    where
        Self: Sized,
        F: Fn(&Self, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        self.on_event(MessageId::CLOSE, callback, context, mode)
    }

    fn set_on_key_down<F>(&self, callback: F, context: EventContext, mode: SyncMode) -> GuiResult<SlotIndex>
    where
        Self: Sized,
        F: Fn(&Self, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        self.on_event(MessageId::KEY_DOWN, callback, context, mode)
    }

    fn set_on_mouse_move<F>(&self, callback: F, context: EventContext, mode: SyncMode) -> GuiResult<SlotIndex>
    where
        Self: Sized,
        F: Fn(&Self, &EventContext, &EventPayload) + Send + Sync + 'static,
    {
        self.on_event(MessageId::MOUSE_MOVE, callback, context, mode)
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    fn draw_line(&self, from: Point, to: Point, pen: &Pen) -> GuiResult<()> {
        self.widget_base().draw(DrawCommand::Line {
            from,
            to,
            stroke: pen.stroke(),
        })
    }

    fn draw_rect(&self, rect: Rect, pen: Option<&Pen>, brush: Option<&Brush>) -> GuiResult<()> {
        self.widget_base().draw(DrawCommand::Rect {
            rect,
            stroke: pen.map(Pen::stroke),
            fill: brush.map(Brush::fill),
        })
    }

    fn fill_rect(&self, rect: Rect, brush: &Brush) -> GuiResult<()> {
        self.draw_rect(rect, None, Some(brush))
    }

    fn draw_ellipse(&self, rect: Rect, pen: Option<&Pen>, brush: Option<&Brush>) -> GuiResult<()> {
        self.widget_base().draw(DrawCommand::Ellipse {
            rect,
            stroke: pen.map(Pen::stroke),
            fill: brush.map(Brush::fill),
        })
    }

    fn draw_polygon(&self, points: &[Point], pen: Option<&Pen>, brush: Option<&Brush>) -> GuiResult<()> {
        self.widget_base().draw(DrawCommand::Polygon {
            points: points.to_vec(),
            stroke: pen.map(Pen::stroke),
            fill: brush.map(Brush::fill),
        })
    }
}

/// Safe downcast from a widget trait object.
pub fn widget_cast<W: Widget>(widget: &dyn Widget) -> Option<&W> {
    (widget as &dyn Any).downcast_ref::<W>()
}

/// Adapt a callback taking `&W` to one taking the table's sender.
///
/// The sender of a widget's own table is always that widget, so the cast
/// only fails if a callback is registered on a foreign table.
pub(crate) fn typed_callback<W, F>(
    callback: F,
) -> impl Fn(&WidgetRef, &EventContext, &EventPayload) + Send + Sync + 'static
where
    W: Widget,
    F: Fn(&W, &EventContext, &EventPayload) + Send + Sync + 'static,
{
    move |sender: &WidgetRef, context: &EventContext, payload: &EventPayload| {
        match widget_cast::<W>(sender.as_ref()) {
            Some(widget) => callback(widget, context, payload),
            None => tracing::warn!(
                target: "tinygui::dispatch",
                sender = %sender.widget_base().id(),
                "callback sender has an unexpected type"
            ),
        }
    }
}
