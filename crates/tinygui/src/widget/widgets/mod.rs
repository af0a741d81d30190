//! Built-in widgets.
//!
//! - [`Window`] - a top-level window
//! - [`Control`] - a plain container control
//! - [`Button`] - a push button
//! - [`TextBox`] - an edit box
//! - [`Label`] - static text
//!
//! All controls embed a [`ControlBase`], which adds an anchor mask and
//! position bounds to the shared widget state.

/// Implements [`Object`](tinygui_core::Object) for a control type with a
/// `control: ControlBase` field, plus its anchor and position-bound setters.
macro_rules! control_accessors {
    ($ty:ty) => {
        impl tinygui_core::Object for $ty {
            fn object_base(&self) -> &tinygui_core::ObjectBase {
                self.control.widget_base().object()
            }
        }

        impl $ty {
            /// Set the container edges this control follows on resize.
            pub fn set_anchor(&self, anchor: crate::widget::layout::AnchorMask) {
                self.control.set_anchor(anchor);
            }

            pub fn position_bounds(&self) -> crate::geometry::PositionBounds {
                self.control.position_bounds()
            }

            /// Replace the position bounds and re-clamp the current position.
            pub fn set_position_bounds(&self, bounds: crate::geometry::PositionBounds) -> crate::error::GuiResult<()> {
                self.control.set_position_bounds(bounds)
            }
        }
    };
}

pub(crate) use control_accessors;

mod button;
mod control;
mod label;
mod text_box;
mod window;

pub use button::Button;
pub use control::{Control, ControlBase};
pub use label::Label;
pub use text_box::TextBox;
pub use window::Window;

use tinygui_core::{EventContext, EventPayload, MessageId, SlotIndex, SyncMode};

use crate::error::GuiResult;
use crate::widget::Widget;

/// Register a callback that only fires while `widget` is enabled.
pub(crate) fn register_gated<W, F>(
    widget: &W,
    message: MessageId,
    callback: F,
    context: EventContext,
    mode: SyncMode,
) -> GuiResult<SlotIndex>
where
    W: Widget,
    F: Fn(&W, &EventContext, &EventPayload) + Send + Sync + 'static,
{
    let base = widget.widget_base();
    let _guard = base.lock();
    let slot = widget.on_event(message, callback, context, mode)?;
    base.events().set_condition(slot, Some(base.enabled_condition()))?;
    Ok(slot)
}
