//! Message dispatch and default handling for widgets.
//!
//! # Message Flow
//!
//! When a message is dispatched to a widget, the following steps occur:
//!
//! 1. **Paint session**: for [`PAINT`](MessageId::PAINT) a paint session is
//!    opened so callbacks can draw.
//!
//! 2. **Preparation**: [`Widget::prepare_message`] runs. A text box refreshes
//!    its text here before a text-changed notification.
//!
//! 3. **Event table**: the slot registered for the message fires, inline or
//!    on a worker depending on its mode.
//!
//! 4. **Default handling**: unless the slot that fired is interrupting,
//!    [`Widget::on_message`] runs, followed by the toolkit's own defaults:
//!    - [`CLOSE`](MessageId::CLOSE) dispatches [`DESTROY`](MessageId::DESTROY);
//!    - `DESTROY` tears the widget down and, for a top-level window, posts
//!      quit to the message loop;
//!    - [`COMMAND`](MessageId::COMMAND) is forwarded to the child control
//!      named by `param2` as the notification in the high word of `param1`.
//!
//! 5. **Paint session end**: the session opened in step 1 is closed, even if
//!    a later step failed.

use tinygui_core::{FiredEvent, MessageId, ObjectType};

use super::WidgetRef;
use crate::backend::NativeHandle;
use crate::error::{GuiError, GuiResult};

/// What happened during a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The slot that fired, if any matched and was allowed to fire.
    pub fired: Option<FiredEvent>,
    /// Whether default handling ran.
    pub default_ran: bool,
}

impl DispatchOutcome {
    /// Whether a callback was started.
    pub fn was_handled(&self) -> bool {
        self.fired.is_some()
    }
}

/// Dispatch a message to `widget`.
///
/// Fails with [`GuiError::Destroyed`] if the widget was torn down; errors
/// from default handling are returned after the paint session is closed.
pub fn dispatch(widget: &WidgetRef, message: MessageId, param1: usize, param2: isize) -> GuiResult<DispatchOutcome> {
    let base = widget.widget_base();
    if base.is_destroyed() {
        return Err(GuiError::Destroyed(base.id()));
    }

    tracing::trace!(target: "tinygui::dispatch", id = %base.id(), %message, param1, param2, "dispatch");

    if message != MessageId::PAINT {
        return run(widget, message, param1, param2);
    }

    base.begin_paint()?;
    let outcome = run(widget, message, param1, param2);
    // The widget may have been destroyed by a paint callback.
    let ended = if base.is_destroyed() { Ok(()) } else { base.end_paint() };
    let outcome = outcome?;
    ended.map(|()| outcome)
}

fn run(widget: &WidgetRef, message: MessageId, param1: usize, param2: isize) -> GuiResult<DispatchOutcome> {
    widget.prepare_message(message, param1, param2)?;

    let fired = widget.widget_base().events().dispatch(widget, message, param1, param2);
    if fired.is_some_and(|fired| fired.interrupt) {
        tracing::trace!(target: "tinygui::dispatch", id = %widget.widget_base().id(), %message, "default handling interrupted");
        return Ok(DispatchOutcome {
            fired,
            default_ran: false,
        });
    }

    default_handling(widget, message, param1, param2)?;
    Ok(DispatchOutcome {
        fired,
        default_ran: true,
    })
}

fn default_handling(widget: &WidgetRef, message: MessageId, param1: usize, param2: isize) -> GuiResult<()> {
    // A callback may have destroyed the widget already.
    if widget.widget_base().is_destroyed() {
        return Ok(());
    }

    widget.on_message(message, param1, param2)?;

    match message {
        MessageId::CLOSE => dispatch(widget, MessageId::DESTROY, 0, 0).map(|_| ()),
        MessageId::DESTROY => {
            let base = widget.widget_base();
            let top_level = base.object_type() == ObjectType::Window && base.parent().is_none();
            widget.destroy()?;
            if top_level {
                base.toolkit().post_quit(0)?;
            }
            Ok(())
        }
        MessageId::COMMAND => route_command(widget, param1, param2),
        _ => Ok(()),
    }
}

/// Forward a command from a child control to that control as a
/// notification message.
fn route_command(widget: &WidgetRef, param1: usize, param2: isize) -> GuiResult<()> {
    let code = ((param1 >> 16) & 0xFFFF) as u16;
    let handle = NativeHandle::from_param(param2);
    let toolkit = widget.widget_base().toolkit();

    match toolkit.widget_for(handle) {
        Some(target) => dispatch(&target, MessageId::notification(code), param1, param2).map(|_| ()),
        None => {
            tracing::trace!(target: "tinygui::dispatch", %handle, code, "command for an unknown control dropped");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Button, Widget, Window};
    use crate::geometry::Rect;
    use crate::toolkit::Toolkit;
    use std::sync::Arc;
    use tinygui_core::{EventContext, SyncMode};

    fn setup() -> (Toolkit, Arc<Window>) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let (toolkit, _backend) = Toolkit::headless().unwrap();
        let window = Window::new(&toolkit, "test", Rect::new(0, 0, 100, 100));
        (toolkit, window)
    }

    #[test]
    fn test_unhandled_message_runs_default_only() {
        let (_toolkit, window) = setup();
        let sender: WidgetRef = window.clone();
        let outcome = dispatch(&sender, MessageId::KEY_DOWN, 0, 0).unwrap();
        assert!(!outcome.was_handled());
        assert!(outcome.default_ran);
    }

    #[test]
    fn test_destroyed_widget_is_rejected() {
        let (_toolkit, window) = setup();
        window.destroy().unwrap();
        let sender: WidgetRef = window.clone();
        assert!(matches!(
            dispatch(&sender, MessageId::PAINT, 0, 0),
            Err(GuiError::Destroyed(id)) if id == window.widget_base().id()
        ));
    }

    #[test]
    fn test_close_destroys_and_posts_quit() {
        let (toolkit, window) = setup();
        let sender: WidgetRef = window.clone();
        dispatch(&sender, MessageId::CLOSE, 0, 0).unwrap();
        assert!(window.widget_base().is_destroyed());
        assert_eq!(toolkit.pending(), 1);
    }

    #[test]
    fn test_interrupted_close_keeps_window() {
        let (toolkit, window) = setup();
        let slot = window
            .set_on_close(|_, _, _| {}, EventContext::none(), SyncMode::Sync)
            .unwrap();
        window.widget_base().events().set_interrupt(slot, true).unwrap();

        let sender: WidgetRef = window.clone();
        let outcome = dispatch(&sender, MessageId::CLOSE, 0, 0).unwrap();
        assert!(outcome.was_handled());
        assert!(!outcome.default_ran);
        assert!(!window.widget_base().is_destroyed());
        assert_eq!(toolkit.pending(), 0);
    }

    #[test]
    fn test_destroying_a_child_does_not_quit() {
        let (toolkit, window) = setup();
        let button = Button::new(&toolkit, "x", Rect::new(0, 0, 10, 10));
        window.add_child(button.clone()).unwrap();

        let sender: WidgetRef = button.clone();
        dispatch(&sender, MessageId::DESTROY, 0, 0).unwrap();
        assert!(button.widget_base().is_destroyed());
        assert_eq!(window.widget_base().child_count(), 0);
        assert_eq!(toolkit.pending(), 0);
    }
}
