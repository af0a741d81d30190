//! Widget system for tinyGUI.
//!
//! This module provides the widget architecture:
//!
//! - [`Widget`] trait: the base trait for windows and controls
//! - [`WidgetBase`]: the state every widget shares
//! - [`dispatch`]: delivery of a native message to a widget, followed by
//!   default handling
//! - [`layout`]: anchor-based relayout of children on resize
//! - [`painting`]: pens, brushes and draw commands
//!
//! # Overview
//!
//! Each widget implements the [`Widget`] trait and embeds a [`WidgetBase`],
//! either directly (windows) or through a [`ControlBase`] (controls). The
//! trait's default methods are written against the base; specialized widgets
//! override the ones they change. A [`Control`] clamps moves against its
//! position bounds, a [`Window`] tracks a client area.
//!
//! Widgets are always shared: constructors return an `Arc`, and containers
//! hold their children as [`WidgetRef`]s.
//!
//! ```
//! use tinygui::{Button, Label, Rect, Toolkit, Widget, Window};
//!
//! let (toolkit, _backend) = Toolkit::headless().unwrap();
//! let window = Window::new(&toolkit, "Quiz", Rect::new(0, 0, 240, 120));
//! let question = Label::new(&toolkit, "What is 6 x 7?", Rect::new(10, 10, 200, 20));
//! let answer = Button::new(&toolkit, "Answer", Rect::new(10, 40, 80, 24));
//!
//! window.add_child(question.clone()).unwrap();
//! window.add_child(answer.clone()).unwrap();
//! assert_eq!(window.children().len(), 2);
//!
//! let handle = window.show().unwrap();
//! assert!(answer.widget_base().is_displayed());
//! assert_eq!(toolkit.widget_for(handle).map(|w| w.widget_base().id()), Some(window.widget_base().id()));
//! ```
//!
//! # Events
//!
//! Each widget owns an [`EventTable`](tinygui_core::EventTable) keyed by
//! message id. Typed helpers such as [`Button::set_on_click`] register a
//! callback that receives the concrete widget:
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use tinygui::{Button, EventContext, MessageId, Rect, SyncMode, Toolkit, Widget, WidgetRef, dispatch};
//!
//! let (toolkit, _backend) = Toolkit::headless().unwrap();
//! let button = Button::new(&toolkit, "Next", Rect::new(0, 0, 60, 20));
//! let clicks = Arc::new(AtomicUsize::new(0));
//!
//! let counter = clicks.clone();
//! button
//!     .set_on_click(move |_, _, _| { counter.fetch_add(1, Ordering::SeqCst); }, EventContext::none(), SyncMode::Sync)
//!     .unwrap();
//!
//! let sender: WidgetRef = button.clone();
//! dispatch(&sender, MessageId::CLICKED, 0, 0).unwrap();
//!
//! // Disabled buttons do not fire.
//! button.set_enabled(false).unwrap();
//! dispatch(&sender, MessageId::CLICKED, 0, 0).unwrap();
//! assert_eq!(clicks.load(Ordering::SeqCst), 1);
//! ```

mod base;
mod debug;
mod dispatcher;
pub mod layout;
pub mod painting;
pub mod style;
mod traits;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use base::WidgetBase;
pub use debug::{TreeStyle, WidgetTreeDebug};
pub use dispatcher::{DispatchOutcome, dispatch};
pub use layout::AnchorMask;
pub use painting::{Brush, Color, DrawCommand, Fill, Pen, PenStyle, Stroke};
pub use style::Style;
pub use traits::{WeakWidgetRef, Widget, WidgetRef, widget_cast};

// Re-export widgets for convenience
pub use widgets::{Button, Control, ControlBase, Label, TextBox, Window};
