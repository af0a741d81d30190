//! Prelude module for tinyGUI.
//!
//! ```
//! use tinygui::prelude::*;
//! ```
//!
//! This provides access to the toolkit context and message loop, the widget
//! trait and built-in widgets, events, and geometry types.

// ============================================================================
// Toolkit
// ============================================================================

pub use crate::message_loop::{MessageLoop, PumpStatus};
pub use crate::toolkit::{Toolkit, ToolkitBuilder};

// ============================================================================
// Object and Event System
// ============================================================================

pub use tinygui_core::{EventContext, EventPayload, MessageId, Object, SlotIndex, SyncMode};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::{AnchorMask, Button, Control, Label, TextBox, Widget, WidgetRef, Window, dispatch};

// ============================================================================
// Geometry and Painting
// ============================================================================

pub use crate::geometry::{Point, Rect, Size};
pub use crate::widget::{Brush, Color, Pen};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{GuiError, GuiResult};
