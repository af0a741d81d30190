//! Tests for the widget system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tinygui_core::{EventContext, MessageId, Object, ObjectBase, ObjectType, SyncMode};

use crate::backend::{BackendCall, BackendOp, HeadlessBackend};
use crate::error::{GuiError, GuiResult};
use crate::geometry::{Point, PositionBounds, Rect, Size};
use crate::toolkit::Toolkit;
use crate::widget::painting::{Brush, Color, DrawCommand, Pen};
use crate::widget::style::Style;
use crate::widget::{
    AnchorMask, Button, Control, ControlBase, Label, TextBox, Widget, WidgetBase, WidgetRef, Window, dispatch,
    widget_cast,
};

/// A control that counts key presses in its default handling.
struct Tile {
    control: ControlBase,
    keys: Mutex<Vec<usize>>,
}

impl Tile {
    fn new(toolkit: &Toolkit, rect: Rect) -> Arc<Tile> {
        Arc::new_cyclic(|this: &Weak<Tile>| Tile {
            control: ControlBase::new(toolkit, this.clone(), ObjectType::Control, "Tile", "", Style::NONE, rect),
            keys: Mutex::new(Vec::new()),
        })
    }
}

impl Object for Tile {
    fn object_base(&self) -> &ObjectBase {
        self.control.widget_base().object()
    }
}

impl Widget for Tile {
    fn widget_base(&self) -> &WidgetBase {
        self.control.widget_base()
    }

    fn control_base(&self) -> Option<&ControlBase> {
        Some(&self.control)
    }

    fn move_to(&self, pos: Point) -> GuiResult<()> {
        self.control.move_to(pos)
    }

    fn on_message(&self, message: MessageId, param1: usize, _param2: isize) -> GuiResult<()> {
        if message == MessageId::KEY_DOWN {
            self.keys.lock().push(param1);
        }
        Ok(())
    }
}

fn setup() -> (Toolkit, Arc<HeadlessBackend>) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Toolkit::headless().unwrap()
}

fn to_ref<W: Widget>(widget: &Arc<W>) -> WidgetRef {
    widget.clone()
}

// =========================================================================
// Construction and model
// =========================================================================

#[test]
fn test_widget_creation() {
    let (toolkit, backend) = setup();
    let button = Button::new(&toolkit, "OK", Rect::new(10, 20, 80, 24));

    assert_eq!(button.object_type(), ObjectType::Button);
    assert_eq!(button.text(), "OK");
    assert_eq!(button.rect(), Rect::new(10, 20, 80, 24));
    assert_eq!(button.widget_base().class_name(), Button::CLASS_NAME);
    assert!(button.widget_base().style().has(Style::CHILD | Style::TAB_STOP));
    assert!(button.is_enabled());
    assert!(!button.widget_base().is_displayed());
    assert!(button.parent().is_none());
    assert_eq!(button.anchor(), AnchorMask::LEFT | AnchorMask::TOP);
    assert_eq!(backend.native_count(), 0);
}

#[test]
fn test_ids_increase() {
    let (toolkit, _backend) = setup();
    let first = Label::new(&toolkit, "a", Rect::default());
    let second = Label::new(&toolkit, "b", Rect::default());
    assert!(second.object_id() > first.object_id());
}

#[test]
fn test_size_clamped_real_size_kept() {
    let (toolkit, _backend) = setup();
    let panel = Control::new(&toolkit, Rect::new(0, 0, 50, 50));
    panel.set_bounds(Size::new(20, 20), Size::new(100, 100)).unwrap();

    panel.resize(Size::new(150, 10)).unwrap();
    assert_eq!(panel.size(), Size::new(100, 20));
    assert_eq!(panel.widget_base().real_rect().size, Size::new(150, 10));

    // Loosening the bounds re-clamps from the request.
    panel.set_bounds(Size::new(0, 0), Size::new(200, 200)).unwrap();
    assert_eq!(panel.size(), Size::new(150, 10));
}

#[test]
fn test_invalid_size_bounds_rejected() {
    let (toolkit, _backend) = setup();
    let panel = Control::new(&toolkit, Rect::new(0, 0, 50, 50));
    let result = panel.set_bounds(Size::new(60, 0), Size::new(50, 50));
    assert!(matches!(result, Err(GuiError::InvalidGeometry(_))));
    assert_eq!(panel.size(), Size::new(50, 50));
}

#[test]
fn test_control_move_clamps_to_position_bounds() {
    let (toolkit, _backend) = setup();
    let button = Button::new(&toolkit, "b", Rect::new(0, 0, 10, 10));
    let bounds = PositionBounds::new(Point::new(0, 0), Point::new(50, 50)).unwrap();
    button.set_position_bounds(bounds).unwrap();

    button.move_to(Point::new(80, -10)).unwrap();
    assert_eq!(button.position(), Point::new(50, 0));
    assert_eq!(button.widget_base().real_rect().origin, Point::new(80, -10));

    button.set_position_bounds(PositionBounds::UNBOUNDED).unwrap();
    assert_eq!(button.position(), Point::new(80, -10));
}

#[test]
fn test_clamping_through_dyn_widget() {
    let (toolkit, _backend) = setup();
    let button = Button::new(&toolkit, "b", Rect::new(0, 0, 10, 10));
    button
        .set_position_bounds(PositionBounds::new(Point::new(0, 0), Point::new(5, 5)).unwrap())
        .unwrap();

    let widget: WidgetRef = button.clone();
    widget.move_to(Point::new(9, 9)).unwrap();
    assert_eq!(button.position(), Point::new(5, 5));
}

#[test]
fn test_window_move_does_not_clamp() {
    let (toolkit, _backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 10, 10));
    window.move_to(Point::new(-500, 9000)).unwrap();
    assert_eq!(window.position(), Point::new(-500, 9000));
}

#[test]
fn test_set_geometry_moves_and_resizes() {
    let (toolkit, _backend) = setup();
    let label = Label::new(&toolkit, "l", Rect::default());
    label.set_geometry(Rect::new(3, 4, 30, 40)).unwrap();
    assert_eq!(label.rect(), Rect::new(3, 4, 30, 40));
}

#[test]
fn test_setters_before_show_are_model_only() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "old", Rect::new(0, 0, 100, 100));

    window.set_text("new").unwrap();
    window.set_enabled(false).unwrap();
    window.set_resizable(false).unwrap();
    window.resize(Size::new(120, 80)).unwrap();
    assert!(backend.calls().is_empty());

    let handle = window.show().unwrap();
    let record = backend.record(handle).unwrap();
    assert_eq!(record.spec.text, "new");
    assert!(!record.spec.enabled);
    assert!(!record.spec.style.has(Style::THICK_FRAME));
    assert_eq!(record.spec.rect.size, Size::new(120, 80));
}

#[test]
fn test_native_failure_keeps_model() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "old", Rect::new(0, 0, 100, 100));
    let handle = window.show().unwrap();

    backend.fail_next(BackendOp::ApplyText);
    let result = window.set_text("new");
    assert!(matches!(result, Err(GuiError::Backend(_))));
    assert_eq!(window.text(), "new");
    assert_eq!(backend.record(handle).unwrap().spec.text, "old");

    backend.fail_next(BackendOp::ApplyGeometry);
    assert!(window.move_to(Point::new(5, 5)).is_err());
    assert_eq!(window.position(), Point::new(5, 5));
}

#[test]
fn test_native_setters_after_show() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let handle = window.show().unwrap();
    backend.clear_calls();

    window.set_maximizable(false).unwrap();
    window.set_enabled(false).unwrap();
    window.widget_base().request_repaint().unwrap();

    let record = backend.record(handle).unwrap();
    assert!(!window.is_maximizable());
    assert!(!record.spec.style.has(Style::MAXIMIZE_BOX));
    assert!(!record.spec.enabled);
    assert_eq!(record.repaint_requests, 1);
    assert_eq!(backend.calls().len(), 3);
}

#[test]
fn test_text_box_flags() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let notes = TextBox::new(&toolkit, "", Rect::new(0, 0, 80, 40), true);
    let answer = TextBox::new(&toolkit, "", Rect::new(0, 50, 80, 20), false);
    window.add_child(notes.clone()).unwrap();
    window.add_child(answer.clone()).unwrap();
    window.show().unwrap();

    assert!(notes.is_multiline());
    assert!(!answer.is_multiline());

    answer.set_number_only(true).unwrap();
    assert!(answer.is_number_only());
    let handle = answer.widget_base().native_handle().unwrap();
    assert!(backend.record(handle).unwrap().spec.style.has(Style::NUMBER));
}

// =========================================================================
// Children
// =========================================================================

#[test]
fn test_removed_slot_is_reused() {
    let (toolkit, _backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let a = Label::new(&toolkit, "a", Rect::default());
    let b = Label::new(&toolkit, "b", Rect::default());
    let c = Label::new(&toolkit, "c", Rect::default());
    let d = Label::new(&toolkit, "d", Rect::default());

    for child in [&a, &b, &c] {
        window.add_child(child.clone()).unwrap();
    }
    window.remove_child(&to_ref(&b)).unwrap();
    assert!(b.parent().is_none());
    assert_eq!(window.widget_base().slot_count(), 3);
    assert_eq!(window.widget_base().child_count(), 2);

    window.add_child(d.clone()).unwrap();
    assert_eq!(window.widget_base().slot_count(), 3);
    let texts: Vec<String> = window.children().iter().map(|child| child.text()).collect();
    assert_eq!(texts, ["a", "d", "c"]);
}

#[test]
fn test_parent_link_set_on_add() {
    let (toolkit, _backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let label = Label::new(&toolkit, "a", Rect::default());
    window.add_child(label.clone()).unwrap();

    let parent = label.parent().unwrap();
    assert_eq!(parent.widget_base().id(), window.object_id());
}

#[test]
fn test_add_child_rejects_bad_links() {
    let (toolkit, _backend) = setup();
    let outer = Control::new(&toolkit, Rect::default());
    let inner = Control::new(&toolkit, Rect::default());
    let other = Window::new(&toolkit, "other", Rect::default());
    outer.add_child(inner.clone()).unwrap();

    assert!(matches!(
        outer.add_child(outer.clone()),
        Err(GuiError::CircularParentage { .. })
    ));
    assert!(matches!(
        inner.add_child(outer.clone()),
        Err(GuiError::CircularParentage { .. })
    ));
    assert!(matches!(
        other.add_child(inner.clone()),
        Err(GuiError::AlreadyParented { child }) if child == inner.object_id()
    ));
    assert_eq!(other.widget_base().child_count(), 0);
}

#[test]
fn test_remove_unknown_child() {
    let (toolkit, _backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::default());
    let stranger = Label::new(&toolkit, "s", Rect::default());
    assert!(matches!(
        window.remove_child(&to_ref(&stranger)),
        Err(GuiError::NotAChild { .. })
    ));
}

#[test]
fn test_add_to_displayed_container_creates_native() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let window_handle = window.show().unwrap();

    let label = Label::new(&toolkit, "late", Rect::new(1, 1, 10, 10));
    window.add_child(label.clone()).unwrap();

    let handle = label.widget_base().native_handle().unwrap();
    let record = backend.record(handle).unwrap();
    assert_eq!(record.spec.parent, Some(window_handle));
    assert_eq!(record.spec.text, "late");
    assert!(toolkit.widget_for(handle).is_some());
}

#[test]
fn test_show_creates_children_in_slot_order() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let panel = Control::new(&toolkit, Rect::new(0, 0, 50, 50));
    let inner = Button::new(&toolkit, "in", Rect::new(0, 0, 10, 10));
    let label = Label::new(&toolkit, "after", Rect::new(60, 0, 10, 10));
    panel.add_child(inner.clone()).unwrap();
    window.add_child(panel.clone()).unwrap();
    window.add_child(label.clone()).unwrap();

    window.show().unwrap();
    let kinds: Vec<ObjectType> = backend
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            BackendCall::Create { kind, .. } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        [ObjectType::Window, ObjectType::Control, ObjectType::Button, ObjectType::Label]
    );
    assert_eq!(toolkit.route_count(), 4);

    // Showing again is a no-op.
    window.show().unwrap();
    assert_eq!(backend.native_count(), 4);
}

#[test]
fn test_remove_displayed_child_destroys_native() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let panel = Control::new(&toolkit, Rect::new(0, 0, 50, 50));
    panel.add_child(Label::new(&toolkit, "x", Rect::default())).unwrap();
    window.add_child(panel.clone()).unwrap();
    window.show().unwrap();
    assert_eq!(backend.native_count(), 3);

    window.remove_child(&to_ref(&panel)).unwrap();
    assert_eq!(backend.native_count(), 1);
    assert!(!panel.widget_base().is_displayed());
    assert!(!panel.children()[0].widget_base().is_displayed());
    assert_eq!(toolkit.route_count(), 1);

    // The detached subtree can be attached and shown again.
    window.add_child(panel.clone()).unwrap();
    assert_eq!(backend.native_count(), 3);
}

// =========================================================================
// Lifecycle
// =========================================================================

#[test]
fn test_destroy_container_with_children() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let panel = Control::new(&toolkit, Rect::new(0, 0, 50, 50));
    let label = Label::new(&toolkit, "x", Rect::default());
    panel.add_child(label.clone()).unwrap();
    window.add_child(panel.clone()).unwrap();
    window.show().unwrap();

    window.destroy().unwrap();
    for widget in [to_ref(&window), to_ref(&panel), to_ref(&label)] {
        assert!(widget.widget_base().is_destroyed());
        assert!(widget.parent().is_none());
        assert!(widget.children().is_empty());
    }
    assert_eq!(backend.native_count(), 0);
    assert_eq!(toolkit.route_count(), 0);

    assert!(matches!(label.set_text("y"), Err(GuiError::Destroyed(_))));
    assert!(matches!(
        window.add_child(Label::new(&toolkit, "z", Rect::default())),
        Err(GuiError::Destroyed(_))
    ));

    // Destroying twice is a no-op.
    window.destroy().unwrap();
}

#[test]
fn test_destroy_child_nulls_parent_slot() {
    let (toolkit, _backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let button = Button::new(&toolkit, "b", Rect::default());
    window.add_child(button.clone()).unwrap();

    button.destroy().unwrap();
    assert_eq!(window.widget_base().slot_count(), 1);
    assert_eq!(window.widget_base().child_count(), 0);

    let replacement = Button::new(&toolkit, "c", Rect::default());
    window.add_child(replacement).unwrap();
    assert_eq!(window.widget_base().slot_count(), 1);
}

#[test]
fn test_destroy_clears_event_table() {
    let (toolkit, _backend) = setup();
    let button = Button::new(&toolkit, "b", Rect::default());
    button
        .set_on_click(|_, _, _| {}, EventContext::none(), SyncMode::Sync)
        .unwrap();
    assert_eq!(button.widget_base().events().len(), 1);

    button.destroy().unwrap();
    assert!(button.widget_base().events().is_empty());
    assert!(matches!(
        button.set_on_click(|_, _, _| {}, EventContext::none(), SyncMode::Sync),
        Err(GuiError::Destroyed(_))
    ));
}

#[test]
fn test_destroy_reports_native_failure() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    window.show().unwrap();

    backend.fail_next(BackendOp::Destroy);
    assert!(matches!(window.destroy(), Err(GuiError::Backend(_))));
    assert!(window.widget_base().is_destroyed());
}

#[test]
fn test_drop_releases_native() {
    let (toolkit, backend) = setup();
    {
        let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
        window.add_child(Label::new(&toolkit, "x", Rect::default())).unwrap();
        window.show().unwrap();
        assert_eq!(backend.native_count(), 2);
    }
    assert_eq!(backend.native_count(), 0);
    assert_eq!(toolkit.route_count(), 0);
}

#[test]
fn test_show_failure_leaves_window_hidden() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));

    backend.fail_next(BackendOp::Create);
    assert!(matches!(window.show(), Err(GuiError::Backend(_))));
    assert!(!window.widget_base().is_displayed());

    window.show().unwrap();
    assert!(window.widget_base().is_displayed());
}

// =========================================================================
// Events and painting
// =========================================================================

#[test]
fn test_window_click_gated_on_enabled() {
    let (toolkit, _backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let clicks = Arc::new(AtomicUsize::new(0));
    let counter = clicks.clone();
    window
        .set_on_click(
            move |_, _, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            EventContext::none(),
            SyncMode::Sync,
        )
        .unwrap();

    let sender = to_ref(&window);
    dispatch(&sender, MessageId::LBUTTON_UP, 0, 0).unwrap();
    window.set_enabled(false).unwrap();
    let outcome = dispatch(&sender, MessageId::LBUTTON_UP, 0, 0).unwrap();
    assert!(!outcome.was_handled());
    window.set_enabled(true).unwrap();
    dispatch(&sender, MessageId::LBUTTON_UP, 0, 0).unwrap();

    assert_eq!(clicks.load(Ordering::SeqCst), 2);
}

#[test]
fn test_text_box_click_gated_on_enabled() {
    let (toolkit, _backend) = setup();
    let field = TextBox::new(&toolkit, "", Rect::new(0, 0, 80, 20), false);
    let clicks = Arc::new(AtomicUsize::new(0));
    let counter = clicks.clone();
    field
        .set_on_click(
            move |_, _, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            EventContext::none(),
            SyncMode::Sync,
        )
        .unwrap();

    let sender = to_ref(&field);
    assert!(dispatch(&sender, MessageId::LBUTTON_UP, 0, 0).unwrap().was_handled());
    field.set_enabled(false).unwrap();
    assert!(!dispatch(&sender, MessageId::LBUTTON_UP, 0, 0).unwrap().was_handled());

    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn test_callback_receives_concrete_widget() {
    let (toolkit, _backend) = setup();
    let label = Label::new(&toolkit, "hello", Rect::default());
    let seen = Arc::new(Mutex::new(String::new()));
    let sink = seen.clone();
    label
        .on_event(
            MessageId::USER,
            move |label: &Label, ctx, _| {
                let suffix = ctx.get::<&'static str>().copied().unwrap_or_default();
                *sink.lock() = format!("{}{}", label.text(), suffix);
            },
            EventContext::new("!"),
            SyncMode::Sync,
        )
        .unwrap();

    dispatch(&to_ref(&label), MessageId::USER, 0, 0).unwrap();
    assert_eq!(*seen.lock(), "hello!");
}

#[test]
fn test_paint_session_brackets_callback() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    let handle = window.show().unwrap();
    let pen = Pen::new(Color::BLACK, 1);
    let brush = Brush::new(Color::WHITE);

    window
        .set_on_paint(
            move |window, _, _| {
                window.draw_rect(Rect::new(0, 0, 10, 10), Some(&pen), Some(&brush)).unwrap();
                window.draw_line(Point::new(0, 0), Point::new(10, 10), &pen).unwrap();
            },
            EventContext::none(),
            SyncMode::Sync,
        )
        .unwrap();
    backend.clear_calls();

    dispatch(&to_ref(&window), MessageId::PAINT, 0, 0).unwrap();
    let calls = backend.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], BackendCall::BeginPaint(handle));
    assert!(matches!(calls[1], BackendCall::Draw(_, DrawCommand::Rect { .. })));
    assert!(matches!(calls[2], BackendCall::Draw(_, DrawCommand::Line { .. })));
    assert_eq!(calls[3], BackendCall::EndPaint(handle));
    assert!(!window.widget_base().is_painting());
}

#[test]
fn test_draw_outside_paint_fails() {
    let (toolkit, _backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    window.show().unwrap();

    let brush = Brush::new(Color::rgb(10, 20, 30));
    assert!(matches!(
        window.fill_rect(Rect::new(0, 0, 5, 5), &brush),
        Err(GuiError::NotPainting(_))
    ));
    assert!(matches!(
        window.draw_polygon(&[Point::new(0, 0), Point::new(5, 0), Point::new(0, 5)], None, Some(&brush)),
        Err(GuiError::NotPainting(_))
    ));
}

#[test]
fn test_paint_failure_closes_nothing() {
    let (toolkit, backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 100, 100));
    window.show().unwrap();

    backend.fail_next(BackendOp::BeginPaint);
    assert!(dispatch(&to_ref(&window), MessageId::PAINT, 0, 0).is_err());
    assert!(!window.widget_base().is_painting());
}

#[test]
fn test_custom_widget_default_handling() {
    let (toolkit, _backend) = setup();
    let tile = Tile::new(&toolkit, Rect::new(0, 0, 20, 20));
    let sender = to_ref(&tile);

    dispatch(&sender, MessageId::KEY_DOWN, 13, 0).unwrap();

    // An interrupting slot suppresses the default handling.
    let slot = tile
        .set_on_key_down(|_, _, _| {}, EventContext::none(), SyncMode::Sync)
        .unwrap();
    tile.widget_base().events().set_interrupt(slot, true).unwrap();
    dispatch(&sender, MessageId::KEY_DOWN, 27, 0).unwrap();

    assert_eq!(*tile.keys.lock(), [13]);
    assert!(widget_cast::<Tile>(sender.as_ref()).is_some());
    assert!(widget_cast::<Button>(sender.as_ref()).is_none());
}

#[test]
fn test_custom_widget_follows_anchor() {
    let (toolkit, _backend) = setup();
    let panel = Control::new(&toolkit, Rect::new(0, 0, 100, 100));
    let tile = Tile::new(&toolkit, Rect::new(80, 80, 10, 10));
    tile.control.set_anchor(AnchorMask::RIGHT | AnchorMask::BOTTOM);
    panel.add_child(tile.clone()).unwrap();

    panel.resize(Size::new(150, 120)).unwrap();
    assert_eq!(tile.rect(), Rect::new(130, 100, 10, 10));
}

#[test]
fn test_window_client_area_with_frame() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let backend = Arc::new(HeadlessBackend::with_frame_inset(Size::new(10, 30)));
    let toolkit = Toolkit::new(backend.clone()).unwrap();

    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 200, 100));
    let body = Control::new(&toolkit, Rect::new(0, 0, 190, 70));
    body.set_anchor(AnchorMask::ALL);
    window.add_child(body.clone()).unwrap();

    window.show().unwrap();
    assert_eq!(window.client_size(), Size::new(190, 70));

    window.resize(Size::new(300, 150)).unwrap();
    assert_eq!(window.size(), Size::new(300, 150));
    assert_eq!(window.client_size(), Size::new(290, 120));
    assert_eq!(body.size(), Size::new(290, 120));
}

#[test]
fn test_resize_before_show_relays_children() {
    let (toolkit, _backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 200, 100));
    let panel = Control::new(&toolkit, Rect::new(10, 10, 180, 80));
    panel.set_anchor(AnchorMask::ALL);
    let next = Button::new(&toolkit, "Next", Rect::new(120, 70, 70, 20));
    next.set_anchor(AnchorMask::RIGHT | AnchorMask::BOTTOM);
    let badge = Label::new(&toolkit, "*", Rect::new(90, 40, 20, 20));
    badge.set_anchor(AnchorMask::NONE);
    for child in [to_ref(&panel), to_ref(&next), to_ref(&badge)] {
        window.add_child(child).unwrap();
    }

    window.resize(Size::new(300, 150)).unwrap();
    assert_eq!(window.client_size(), Size::new(300, 150));
    assert_eq!(panel.rect(), Rect::new(10, 10, 280, 130));
    assert_eq!(next.rect(), Rect::new(220, 120, 70, 20));
    assert_eq!(badge.rect(), Rect::new(140, 65, 20, 20));

    window.resize(Size::new(200, 100)).unwrap();
    assert_eq!(panel.rect(), Rect::new(10, 10, 180, 80));
    assert_eq!(next.rect(), Rect::new(120, 70, 70, 20));
    assert_eq!(badge.rect(), Rect::new(90, 40, 20, 20));
}

#[test]
fn test_set_bounds_before_show_relays_children() {
    let (toolkit, _backend) = setup();
    let window = Window::new(&toolkit, "w", Rect::new(0, 0, 200, 100));
    let next = Button::new(&toolkit, "Next", Rect::new(120, 70, 70, 20));
    next.set_anchor(AnchorMask::RIGHT | AnchorMask::BOTTOM);
    window.add_child(next.clone()).unwrap();

    // Raising the minimum grows the window past its requested size.
    window.set_bounds(Size::new(250, 120), Size::new(400, 300)).unwrap();
    assert_eq!(window.size(), Size::new(250, 120));
    assert_eq!(next.rect(), Rect::new(170, 90, 70, 20));

    // Relaxing it again falls back to the requested 200x100.
    window.set_bounds(Size::new(100, 50), Size::new(400, 300)).unwrap();
    assert_eq!(window.size(), Size::new(200, 100));
    assert_eq!(next.rect(), Rect::new(120, 70, 70, 20));
}
