//! Integration tests for the message loop against the headless backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tinygui::{
    Brush, Button, Color, EventContext, HeadlessBackend, MessageId, MessageLoop, Point, PumpStatus, Rect, SyncMode, TextBox,
    Toolkit, Widget, Window,
};

fn setup() -> (Toolkit, Arc<HeadlessBackend>, Arc<Window>) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let (toolkit, backend) = Toolkit::headless().unwrap();
    let window = Window::new(&toolkit, "loop", Rect::new(0, 0, 200, 100));
    (toolkit, backend, window)
}

#[test]
fn test_close_destroys_tree_and_quits() {
    let (toolkit, backend, window) = setup();
    let ok = Button::new(&toolkit, "OK", Rect::new(10, 10, 50, 20));
    window.add_child(ok.clone()).unwrap();
    let handle = window.show().unwrap();
    assert_eq!(backend.native_count(), 2);

    backend.user_close(&toolkit, handle).unwrap();
    let mut message_loop = MessageLoop::new(&toolkit);
    assert_eq!(message_loop.run_timeout(Duration::from_secs(5)), Some(0));

    assert!(window.widget_base().is_destroyed());
    assert!(ok.widget_base().is_destroyed());
    assert_eq!(backend.native_count(), 0);
    assert_eq!(toolkit.route_count(), 0);
}

#[test]
fn test_interrupted_close_keeps_running() {
    let (toolkit, backend, window) = setup();
    let asked = Arc::new(AtomicUsize::new(0));
    let counter = asked.clone();
    let slot = window
        .set_on_close(
            move |_, _, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            EventContext::none(),
            SyncMode::Sync,
        )
        .unwrap();
    window.widget_base().events().set_interrupt(slot, true).unwrap();
    let handle = window.show().unwrap();

    backend.user_close(&toolkit, handle).unwrap();
    let mut message_loop = MessageLoop::new(&toolkit);
    assert_eq!(message_loop.pump(), PumpStatus::Idle { processed: 1 });
    assert_eq!(asked.load(Ordering::SeqCst), 1);
    assert!(!window.widget_base().is_destroyed());
    assert!(backend.is_alive(handle));

    // Lifting the interrupt lets the next close through.
    window.widget_base().events().set_interrupt(slot, false).unwrap();
    backend.user_close(&toolkit, handle).unwrap();
    assert_eq!(message_loop.run_timeout(Duration::from_secs(5)), Some(0));
    assert_eq!(asked.load(Ordering::SeqCst), 2);
}

#[test]
fn test_button_click_routes_through_parent() {
    let (toolkit, backend, window) = setup();
    let next = Button::new(&toolkit, "Next", Rect::new(10, 10, 60, 20));
    window.add_child(next.clone()).unwrap();
    window.show().unwrap();

    let clicks = Arc::new(AtomicUsize::new(0));
    let counter = clicks.clone();
    next.set_on_click(
        move |button, _, payload| {
            assert_eq!(button.text(), "Next");
            assert_eq!(payload.message(), MessageId::CLICKED);
            counter.fetch_add(1, Ordering::SeqCst);
        },
        EventContext::none(),
        SyncMode::Sync,
    )
    .unwrap();

    let button_handle = next.widget_base().native_handle().unwrap();
    let mut message_loop = MessageLoop::new(&toolkit);
    backend.user_click(&toolkit, button_handle, Point::new(5, 5)).unwrap();
    message_loop.pump();
    assert_eq!(clicks.load(Ordering::SeqCst), 1);

    next.set_enabled(false).unwrap();
    backend.user_click(&toolkit, button_handle, Point::new(5, 5)).unwrap();
    message_loop.pump();
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn test_typing_refreshes_text_before_callback() {
    let (toolkit, backend, window) = setup();
    let answer = TextBox::new(&toolkit, "", Rect::new(10, 40, 100, 20), false);
    window.add_child(answer.clone()).unwrap();
    window.show().unwrap();

    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let record = seen.clone();
    answer
        .set_on_text_changed(
            move |text_box, _, _| record.lock().push(text_box.text()),
            EventContext::none(),
            SyncMode::Sync,
        )
        .unwrap();

    let handle = answer.widget_base().native_handle().unwrap();
    let mut message_loop = MessageLoop::new(&toolkit);
    backend.user_type(&toolkit, handle, "4").unwrap();
    assert_eq!(message_loop.pump(), PumpStatus::Idle { processed: 1 });
    backend.user_type(&toolkit, handle, "42").unwrap();
    assert_eq!(message_loop.pump(), PumpStatus::Idle { processed: 1 });

    assert_eq!(*seen.lock(), vec!["4".to_string(), "42".to_string()]);
    assert_eq!(answer.text(), "42");
}

#[test]
fn test_expose_paints_inside_session() {
    let (toolkit, backend, window) = setup();
    let handle = window.show().unwrap();
    let painted = Arc::new(AtomicUsize::new(0));
    let counter = painted.clone();
    window
        .set_on_paint(
            move |window, _, _| {
                let brush = Brush::new(Color::rgb(255, 255, 255));
                window.fill_rect(Rect::new(0, 0, 200, 100), &brush).unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
            },
            EventContext::none(),
            SyncMode::Sync,
        )
        .unwrap();

    backend.expose(&toolkit, handle).unwrap();
    MessageLoop::new(&toolkit).pump();
    assert_eq!(painted.load(Ordering::SeqCst), 1);
    assert!(!backend.record(handle).unwrap().painting);
}
