//! Integration tests for event tables with object senders.

use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tinygui_core::{
    AsyncExecutor, AsyncPolicy, EventContext, EventError, EventTable, ExecutorConfig, MessageId, Object, ObjectBase,
    ObjectType, SlotIndex, SyncMode, make_param, object_cast,
};

// Sender type standing in for a widget.
struct Gadget {
    base: ObjectBase,
    presses: AtomicUsize,
}

impl Object for Gadget {
    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

fn setup() -> (Arc<Gadget>, EventTable<Arc<Gadget>>) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let gadget = Arc::new(Gadget {
        base: ObjectBase::new(ObjectType::Button),
        presses: AtomicUsize::new(0),
    });
    (gadget, EventTable::new(AsyncExecutor::default()))
}

#[test]
fn test_sync_callback_sees_sender() {
    let (gadget, table) = setup();
    table
        .register(
            MessageId::KEY_DOWN,
            |sender: &Arc<Gadget>, _, _| {
                sender.presses.fetch_add(1, Ordering::SeqCst);
            },
            EventContext::none(),
            SyncMode::Sync,
        )
        .unwrap();

    let fired = table.dispatch(&gadget, MessageId::KEY_DOWN, 13, 0).unwrap();
    assert_eq!(fired.mode, SyncMode::Sync);
    assert_eq!(fired.payload.param1(), 13);
    assert_eq!(gadget.presses.load(Ordering::SeqCst), 1);
    assert!(table.dispatch(&gadget, MessageId::KEY_UP, 13, 0).is_none());
}

#[test]
fn test_disabled_slot_and_bad_index() {
    let (gadget, table) = setup();
    let slot = table
        .register(MessageId::CHAR, |_, _, _| {}, EventContext::none(), SyncMode::Sync)
        .unwrap();

    table.set_enabled(slot, false).unwrap();
    assert!(!table.is_enabled(slot).unwrap());
    assert!(table.dispatch(&gadget, MessageId::CHAR, 0, 0).is_none());

    assert!(matches!(
        table.set_interrupt(SlotIndex::new(5), true),
        Err(EventError::InvalidSlot { index: 5, len: 1 })
    ));
}

#[test]
fn test_interrupt_is_reported_after_callback() {
    let (gadget, table) = setup();
    let slot = table
        .register(MessageId::CLOSE, |_, _, _| {}, EventContext::none(), SyncMode::Sync)
        .unwrap();
    assert!(!table.dispatch(&gadget, MessageId::CLOSE, 0, 0).unwrap().interrupt);

    table.set_interrupt(slot, true).unwrap();
    assert!(table.dispatch(&gadget, MessageId::CLOSE, 0, 0).unwrap().interrupt);
}

#[test]
fn test_interrupt_not_taken_from_reused_slot() {
    let (gadget, _) = setup();
    let table: Arc<EventTable<Arc<Gadget>>> = Arc::new_cyclic(|this: &Weak<EventTable<Arc<Gadget>>>| {
        let table = EventTable::new(AsyncExecutor::default());
        let this = this.clone();
        table
            .register(
                MessageId::KEY_DOWN,
                move |_, _, _| {
                    let Some(table) = this.upgrade() else { return };
                    table.clear();
                    let slot = table
                        .register(MessageId::KEY_UP, |_, _, _| {}, EventContext::none(), SyncMode::Sync)
                        .unwrap();
                    table.set_interrupt(slot, true).unwrap();
                },
                EventContext::none(),
                SyncMode::Sync,
            )
            .unwrap();
        table
    });

    // The callback put KEY_UP at the index KEY_DOWN fired from.
    let fired = table.dispatch(&gadget, MessageId::KEY_DOWN, 0, 0).unwrap();
    assert_eq!(fired.slot, SlotIndex::new(0));
    assert!(!fired.interrupt);
    assert_eq!(table.messages(), vec![MessageId::KEY_UP]);
    assert!(table.dispatch(&gadget, MessageId::KEY_UP, 0, 0).unwrap().interrupt);
}

#[test]
fn test_mouse_payload_is_typed_by_message() {
    let (gadget, table) = setup();
    let slot = table
        .register(MessageId::LBUTTON_DOWN, |_, _, _| {}, EventContext::none(), SyncMode::Sync)
        .unwrap();
    assert!(table.last_payload(slot).unwrap().mouse().is_some());

    table.dispatch(&gadget, MessageId::LBUTTON_DOWN, 1, make_param(30, -4));
    let payload = table.last_payload(slot).unwrap();
    let mouse = payload.mouse().unwrap();
    assert_eq!((mouse.x(), mouse.y()), (30, -4));
    assert_eq!(payload.object_type(), ObjectType::MouseEventArgs);
}

#[test]
fn test_async_slots_on_a_pool() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let executor = AsyncExecutor::new(ExecutorConfig::pooled(3)).unwrap();
    assert_eq!(executor.policy(), AsyncPolicy::Pooled { threads: 3 });

    let gadget = Arc::new(Gadget {
        base: ObjectBase::new(ObjectType::Window),
        presses: AtomicUsize::new(0),
    });
    let table: EventTable<Arc<Gadget>> = EventTable::new(executor.clone());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();
    table
        .register(
            MessageId::USER,
            move |sender: &Arc<Gadget>, context, payload| {
                let offset = context.get::<usize>().copied().unwrap_or_default();
                record.lock().push((sender.object_id(), payload.param1() + offset));
            },
            EventContext::new(100_usize),
            SyncMode::Async,
        )
        .unwrap();

    for n in 0..8 {
        let fired = table.dispatch(&gadget, MessageId::USER, n, 0).unwrap();
        assert_eq!(fired.mode, SyncMode::Async);
    }
    assert!(executor.wait_idle(Duration::from_secs(5)));
    assert_eq!(executor.total_spawned(), 8);

    let mut values: Vec<usize> = seen.lock().iter().map(|&(id, value)| {
        assert_eq!(id, gadget.object_id());
        value
    }).collect();
    values.sort_unstable();
    assert_eq!(values, (100..108).collect::<Vec<_>>());
}

#[test]
fn test_object_cast_through_dyn() {
    let (gadget, _table) = setup();
    let object: &dyn Object = gadget.as_ref();
    assert!(object_cast::<Gadget>(object).is_some());
    assert_eq!(object.object_type(), ObjectType::Button);
}
