//! An in-memory backend.
//!
//! `HeadlessBackend` keeps native resources in a slot map, records every
//! call it receives, and can be told to fail specific operations. It can
//! also play the platform's role and post the messages a user action would
//! produce (resizing a window, clicking a button, typing into a text box).

use std::collections::HashMap;

use parking_lot::Mutex;
use slotmap::{Key, KeyData, SlotMap, new_key_type};
use tinygui_core::{MessageId, ObjectType, make_param};

use super::{Backend, BackendError, BackendOp, NativeHandle, NativeSpec};
use crate::error::GuiResult;
use crate::geometry::{Point, Rect, Size};
use crate::toolkit::Toolkit;
use crate::widget::painting::DrawCommand;
use crate::widget::style::Style;

new_key_type! {
    struct NativeKey;
}

fn key_of(handle: NativeHandle) -> NativeKey {
    NativeKey::from(KeyData::from_ffi(handle.as_raw()))
}

fn handle_of(key: NativeKey) -> NativeHandle {
    NativeHandle::from_raw(key.data().as_ffi())
}

/// Current state of one headless native resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeRecord {
    /// The creation spec, kept up to date by later apply calls.
    pub spec: NativeSpec,
    /// Whether a paint session is open.
    pub painting: bool,
    /// Number of repaint requests received.
    pub repaint_requests: usize,
}

/// One call received by a [`HeadlessBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Create {
        handle: NativeHandle,
        kind: ObjectType,
        parent: Option<NativeHandle>,
    },
    Destroy(NativeHandle),
    ApplyGeometry(NativeHandle, Rect),
    ApplyStyle(NativeHandle, Style),
    ApplyText(NativeHandle, String),
    ApplyEnabled(NativeHandle, bool),
    Repaint(NativeHandle),
    BeginPaint(NativeHandle),
    EndPaint(NativeHandle),
    Draw(NativeHandle, DrawCommand),
}

#[derive(Default)]
struct HeadlessState {
    natives: SlotMap<NativeKey, NativeRecord>,
    calls: Vec<BackendCall>,
    failures: HashMap<BackendOp, usize>,
    frame_inset: Size,
}

impl HeadlessState {
    fn check(&mut self, op: BackendOp) -> Result<(), BackendError> {
        match self.failures.get_mut(&op) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(BackendError::Rejected {
                    op,
                    reason: "injected failure".to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn record_mut(&mut self, handle: NativeHandle) -> Result<&mut NativeRecord, BackendError> {
        self.natives
            .get_mut(key_of(handle))
            .ok_or(BackendError::NoSuchHandle(handle))
    }

    fn record(&self, handle: NativeHandle) -> Result<&NativeRecord, BackendError> {
        self.natives
            .get(key_of(handle))
            .ok_or(BackendError::NoSuchHandle(handle))
    }

    fn client_size_of(&self, record: &NativeRecord) -> Size {
        let size = record.spec.rect.size;
        if record.spec.parent.is_some() {
            size
        } else {
            Size::new(
                (size.width - self.frame_inset.width).max(0),
                (size.height - self.frame_inset.height).max(0),
            )
        }
    }
}

/// A backend with no platform behind it.
#[derive(Default)]
pub struct HeadlessBackend {
    state: Mutex<HeadlessState>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose top-level windows lose `inset` to their frame, so
    /// their client size is smaller than their outer size.
    pub fn with_frame_inset(inset: Size) -> Self {
        let backend = Self::default();
        backend.state.lock().frame_inset = inset;
        backend
    }

    /// Make the next call of `op` fail.
    pub fn fail_next(&self, op: BackendOp) {
        self.fail_next_n(op, 1);
    }

    /// Make the next `count` calls of `op` fail.
    pub fn fail_next_n(&self, op: BackendOp, count: usize) {
        *self.state.lock().failures.entry(op).or_default() += count;
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// A copy of the native resource's current state.
    pub fn record(&self, handle: NativeHandle) -> Option<NativeRecord> {
        self.state.lock().record(handle).ok().cloned()
    }

    pub fn is_alive(&self, handle: NativeHandle) -> bool {
        self.state.lock().natives.contains_key(key_of(handle))
    }

    /// Number of live native resources.
    pub fn native_count(&self) -> usize {
        self.state.lock().natives.len()
    }

    /// Resize a native window as the user would, then post the resulting
    /// position-changed and size messages.
    pub fn user_resize(&self, toolkit: &Toolkit, handle: NativeHandle, size: Size) -> GuiResult<()> {
        let client = {
            let mut state = self.state.lock();
            state.record_mut(handle)?.spec.rect.size = size;
            let record = state.record(handle)?;
            state.client_size_of(record)
        };
        toolkit.post(handle, MessageId::WINDOW_POS_CHANGED, 0, 0)?;
        toolkit.post(handle, MessageId::SIZE, 0, make_param(client.width, client.height))
    }

    /// Click at `at` in client coordinates. Buttons also notify their parent.
    pub fn user_click(&self, toolkit: &Toolkit, handle: NativeHandle, at: Point) -> GuiResult<()> {
        let (kind, parent, control_id) = {
            let state = self.state.lock();
            let record = state.record(handle)?;
            (record.spec.kind, record.spec.parent, record.spec.control_id)
        };

        let position = make_param(at.x, at.y);
        toolkit.post(handle, MessageId::LBUTTON_DOWN, 1, position)?;
        toolkit.post(handle, MessageId::LBUTTON_UP, 0, position)?;

        if let (ObjectType::Button, Some(parent)) = (kind, parent) {
            let code = MessageId::CLICKED.notification_code().unwrap_or_default();
            toolkit.post(parent, MessageId::COMMAND, command_param(code, control_id.as_raw()), handle.to_param())?;
        }
        Ok(())
    }

    /// Replace the native text as if typed, and notify the parent.
    pub fn user_type(&self, toolkit: &Toolkit, handle: NativeHandle, text: &str) -> GuiResult<()> {
        let (parent, control_id) = {
            let mut state = self.state.lock();
            let record = state.record_mut(handle)?;
            record.spec.text = text.to_string();
            (record.spec.parent, record.spec.control_id)
        };

        if let Some(parent) = parent {
            let code = MessageId::TEXT_CHANGED.notification_code().unwrap_or_default();
            toolkit.post(parent, MessageId::COMMAND, command_param(code, control_id.as_raw()), handle.to_param())?;
        }
        Ok(())
    }

    /// Press a key while the native resource has focus.
    pub fn user_key(&self, toolkit: &Toolkit, handle: NativeHandle, key_code: usize) -> GuiResult<()> {
        self.state.lock().record(handle)?;
        toolkit.post(handle, MessageId::KEY_DOWN, key_code, 0)?;
        toolkit.post(handle, MessageId::KEY_UP, key_code, 0)
    }

    /// Press the window's close button.
    pub fn user_close(&self, toolkit: &Toolkit, handle: NativeHandle) -> GuiResult<()> {
        self.state.lock().record(handle)?;
        toolkit.post(handle, MessageId::CLOSE, 0, 0)
    }

    /// Deliver a paint message.
    pub fn expose(&self, toolkit: &Toolkit, handle: NativeHandle) -> GuiResult<()> {
        self.state.lock().record(handle)?;
        toolkit.post(handle, MessageId::PAINT, 0, 0)
    }
}

/// Parameter layout of a command message: notification code in the high
/// word, control id in the low word.
pub(crate) fn command_param(code: u16, control_id: u64) -> usize {
    (usize::from(code) << 16) | (control_id as usize & 0xFFFF)
}

impl Backend for HeadlessBackend {
    fn create(&self, spec: &NativeSpec) -> Result<NativeHandle, BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::Create)?;
        if let Some(parent) = spec.parent {
            state.record(parent)?;
        }

        let key = state.natives.insert(NativeRecord {
            spec: spec.clone(),
            painting: false,
            repaint_requests: 0,
        });
        let handle = handle_of(key);
        state.calls.push(BackendCall::Create {
            handle,
            kind: spec.kind,
            parent: spec.parent,
        });
        tracing::trace!(target: "tinygui::backend", %handle, class = %spec.class_name, "headless native created");
        Ok(handle)
    }

    fn destroy(&self, handle: NativeHandle) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::Destroy)?;
        state.record(handle)?;

        let mut doomed = vec![handle];
        let mut index = 0;
        while index < doomed.len() {
            let parent = doomed[index];
            doomed.extend(
                state
                    .natives
                    .iter()
                    .filter(|(_, record)| record.spec.parent == Some(parent))
                    .map(|(key, _)| handle_of(key)),
            );
            index += 1;
        }
        for handle in &doomed {
            state.natives.remove(key_of(*handle));
        }
        state.calls.push(BackendCall::Destroy(handle));
        Ok(())
    }

    fn apply_geometry(&self, handle: NativeHandle, rect: Rect) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::ApplyGeometry)?;
        state.record_mut(handle)?.spec.rect = rect;
        state.calls.push(BackendCall::ApplyGeometry(handle, rect));
        Ok(())
    }

    fn apply_style(&self, handle: NativeHandle, style: Style) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::ApplyStyle)?;
        state.record_mut(handle)?.spec.style = style;
        state.calls.push(BackendCall::ApplyStyle(handle, style));
        Ok(())
    }

    fn apply_text(&self, handle: NativeHandle, text: &str) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::ApplyText)?;
        state.record_mut(handle)?.spec.text = text.to_string();
        state.calls.push(BackendCall::ApplyText(handle, text.to_string()));
        Ok(())
    }

    fn apply_enabled(&self, handle: NativeHandle, enabled: bool) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::ApplyEnabled)?;
        state.record_mut(handle)?.spec.enabled = enabled;
        state.calls.push(BackendCall::ApplyEnabled(handle, enabled));
        Ok(())
    }

    fn request_repaint(&self, handle: NativeHandle) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::Repaint)?;
        state.record_mut(handle)?.repaint_requests += 1;
        state.calls.push(BackendCall::Repaint(handle));
        Ok(())
    }

    fn client_size(&self, handle: NativeHandle) -> Result<Size, BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::ClientSize)?;
        let record = state.record(handle)?;
        Ok(state.client_size_of(record))
    }

    fn window_rect(&self, handle: NativeHandle) -> Result<Rect, BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::WindowRect)?;
        Ok(state.record(handle)?.spec.rect)
    }

    fn read_text(&self, handle: NativeHandle) -> Result<String, BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::ReadText)?;
        Ok(state.record(handle)?.spec.text.clone())
    }

    fn begin_paint(&self, handle: NativeHandle) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::BeginPaint)?;
        state.record_mut(handle)?.painting = true;
        state.calls.push(BackendCall::BeginPaint(handle));
        Ok(())
    }

    fn end_paint(&self, handle: NativeHandle) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::EndPaint)?;
        state.record_mut(handle)?.painting = false;
        state.calls.push(BackendCall::EndPaint(handle));
        Ok(())
    }

    fn draw(&self, handle: NativeHandle, command: &DrawCommand) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state.check(BackendOp::Draw)?;
        if !state.record(handle)?.painting {
            return Err(BackendError::NotPainting(handle));
        }
        state.calls.push(BackendCall::Draw(handle, command.clone()));
        Ok(())
    }
}

static_assertions::assert_impl_all!(HeadlessBackend: Send, Sync);
