//! Widget base implementation.
//!
//! `WidgetBase` holds the state every widget shares: identity and lock,
//! the toolkit it belongs to, native handle, class name, style, text,
//! geometry, enabled flag, parent and children links, and the event table.
//! Concrete widgets embed it (directly or through
//! [`ControlBase`](super::ControlBase)) and expose it through
//! [`Widget::widget_base`](super::Widget::widget_base).
//!
//! # Model and native state
//!
//! Every setter updates the in-memory model first and then pushes the change
//! to the native resource, if one exists. A widget that has not been
//! displayed yet has no native resource; its setters are model-only updates
//! that succeed, and the native resource is later created from the current
//! model. When the native call fails the model keeps the new value and the
//! backend error is returned.
//!
//! # Locks
//!
//! Each widget has two locks. The re-entrant object lock serializes compound
//! operations (a model update followed by a native call). The state mutex
//! guards the fields themselves and is a leaf: no other lock is taken while
//! it is held, and it is never held across a backend call or a callback.

use std::fmt;
use std::sync::Weak;

use parking_lot::Mutex;
use tinygui_core::{Condition, EventTable, ObjectBase, ObjectGuard, ObjectId, ObjectType};

use super::painting::DrawCommand;
use super::style::Style;
use super::{WeakWidgetRef, WidgetRef};
use crate::backend::{BackendError, NativeHandle, NativeSpec};
use crate::error::{GuiError, GuiResult};
use crate::geometry::{Geometry, Point, PositionBounds, Rect, Size, SizeDelta};
use crate::toolkit::Toolkit;

struct WidgetState {
    native: Option<NativeHandle>,
    class_name: String,
    style: Style,
    text: String,
    geometry: Geometry,
    /// Client area size; `None` means it equals the effective size.
    client: Option<Size>,
    parent: Option<WeakWidgetRef>,
    /// Slots emptied by removal are reused by the next insert.
    children: Vec<Option<WidgetRef>>,
    painting: bool,
    destroyed: bool,
}

/// The base implementation for all widgets.
pub struct WidgetBase {
    object: ObjectBase,
    toolkit: Toolkit,
    this: WeakWidgetRef,
    enabled: Condition,
    state: Mutex<WidgetState>,
    events: EventTable<WidgetRef>,
}

impl WidgetBase {
    /// Create a widget base.
    ///
    /// `this` must point at the widget that embeds the base; construct the
    /// widget with [`Arc::new_cyclic`](std::sync::Arc::new_cyclic) to obtain it.
    pub fn new(
        toolkit: &Toolkit,
        this: WeakWidgetRef,
        kind: ObjectType,
        class_name: impl Into<String>,
        text: &str,
        style: Style,
        rect: Rect,
    ) -> Self {
        let object = ObjectBase::new(kind);
        let class_name = class_name.into();
        tracing::debug!(
            target: "tinygui::lifecycle",
            id = %object.id(),
            kind = kind.name(),
            class = %class_name,
            rect = %rect,
            "widget created"
        );

        Self {
            object,
            toolkit: toolkit.clone(),
            this,
            enabled: Condition::new(true),
            state: Mutex::new(WidgetState {
                native: None,
                class_name,
                style,
                text: text.to_string(),
                geometry: Geometry::new(rect),
                client: None,
                parent: None,
                children: Vec::new(),
                painting: false,
                destroyed: false,
            }),
            events: EventTable::new(toolkit.executor().clone()),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    #[inline]
    pub fn object(&self) -> &ObjectBase {
        &self.object
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.object.id()
    }

    #[inline]
    pub fn object_type(&self) -> ObjectType {
        self.object.object_type()
    }

    /// Acquire the widget's re-entrant lock.
    ///
    /// Asynchronous callbacks that touch widget state should hold it for
    /// the duration of a compound update.
    pub fn lock(&self) -> ObjectGuard<'_> {
        self.object.lock()
    }

    pub fn toolkit(&self) -> &Toolkit {
        &self.toolkit
    }

    /// A strong reference to the widget embedding this base.
    pub fn widget_ref(&self) -> GuiResult<WidgetRef> {
        self.this.upgrade().ok_or(GuiError::Detached(self.id()))
    }

    /// The widget's event table. Callbacks receive the widget as sender.
    pub fn events(&self) -> &EventTable<WidgetRef> {
        &self.events
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut WidgetState) -> T) -> GuiResult<T> {
        let mut state = self.state.lock();
        if state.destroyed {
            return Err(GuiError::Destroyed(self.id()));
        }
        Ok(f(&mut state))
    }

    fn native_result<T>(&self, result: Result<T, BackendError>) -> GuiResult<T> {
        result.map_err(|err| {
            tracing::warn!(target: "tinygui::backend", id = %self.id(), error = %err, "native call failed");
            GuiError::Backend(err)
        })
    }

    // =========================================================================
    // Model accessors
    // =========================================================================

    pub fn native_handle(&self) -> Option<NativeHandle> {
        self.state.lock().native
    }

    /// Whether a native resource exists.
    pub fn is_displayed(&self) -> bool {
        self.native_handle().is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.lock().destroyed
    }

    pub fn class_name(&self) -> String {
        self.state.lock().class_name.clone()
    }

    pub fn style(&self) -> Style {
        self.state.lock().style
    }

    pub fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    /// A copy of the full geometry model.
    pub fn geometry(&self) -> Geometry {
        self.state.lock().geometry
    }

    /// Effective position.
    pub fn position(&self) -> Point {
        self.state.lock().geometry.pos()
    }

    /// Effective size.
    pub fn size(&self) -> Size {
        self.state.lock().geometry.size()
    }

    /// Effective rectangle.
    pub fn rect(&self) -> Rect {
        self.state.lock().geometry.rect()
    }

    /// Last requested rectangle.
    pub fn real_rect(&self) -> Rect {
        self.state.lock().geometry.real_rect()
    }

    /// Size of the area children are laid out in.
    pub fn client_size(&self) -> Size {
        let state = self.state.lock();
        state.client.unwrap_or(state.geometry.size())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// The flag behind [`is_enabled`](Self::is_enabled), for gating slots.
    pub fn enabled_condition(&self) -> Condition {
        self.enabled.clone()
    }

    pub fn is_painting(&self) -> bool {
        self.state.lock().painting
    }

    // =========================================================================
    // Model updates
    // =========================================================================

    /// Request a size without touching the native resource.
    ///
    /// Returns the change of the effective size.
    pub fn set_size_model(&self, size: Size) -> GuiResult<SizeDelta> {
        self.with_state(|state| state.geometry.request_size(size))
    }

    /// Request a position without touching the native resource, clamping
    /// into `bounds` if given.
    pub fn set_position_model(&self, pos: Point, bounds: Option<&PositionBounds>) -> GuiResult<()> {
        self.with_state(|state| match bounds {
            Some(bounds) => state.geometry.request_pos_within(pos, bounds),
            None => state.geometry.request_pos(pos),
        })
    }

    /// Replace the size bounds without touching the native resource.
    pub fn set_size_bounds_model(&self, min: Size, max: Size) -> GuiResult<SizeDelta> {
        self.with_state(|state| state.geometry.set_size_bounds(min, max))?
    }

    /// Take geometry reported by the platform.
    pub fn adopt_rect(&self, rect: Rect) -> GuiResult<SizeDelta> {
        self.with_state(|state| state.geometry.adopt(rect))
    }

    /// Record a new client size. Returns the change from the previous one.
    pub fn set_client_size(&self, size: Size) -> GuiResult<SizeDelta> {
        self.with_state(|state| {
            let before = state.client.unwrap_or(state.geometry.size());
            state.client = Some(size);
            size.delta_from(before)
        })
    }

    /// Push the effective rectangle to the native resource.
    pub fn apply_native_geometry(&self) -> GuiResult<()> {
        let (native, rect) = self.with_state(|state| (state.native, state.geometry.rect()))?;
        match native {
            Some(handle) => self.native_result(self.toolkit.backend().apply_geometry(handle, rect)),
            None => Ok(()),
        }
    }

    pub fn set_enabled(&self, enabled: bool) -> GuiResult<()> {
        let _guard = self.lock();
        let native = self.with_state(|state| state.native)?;
        self.enabled.set(enabled);
        tracing::trace!(target: "tinygui::dispatch", id = %self.id(), enabled, "enabled changed");
        match native {
            Some(handle) => self.native_result(self.toolkit.backend().apply_enabled(handle, enabled)),
            None => Ok(()),
        }
    }

    pub fn set_text(&self, text: &str) -> GuiResult<()> {
        let _guard = self.lock();
        let native = self.with_state(|state| {
            state.text = text.to_string();
            state.native
        })?;
        match native {
            Some(handle) => self.native_result(self.toolkit.backend().apply_text(handle, text)),
            None => Ok(()),
        }
    }

    pub fn set_style(&self, style: Style) -> GuiResult<()> {
        let _guard = self.lock();
        let native = self.with_state(|state| {
            state.style = style;
            state.native
        })?;
        match native {
            Some(handle) => self.native_result(self.toolkit.backend().apply_style(handle, style)),
            None => Ok(()),
        }
    }

    /// Replace the model text with the native text.
    pub fn refresh_text(&self) -> GuiResult<()> {
        let _guard = self.lock();
        let Some(handle) = self.with_state(|state| state.native)? else {
            return Ok(());
        };
        let text = self.native_result(self.toolkit.backend().read_text(handle))?;
        self.with_state(|state| state.text = text)
    }

    /// Ask for a paint message.
    pub fn request_repaint(&self) -> GuiResult<()> {
        match self.with_state(|state| state.native)? {
            Some(handle) => self.native_result(self.toolkit.backend().request_repaint(handle)),
            None => Ok(()),
        }
    }

    /// The client size the platform reports, if displayed.
    pub fn native_client_size(&self) -> GuiResult<Option<Size>> {
        match self.with_state(|state| state.native)? {
            Some(handle) => self.native_result(self.toolkit.backend().client_size(handle)).map(Some),
            None => Ok(None),
        }
    }

    /// The outer rectangle the platform reports, if displayed.
    pub fn native_window_rect(&self) -> GuiResult<Option<Rect>> {
        match self.with_state(|state| state.native)? {
            Some(handle) => self.native_result(self.toolkit.backend().window_rect(handle)).map(Some),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn parent(&self) -> Option<WidgetRef> {
        self.state.lock().parent.as_ref().and_then(Weak::upgrade)
    }

    /// Live children in slot order.
    pub fn children(&self) -> Vec<WidgetRef> {
        self.state.lock().children.iter().flatten().cloned().collect()
    }

    pub fn child_count(&self) -> usize {
        self.state.lock().children.iter().flatten().count()
    }

    /// Number of child slots, including emptied ones.
    pub fn slot_count(&self) -> usize {
        self.state.lock().children.len()
    }

    /// Attach `child`, reusing the first empty slot.
    ///
    /// If this widget is already displayed, the child's native resources
    /// are created right away.
    pub fn add_child(&self, child: WidgetRef) -> GuiResult<()> {
        let parent_id = self.id();
        let child_id = child.widget_base().id();
        if child_id == parent_id {
            return Err(GuiError::CircularParentage {
                parent: parent_id,
                child: child_id,
            });
        }

        let mut ancestor = self.parent();
        while let Some(widget) = ancestor {
            if widget.widget_base().id() == child_id {
                return Err(GuiError::CircularParentage {
                    parent: parent_id,
                    child: child_id,
                });
            }
            ancestor = widget.widget_base().parent();
        }

        let native = {
            let _guard = self.lock();
            let native = self.with_state(|state| state.native)?;
            child.widget_base().link_parent(self.this.clone())?;

            let inserted = self
                .with_state(|state| insert_child(&mut state.children, child.clone()))
                .and_then(|inserted| inserted);
            if let Err(err) = inserted {
                child.widget_base().clear_parent();
                return Err(err);
            }
            native
        };

        tracing::debug!(target: "tinygui::lifecycle", parent = %parent_id, child = %child_id, "child added");

        match native {
            Some(handle) => child.widget_base().realize(Some(handle)).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Detach `child`, leaving its slot empty. A displayed child loses its
    /// native resources.
    pub fn remove_child(&self, child: &WidgetRef) -> GuiResult<()> {
        let child_id = child.widget_base().id();
        let removed = {
            let _guard = self.lock();
            self.with_state(|state| take_child(&mut state.children, child_id))?
        };

        let Some(removed) = removed else {
            return Err(GuiError::NotAChild {
                parent: self.id(),
                child: child_id,
            });
        };
        removed.widget_base().clear_parent();
        tracing::debug!(target: "tinygui::lifecycle", parent = %self.id(), child = %child_id, "child removed");
        removed.widget_base().unrealize()
    }

    fn link_parent(&self, parent: WeakWidgetRef) -> GuiResult<()> {
        let mut state = self.state.lock();
        if state.destroyed {
            return Err(GuiError::Destroyed(self.id()));
        }
        if state.parent.is_some() {
            return Err(GuiError::AlreadyParented { child: self.id() });
        }
        state.parent = Some(parent);
        Ok(())
    }

    fn clear_parent(&self) {
        self.state.lock().parent = None;
    }

    /// Empty the slot holding `child`. Used by a destroyed child.
    fn release_slot(&self, child: ObjectId) {
        let released = {
            let _guard = self.lock();
            take_child(&mut self.state.lock().children, child)
        };
        if released.is_some() {
            tracing::trace!(target: "tinygui::lifecycle", parent = %self.id(), %child, "slot released");
        }
    }

    // =========================================================================
    // Native lifecycle
    // =========================================================================

    /// Create the native resource for this widget and its subtree, in slot
    /// order. Already displayed widgets are left alone.
    pub(crate) fn realize(&self, parent: Option<NativeHandle>) -> GuiResult<NativeHandle> {
        let guard = self.lock();
        let spec = {
            let state = self.state.lock();
            if state.destroyed {
                return Err(GuiError::Destroyed(self.id()));
            }
            if let Some(handle) = state.native {
                return Ok(handle);
            }
            NativeSpec {
                kind: self.object_type(),
                class_name: state.class_name.clone(),
                text: state.text.clone(),
                style: state.style,
                rect: state.geometry.rect(),
                enabled: self.enabled.get(),
                parent,
                control_id: self.id(),
            }
        };

        let handle = self.native_result(self.toolkit.backend().create(&spec))?;
        self.state.lock().native = Some(handle);
        if let Ok(this) = self.widget_ref() {
            self.toolkit.register_route(handle, &this);
        }
        tracing::debug!(target: "tinygui::lifecycle", id = %self.id(), %handle, parent = ?parent, "native created");
        drop(guard);

        for child in self.children() {
            child.widget_base().realize(Some(handle))?;
        }
        Ok(handle)
    }

    /// Forget the native resources of this subtree and destroy them.
    fn unrealize(&self) -> GuiResult<()> {
        let Some(handle) = self.forget_natives() else {
            return Ok(());
        };
        // Destroying the top native takes its native children with it.
        self.native_result(self.toolkit.backend().destroy(handle))
    }

    fn forget_natives(&self) -> Option<NativeHandle> {
        let native = {
            let _guard = self.lock();
            let mut state = self.state.lock();
            state.painting = false;
            state.native.take()
        };
        for child in self.children() {
            child.widget_base().forget_natives();
        }
        if let Some(handle) = native {
            self.toolkit.unregister_route(handle);
        }
        native
    }

    /// Tear the widget down.
    ///
    /// The widget leaves its parent's child list, its children are detached
    /// and destroyed, its event table is cleared and its native resource is
    /// destroyed. Later mutators return [`GuiError::Destroyed`]. Destroying
    /// twice is a no-op.
    pub fn destroy(&self) -> GuiResult<()> {
        let guard = self.lock();
        let (parent, children, native) = {
            let mut state = self.state.lock();
            if state.destroyed {
                return Ok(());
            }
            state.destroyed = true;
            state.painting = false;
            (
                state.parent.take(),
                std::mem::take(&mut state.children),
                state.native.take(),
            )
        };

        if let Some(parent) = parent.as_ref().and_then(Weak::upgrade) {
            parent.widget_base().release_slot(self.id());
        }
        drop(guard);

        let mut first_error = None;
        for child in children.into_iter().flatten() {
            child.widget_base().clear_parent();
            if let Err(err) = child.destroy() {
                first_error.get_or_insert(err);
            }
        }

        let cleared = self.events.clear();
        if let Some(handle) = native {
            self.toolkit.unregister_route(handle);
            if let Err(err) = self.native_result(self.toolkit.backend().destroy(handle)) {
                first_error.get_or_insert(err);
            }
        }

        tracing::debug!(target: "tinygui::lifecycle", id = %self.id(), events = cleared, native = ?native, "widget destroyed");
        first_error.map_or(Ok(()), Err)
    }

    // =========================================================================
    // Painting
    // =========================================================================

    pub(crate) fn begin_paint(&self) -> GuiResult<()> {
        let Some(handle) = self.with_state(|state| state.native)? else {
            return Ok(());
        };
        self.native_result(self.toolkit.backend().begin_paint(handle))?;
        self.with_state(|state| state.painting = true)
    }

    pub(crate) fn end_paint(&self) -> GuiResult<()> {
        let native = {
            let mut state = self.state.lock();
            let was_painting = std::mem::replace(&mut state.painting, false);
            state.native.filter(|_| was_painting)
        };
        match native {
            Some(handle) => self.native_result(self.toolkit.backend().end_paint(handle)),
            None => Ok(()),
        }
    }

    /// Forward a draw command. Only valid inside a paint session.
    pub fn draw(&self, command: DrawCommand) -> GuiResult<()> {
        let handle = self.with_state(|state| match (state.painting, state.native) {
            (true, Some(handle)) => Some(handle),
            _ => None,
        })?;
        let handle = handle.ok_or(GuiError::NotPainting(self.id()))?;
        self.native_result(self.toolkit.backend().draw(handle, &command))
    }
}

fn insert_child(children: &mut Vec<Option<WidgetRef>>, child: WidgetRef) -> GuiResult<()> {
    if let Some(slot) = children.iter_mut().find(|slot| slot.is_none()) {
        *slot = Some(child);
        return Ok(());
    }
    children.try_reserve(1).map_err(|_| GuiError::AllocationFailed)?;
    children.push(Some(child));
    Ok(())
}

fn take_child(children: &mut [Option<WidgetRef>], id: ObjectId) -> Option<WidgetRef> {
    children
        .iter_mut()
        .find(|slot| slot.as_ref().is_some_and(|child| child.widget_base().id() == id))
        .and_then(Option::take)
}

impl Drop for WidgetBase {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if let Some(handle) = state.native.take() {
            self.toolkit.unregister_route(handle);
            match self.toolkit.backend().destroy(handle) {
                Ok(()) => {
                    tracing::debug!(target: "tinygui::lifecycle", id = %self.object.id(), %handle, "native destroyed on drop")
                }
                // A native parent destroyed first takes its children along.
                Err(err) => {
                    tracing::debug!(target: "tinygui::lifecycle", id = %self.object.id(), %handle, error = %err, "native already gone on drop")
                }
            }
        }
    }
}

impl fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("WidgetBase")
            .field("id", &self.object.id())
            .field("kind", &self.object.object_type())
            .field("class_name", &state.class_name)
            .field("native", &state.native)
            .field("geometry", &state.geometry)
            .field("enabled", &self.enabled.get())
            .field("children", &state.children.iter().flatten().count())
            .field("destroyed", &state.destroyed)
            .finish()
    }
}

static_assertions::assert_impl_all!(WidgetBase: Send, Sync);
