//! Anchor-based relayout of children when a container is resized.
//!
//! Every control carries an [`AnchorMask`] naming the container edges it is
//! attached to. When a container's client size changes by a delta, each
//! child is adjusted independently on each axis:
//!
//! | leading | trailing | effect                                   |
//! |---------|----------|------------------------------------------|
//! | yes     | yes      | stretch by the delta, recurse into child |
//! | no      | yes      | shift by the delta                       |
//! | yes     | no       | unchanged                                |
//! | no      | no       | re-centered in the container             |
//!
//! Calculations start from the child's *real* (last requested) geometry, so
//! a child clamped by its size bounds does not drift over repeated resizes.
//! The results go through the same clamped setters as any other geometry
//! change.
//!
//! # Locking
//!
//! A container's lock is never held while descending into its children.
//! For each child the child's lock is taken first; the container's lock is
//! taken second, and only when a centered axis needs the container's size.

use std::fmt::{self, Write};
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use tinygui_core::PerfSpan;
use tinygui_core::logging::span_names;

use crate::error::GuiResult;
use crate::geometry::{Point, Size, SizeDelta};
use crate::widget::{WidgetBase, WidgetRef};

/// The container edges a control is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorMask(u8);

impl AnchorMask {
    /// Attached to no edge; centered on both axes.
    pub const NONE: AnchorMask = AnchorMask(0);
    pub const LEFT: AnchorMask = AnchorMask(1);
    pub const RIGHT: AnchorMask = AnchorMask(2);
    pub const TOP: AnchorMask = AnchorMask(4);
    pub const BOTTOM: AnchorMask = AnchorMask(8);
    /// Attached to every edge; stretches on both axes.
    pub const ALL: AnchorMask = AnchorMask(15);

    /// Create a mask from raw bits. Bits above the low four are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if all edges in `other` are set.
    pub fn contains(self, other: AnchorMask) -> bool {
        (self.0 & other.0) == other.0
    }

    fn horizontal(self) -> AxisAnchor {
        AxisAnchor {
            leading: self.contains(Self::LEFT),
            trailing: self.contains(Self::RIGHT),
        }
    }

    fn vertical(self) -> AxisAnchor {
        AxisAnchor {
            leading: self.contains(Self::TOP),
            trailing: self.contains(Self::BOTTOM),
        }
    }
}

impl Default for AnchorMask {
    fn default() -> Self {
        Self::LEFT | Self::TOP
    }
}

/// Edge letters in `LRTB` order, `-` for a clear edge.
impl fmt::Display for AnchorMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (edge, letter) in [(Self::LEFT, 'L'), (Self::RIGHT, 'R'), (Self::TOP, 'T'), (Self::BOTTOM, 'B')] {
            f.write_char(if self.contains(edge) { letter } else { '-' })?;
        }
        Ok(())
    }
}

impl BitOr for AnchorMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        AnchorMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for AnchorMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for AnchorMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        AnchorMask(self.0 & rhs.0)
    }
}

impl Not for AnchorMask {
    type Output = Self;

    fn not(self) -> Self::Output {
        AnchorMask(!self.0 & 0x0F)
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisAnchor {
    leading: bool,
    trailing: bool,
}

impl AxisAnchor {
    fn is_centered(self) -> bool {
        !self.leading && !self.trailing
    }
}

/// New position and length on one axis, plus the delta to hand down to the
/// child's own children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisLayout {
    pos: i32,
    len: i32,
    recurse: i32,
}

fn relayout_axis(anchor: AxisAnchor, pos: i32, len: i32, delta: i32, parent_len: i32) -> AxisLayout {
    match (anchor.leading, anchor.trailing) {
        (true, true) => AxisLayout {
            pos,
            len: len + delta,
            recurse: delta,
        },
        (false, true) => AxisLayout {
            pos: pos + delta,
            len,
            recurse: 0,
        },
        (true, false) => AxisLayout { pos, len, recurse: 0 },
        // `parent_len` is the new length; the old one is `parent_len - delta`.
        (false, false) => AxisLayout {
            pos: pos + parent_len / 2 - (parent_len - delta) / 2,
            len,
            recurse: 0,
        },
    }
}

/// Adjust every child of `container` after its client size changed by
/// `delta`, recursing into stretched children.
///
/// All children are processed even if some fail; the first error is
/// returned.
pub fn propagate_resize(container: &WidgetBase, delta: SizeDelta) -> GuiResult<()> {
    if delta.is_zero() {
        return Ok(());
    }

    let _span = PerfSpan::new(span_names::RELAYOUT);
    let children = container.children();
    tracing::trace!(
        target: "tinygui::layout",
        container = %container.id(),
        dw = delta.dw,
        dh = delta.dh,
        children = children.len(),
        "propagating resize"
    );

    let mut first_error = None;
    for child in &children {
        let result = relayout_child(container, child, delta)
            .and_then(|recurse| propagate_resize(child.widget_base(), recurse));
        if let Err(err) = result {
            tracing::warn!(target: "tinygui::layout", child = %child.widget_base().id(), error = %err, "child relayout failed");
            first_error.get_or_insert(err);
        }
    }

    first_error.map_or(Ok(()), Err)
}

/// Apply the anchor rules to one child. Returns the delta the child's own
/// children must follow.
fn relayout_child(container: &WidgetBase, child: &WidgetRef, delta: SizeDelta) -> GuiResult<SizeDelta> {
    let anchor = child.anchor();
    let base = child.widget_base();
    let _child_guard = base.lock();

    let (horizontal, vertical) = (anchor.horizontal(), anchor.vertical());
    let parent_client = if horizontal.is_centered() || vertical.is_centered() {
        let _parent_guard = container.lock();
        container.client_size()
    } else {
        Size::default()
    };

    let real = base.real_rect();
    let x = relayout_axis(horizontal, real.x(), real.width(), delta.dw, parent_client.width);
    let y = relayout_axis(vertical, real.y(), real.height(), delta.dh, parent_client.height);

    let size = Size::new(x.len, y.len);
    let pos = Point::new(x.pos, y.pos);
    tracing::trace!(target: "tinygui::layout", child = %base.id(), ?anchor, from = %real, x = pos.x, y = pos.y, size = %size, "child relaid");

    if size != real.size {
        base.set_size_model(size)?;
    }
    if pos != real.origin {
        // Virtual so that controls clamp against their position bounds.
        child.move_to(pos)?;
    } else if size != real.size {
        base.apply_native_geometry()?;
    }

    Ok(SizeDelta::new(x.recurse, y.recurse))
}
