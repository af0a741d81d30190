//! Integer geometry and the requested-versus-effective geometry model.
//!
//! Every widget keeps two views of its position and size:
//!
//! - the **real** values: exactly what was last requested, never clamped;
//! - the **effective** values: what is applied to the native widget, with
//!   the size clamped into `[min_size, max_size]` and, for controls, the
//!   position clamped into the control's [`PositionBounds`].
//!
//! Anchor relayout computes from the real values, so a child that was
//! clamped while its container was small regains its requested geometry
//! when the container grows back.

use std::fmt;

use crate::error::{GuiError, GuiResult};

/// A point in integer device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width and height in integer device units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Clamp each axis into `[min, max]`.
    pub fn clamp(self, min: Size, max: Size) -> Size {
        Size::new(
            self.width.clamp(min.width, max.width),
            self.height.clamp(min.height, max.height),
        )
    }

    /// The difference `self - earlier`.
    pub fn delta_from(self, earlier: Size) -> SizeDelta {
        SizeDelta::new(self.width - earlier.width, self.height - earlier.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A change of size on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizeDelta {
    pub dw: i32,
    pub dh: i32,
}

impl SizeDelta {
    pub const fn new(dw: i32, dh: i32) -> Self {
        Self { dw, dh }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.dw == 0 && self.dh == 0
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.origin.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.height
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} {}", self.origin.x, self.origin.y, self.size)
    }
}

/// Inclusive bounds on a control's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionBounds {
    min: Point,
    max: Point,
}

impl PositionBounds {
    /// Bounds that never clamp.
    pub const UNBOUNDED: Self = Self {
        min: Point::new(i32::MIN, i32::MIN),
        max: Point::new(i32::MAX, i32::MAX),
    };

    /// Create bounds; fails if `min` exceeds `max` on either axis.
    pub fn new(min: Point, max: Point) -> GuiResult<Self> {
        if min.x > max.x || min.y > max.y {
            return Err(GuiError::InvalidGeometry(format!(
                "position bounds min ({}, {}) exceeds max ({}, {})",
                min.x, min.y, max.x, max.y
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}

impl Default for PositionBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Requested and effective geometry of one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pos: Point,
    size: Size,
    real_pos: Point,
    real_size: Size,
    min_size: Size,
    max_size: Size,
}

impl Geometry {
    /// The smallest size a widget may take by default.
    pub const MIN_SIZE: Size = Size::new(0, 0);
    /// The largest size a widget may take by default.
    pub const MAX_SIZE: Size = Size::new(i32::MAX, i32::MAX);

    /// Geometry with default bounds, requesting `rect`.
    pub fn new(rect: Rect) -> Self {
        let mut geometry = Self {
            pos: rect.origin,
            size: Size::default(),
            real_pos: rect.origin,
            real_size: rect.size,
            min_size: Self::MIN_SIZE,
            max_size: Self::MAX_SIZE,
        };
        geometry.size = rect.size.clamp(geometry.min_size, geometry.max_size);
        geometry
    }

    /// Effective position.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Effective size, always within `[min_size, max_size]`.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Effective rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.pos, self.size)
    }

    /// Last requested position.
    #[inline]
    pub fn real_pos(&self) -> Point {
        self.real_pos
    }

    /// Last requested size.
    #[inline]
    pub fn real_size(&self) -> Size {
        self.real_size
    }

    /// Last requested rectangle.
    #[inline]
    pub fn real_rect(&self) -> Rect {
        Rect::from_parts(self.real_pos, self.real_size)
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn max_size(&self) -> Size {
        self.max_size
    }

    /// Request a size. Returns the change of the effective size.
    pub fn request_size(&mut self, size: Size) -> SizeDelta {
        let before = self.size;
        self.real_size = size;
        self.size = size.clamp(self.min_size, self.max_size);
        self.size.delta_from(before)
    }

    /// Request a position without clamping.
    pub fn request_pos(&mut self, pos: Point) {
        self.real_pos = pos;
        self.pos = pos;
    }

    /// Request a position clamped into `bounds`.
    pub fn request_pos_within(&mut self, pos: Point, bounds: &PositionBounds) {
        self.real_pos = pos;
        self.pos = bounds.clamp(pos);
    }

    /// Replace the size bounds and re-clamp the effective size from the
    /// last requested size. Returns the change of the effective size.
    pub fn set_size_bounds(&mut self, min: Size, max: Size) -> GuiResult<SizeDelta> {
        if min.width > max.width || min.height > max.height {
            return Err(GuiError::InvalidGeometry(format!(
                "size bounds min {min} exceeds max {max}"
            )));
        }
        let before = self.size;
        self.min_size = min;
        self.max_size = max;
        self.size = self.real_size.clamp(min, max);
        Ok(self.size.delta_from(before))
    }

    /// Adopt geometry reported by the platform, e.g. after the user moved
    /// or resized a window. Both views take the reported values.
    pub fn adopt(&mut self, rect: Rect) -> SizeDelta {
        let before = self.size;
        self.pos = rect.origin;
        self.real_pos = rect.origin;
        self.real_size = rect.size;
        self.size = rect.size.clamp(self.min_size, self.max_size);
        self.size.delta_from(before)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}
