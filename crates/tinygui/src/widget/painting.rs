//! Pens, brushes and draw commands.
//!
//! Drawing happens only inside a paint session, which the dispatcher opens
//! around every paint message. A paint callback draws through the widget
//! it received:
//!
//! ```ignore
//! let pen = Pen::new(Color::BLACK, 2);
//! let brush = Brush::new(Color::rgb(238, 228, 218));
//!
//! tile.set_on_paint(move |tile, _ctx, _args| {
//!     let rect = Rect::from_parts(Point::default(), tile.size());
//!     let _ = tile.draw_rect(rect, Some(&pen), Some(&brush));
//! }, EventContext::none(), SyncMode::Sync)?;
//! ```

use tinygui_core::{Object, ObjectBase, ObjectType};

use crate::geometry::{Point, Rect};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Line pattern of a pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PenStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    /// Draws nothing; useful to fill without an outline.
    Null,
}

/// The stroke a pen describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stroke {
    pub color: Color,
    pub width: i32,
    pub style: PenStyle,
}

/// The fill a brush describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fill {
    pub color: Color,
}

/// A stroke description used while painting.
#[derive(Debug)]
pub struct Pen {
    base: ObjectBase,
    stroke: Stroke,
}

impl Pen {
    pub fn new(color: Color, width: i32) -> Self {
        Self {
            base: ObjectBase::new(ObjectType::Pen),
            stroke: Stroke {
                color,
                width: width.max(0),
                style: PenStyle::Solid,
            },
        }
    }

    pub fn with_style(mut self, style: PenStyle) -> Self {
        self.stroke.style = style;
        self
    }

    pub fn stroke(&self) -> Stroke {
        self.stroke
    }
}

impl Object for Pen {
    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

/// A fill description used while painting.
#[derive(Debug)]
pub struct Brush {
    base: ObjectBase,
    fill: Fill,
}

impl Brush {
    pub fn new(color: Color) -> Self {
        Self {
            base: ObjectBase::new(ObjectType::Brush),
            fill: Fill { color },
        }
    }

    pub fn fill(&self) -> Fill {
        self.fill
    }
}

impl Object for Brush {
    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

/// A drawing primitive forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Rect {
        rect: Rect,
        stroke: Option<Stroke>,
        fill: Option<Fill>,
    },
    Ellipse {
        rect: Rect,
        stroke: Option<Stroke>,
        fill: Option<Fill>,
    },
    Polygon {
        points: Vec<Point>,
        stroke: Option<Stroke>,
        fill: Option<Fill>,
    },
}
