//! Native style bits.
//!
//! Bit values follow the classic native window styles so a platform backend
//! can pass them through unchanged.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// A set of native style flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style(u32);

impl Style {
    /// No style bits.
    pub const NONE: Style = Style(0);

    /// Window has a sizing border; required for the user to resize it.
    pub const THICK_FRAME: Style = Style(0x0004_0000);

    /// Window has a maximize box.
    pub const MAXIMIZE_BOX: Style = Style(0x0001_0000);

    /// Window has a minimize box.
    pub const MINIMIZE_BOX: Style = Style(0x0002_0000);

    /// Window has a system menu.
    pub const SYSTEM_MENU: Style = Style(0x0008_0000);

    /// Window has a title bar.
    pub const CAPTION: Style = Style(0x00C0_0000);

    /// Thin border.
    pub const BORDER: Style = Style(0x0080_0000);

    /// Initially visible.
    pub const VISIBLE: Style = Style(0x1000_0000);

    /// Child of another native widget.
    pub const CHILD: Style = Style(0x4000_0000);

    /// Receives keyboard focus with the tab key.
    pub const TAB_STOP: Style = Style(0x0001_0000);

    /// Edit control spans several lines.
    pub const MULTILINE: Style = Style(0x0004);

    /// Edit control scrolls horizontally as text is typed.
    pub const AUTO_HSCROLL: Style = Style(0x0080);

    /// Edit control scrolls vertically as lines are added.
    pub const AUTO_VSCROLL: Style = Style(0x0040);

    /// Edit control accepts digits only.
    pub const NUMBER: Style = Style(0x2000);

    /// Static control notifies its parent of clicks.
    pub const NOTIFY: Style = Style(0x0100);

    /// A resizable top-level window with caption, system menu and both boxes.
    pub const OVERLAPPED_WINDOW: Style = Style(
        Self::CAPTION.0 | Self::SYSTEM_MENU.0 | Self::THICK_FRAME.0 | Self::MINIMIZE_BOX.0 | Self::MAXIMIZE_BOX.0,
    );

    /// A visible child control.
    pub const CONTROL: Style = Style(Self::CHILD.0 | Self::VISIBLE.0);

    /// Create a style from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if all bits of `flag` are set.
    pub fn has(self, flag: Style) -> bool {
        (self.0 & flag.0) == flag.0
    }

    /// This style with `flag` set or cleared.
    pub fn with(self, flag: Style, on: bool) -> Self {
        if on { self | flag } else { self & !flag }
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Style({:#010x})", self.0)
    }
}

impl BitOr for Style {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Style(self.0 | rhs.0)
    }
}

impl BitOrAssign for Style {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Style {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Style(self.0 & rhs.0)
    }
}

impl Not for Style {
    type Output = Self;

    fn not(self) -> Self::Output {
        Style(!self.0)
    }
}
