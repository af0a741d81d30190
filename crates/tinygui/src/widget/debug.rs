//! Text dumps of widget trees.
//!
//! ```
//! use tinygui::{Button, Rect, Toolkit, TreeStyle, Widget, WidgetTreeDebug, Window};
//!
//! let (toolkit, _backend) = Toolkit::headless().unwrap();
//! let window = Window::new(&toolkit, "Quiz", Rect::new(0, 0, 200, 100));
//! window.add_child(Button::new(&toolkit, "Next", Rect::new(120, 70, 70, 20))).unwrap();
//!
//! let dump = WidgetTreeDebug::new().style(TreeStyle::Ascii).format(window.as_ref());
//! assert_eq!(dump.lines().count(), 2);
//! assert!(dump.lines().nth(1).unwrap().starts_with("`-- Button"));
//! ```

use std::fmt::{self, Write};

use super::Widget;

/// Characters used to draw tree branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

impl TreeStyle {
    /// (vertical, tee, corner)
    fn glyphs(self) -> (&'static str, &'static str, &'static str) {
        match self {
            TreeStyle::Ascii => ("|   ", "|-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}   ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
        }
    }
}

/// Formats a widget and its descendants, one line per widget.
///
/// Each line shows the widget's type, id, class name, effective geometry and,
/// for controls, the anchor mask.
#[derive(Debug, Clone, Default)]
pub struct WidgetTreeDebug {
    style: TreeStyle,
    max_depth: Option<usize>,
    show_text: bool,
}

impl WidgetTreeDebug {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Stop below `depth`; the root is depth 0.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Include each widget's text.
    pub fn show_text(mut self, show: bool) -> Self {
        self.show_text = show;
        self
    }

    /// Format the tree rooted at `root`.
    pub fn format(&self, root: &dyn Widget) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_tree(&mut output, root);
        output
    }

    /// Write the tree rooted at `root` into `out`.
    pub fn write_tree<W: Write>(&self, out: &mut W, root: &dyn Widget) -> fmt::Result {
        let mut prefix = String::new();
        self.write_node(out, root, 0, &mut prefix, None)
    }

    fn write_node<W: Write>(
        &self,
        out: &mut W,
        widget: &dyn Widget,
        depth: usize,
        prefix: &mut String,
        is_last: Option<bool>,
    ) -> fmt::Result {
        if self.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }

        let (vertical, tee, corner) = self.style.glyphs();
        out.write_str(prefix)?;
        if let Some(last) = is_last {
            out.write_str(if last { corner } else { tee })?;
        }

        let base = widget.widget_base();
        write!(out, "{} {} {} [{}]", base.object_type(), base.id(), base.class_name(), base.rect())?;
        if base.object_type().is_control() {
            write!(out, " anchor={}", widget.anchor())?;
        }
        if self.show_text {
            write!(out, " {:?}", base.text())?;
        }
        if base.is_destroyed() {
            out.write_str(" (destroyed)")?;
        }
        out.write_char('\n')?;

        let children = widget.children();
        let restore = prefix.len();
        if let Some(last) = is_last {
            prefix.push_str(if last { "    " } else { vertical });
        }
        let count = children.len();
        for (index, child) in children.iter().enumerate() {
            self.write_node(out, child.as_ref(), depth + 1, prefix, Some(index + 1 == count))?;
        }
        prefix.truncate(restore);
        Ok(())
    }
}
