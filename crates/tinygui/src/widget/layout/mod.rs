//! Automatic relayout of children.
//!
//! Containers do not own a layout object. Each control states which edges
//! of its container it follows via an [`AnchorMask`], and the container
//! calls [`propagate_resize`] whenever its client size changes.

mod anchor;

pub use anchor::{AnchorMask, propagate_resize};
