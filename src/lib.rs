//! Rect Layout - declarative rectangle layout for trees of positioned items
//!
//! Frames are computed from composable rules instead of being set by hand:
//! a [`Layout`] places and sizes a rectangle inside an available one, a
//! [`RectConstraint`] adjusts the available rectangle against a reference,
//! and [`LayoutBlock`]/[`LayoutScheme`] run whole passes over items owned by
//! a [`LayoutItems`] host such as the bundled [`ItemTree`].
//!
//! # Example
//!
//! ```rust
//! use rect_layout::{AxisAlignment, AxisFilling, ItemTree, Layout, LayoutBlock, LayoutItems, Rect};
//!
//! let mut tree = ItemTree::new();
//! let root = tree.add_item(Rect::new(0.0, 0.0, 300.0, 100.0));
//! let item = tree.add_child(root, Rect::zero());
//!
//! let layout = Layout::with(
//!     AxisAlignment::left(10.0),
//!     AxisAlignment::top(5.0),
//!     AxisFilling::fixed(50.0),
//!     AxisFilling::fixed(20.0),
//! );
//! LayoutBlock::new(item, layout.into(), vec![]).layout(&mut tree);
//!
//! assert_eq!(tree.frame(item), Some(Rect::new(10.0, 5.0, 50.0, 20.0)));
//! ```

pub mod geometry;
pub mod layout;

pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use layout::{
    constrain, Axis, AxisAlignment, AxisAnchor, AxisFilling, CompletedRects, ConfigError,
    ConstrainRect, ConstraintReference, ConstraintSwitch, Dependency, ItemId, ItemTree, Layout,
    LayoutBlock, LayoutConfig, LayoutConstraint, LayoutDirection, LayoutError, LayoutItems,
    LayoutNode, LayoutScheme, LayoutSnapshot, RectConstraint, RectLayout, StackDirection,
    StackLayoutScheme,
};
