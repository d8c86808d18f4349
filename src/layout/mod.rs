//! Layout engine: constraints, layout rules, blocks and schemes
//!
//! Leaf to root: [`axis`] parameterizes directional logic, [`constraint`]
//! and [`rule`] are pure rectangle transforms, [`item`] is the host
//! capability set, [`related`] binds constraints to items, and [`block`],
//! [`scheme`] and [`stack`] sequence whole layout passes.
//!
//! The directional constraint façades (`Top`, `Leading`, `Size`, ...) live in
//! [`constraint`] and are used through that path.

pub mod axis;
pub mod block;
pub mod config;
pub mod constraint;
pub mod error;
pub mod item;
pub mod related;
pub mod rule;
pub mod scheme;
pub mod stack;

pub use axis::{Axis, AxisAnchor, Dependency, Side};
pub use block::{CompletedRects, LayoutBlock, LayoutSnapshot};
pub use config::{ConfigError, LayoutConfig, LayoutDirection};
pub use constraint::{constrain, constrain_by, ConstrainRect, RectConstraint};
pub use error::LayoutError;
pub use item::{InLayoutTime, ItemId, ItemTree, LayoutItems, Measure};
pub use related::{ConstraintReference, ConstraintSwitch, LayoutConstraint};
pub use rule::{
    Alignment, AxisAlignment, AxisFilling, Calculated, CustomLayout, Filling, Layout, RectLayout,
};
pub use scheme::{LayoutNode, LayoutScheme};
pub use stack::{StackDirection, StackLayoutScheme};
