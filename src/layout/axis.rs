//! Axis abstraction shared by the directional algorithms
//!
//! Top/bottom/left/right behaviors are all expressed as an [`Axis`] plus an
//! [`AxisAnchor`], so align/limit/pull exist exactly once.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Horizontal or vertical direction of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    pub fn origin(self, rect: &Rect) -> f64 {
        match self {
            Axis::Horizontal => rect.origin.x,
            Axis::Vertical => rect.origin.y,
        }
    }

    pub fn set_origin(self, rect: &mut Rect, value: f64) {
        match self {
            Axis::Horizontal => rect.origin.x = value,
            Axis::Vertical => rect.origin.y = value,
        }
    }

    pub fn size(self, rect: &Rect) -> f64 {
        match self {
            Axis::Horizontal => rect.size.width,
            Axis::Vertical => rect.size.height,
        }
    }

    pub fn set_size(self, rect: &mut Rect, value: f64) {
        match self {
            Axis::Horizontal => rect.size.width = value,
            Axis::Vertical => rect.size.height = value,
        }
    }

    pub fn min(self, rect: &Rect) -> f64 {
        self.origin(rect)
    }

    pub fn mid(self, rect: &Rect) -> f64 {
        self.origin(rect) + self.size(rect) / 2.0
    }

    pub fn max(self, rect: &Rect) -> f64 {
        self.origin(rect) + self.size(rect)
    }
}

/// Position on an axis, independent of reading direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisAnchor {
    /// Minimum coordinate (top or left)
    Leading,
    /// Maximum coordinate (bottom or right)
    Trailing,
    Center,
}

impl AxisAnchor {
    /// Coordinate of this anchor on `rect` along `axis`
    pub fn value(self, rect: &Rect, axis: Axis) -> f64 {
        match self {
            AxisAnchor::Leading => axis.min(rect),
            AxisAnchor::Trailing => axis.max(rect),
            AxisAnchor::Center => axis.mid(rect),
        }
    }
}

/// Side of an anchor line that a constrained rectangle occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The rectangle ends at the line
    Before,
    /// The rectangle starts at the line
    After,
}

/// Whether a directional constraint refers to the near or far side of the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependency {
    /// Flush with the reference's corresponding edge, inside it
    Inner,
    /// Just beyond the reference's edge
    Outer,
}

impl Dependency {
    /// Resolve the side for an edge whose line is `anchor` of the reference.
    ///
    /// A leading edge (top, left) keeps inner rectangles after the line; a
    /// trailing edge (bottom, right) keeps them before it.
    pub fn side(self, anchor: AxisAnchor) -> Side {
        match (anchor, self) {
            (AxisAnchor::Trailing, Dependency::Inner) => Side::Before,
            (AxisAnchor::Trailing, Dependency::Outer) => Side::After,
            (_, Dependency::Inner) => Side::After,
            (_, Dependency::Outer) => Side::Before,
        }
    }
}
