//! Rectangle constraints: transforms of a source rectangle by a reference rectangle
//!
//! A [`RectConstraint`] is a pure function `(source, reference) -> source'`.
//! Lists of constraints are applied as a left fold, so order matters:
//! `[pull, limit]` and `[limit, pull]` on the same edge generally disagree.
//!
//! The directional façades ([`Top`], [`Bottom`], [`Left`], [`Right`],
//! [`Leading`], [`Trailing`]) only pick an axis, an anchor and a side; the
//! geometry lives in [`RectConstraint::constrained`].

use crate::geometry::{EdgeInsets, Rect};

use super::axis::{Axis, AxisAnchor, Dependency, Side};
use super::config::LayoutDirection;

/// A reference rectangle paired with the constraint applied against it
pub type ConstrainRect = (Rect, RectConstraint);

/// A stateless transform of a source rectangle by a reference rectangle
#[derive(Debug, Clone, PartialEq)]
pub enum RectConstraint {
    /// Snap the source's edge to the reference anchor line
    Align {
        axis: Axis,
        anchor: AxisAnchor,
        side: Side,
    },
    /// Center the source on the reference anchor line
    CenterAlign { axis: Axis, anchor: AxisAnchor },
    /// Crop the source's size when it crosses the line; origin never moves
    Limit {
        axis: Axis,
        anchor: AxisAnchor,
        side: Side,
    },
    /// Pull the crossing source flush to the line and drop the overlap
    Pull {
        axis: Axis,
        anchor: AxisAnchor,
        side: Side,
    },
    /// Place the source's origin at the reference bottom minus a baseline offset
    Baseline { offset: f64 },
    /// Shrink the source by the insets
    Inset(EdgeInsets),
    /// Source dimension on `axis` becomes the reference dimension times `multiplier`
    SizeRatio { axis: Axis, multiplier: f64 },
    /// Source becomes the reference
    Equal,
    /// Source becomes the zero rectangle
    Zero,
    /// Source becomes a fixed rectangle regardless of the reference
    Constant(Rect),
    /// Members folded in order against the same reference
    Composite(Vec<RectConstraint>),
}

impl RectConstraint {
    /// Apply this constraint to `source` using `reference`
    pub fn constrained(&self, source: Rect, reference: Rect) -> Rect {
        let mut rect = source;
        match self {
            RectConstraint::Align { axis, anchor, side } => {
                let line = anchor.value(&reference, *axis);
                let origin = match side {
                    Side::After => line,
                    Side::Before => line - axis.size(&rect),
                };
                axis.set_origin(&mut rect, origin);
            }
            RectConstraint::CenterAlign { axis, anchor } => {
                let line = anchor.value(&reference, *axis);
                let half = axis.size(&rect) / 2.0;
                axis.set_origin(&mut rect, line - half);
            }
            RectConstraint::Limit { axis, anchor, side } => {
                let line = anchor.value(&reference, *axis);
                if crosses(&rect, *axis, line) {
                    let size = match side {
                        Side::After => axis.max(&rect) - line,
                        Side::Before => line - axis.min(&rect),
                    };
                    axis.set_size(&mut rect, size);
                }
            }
            RectConstraint::Pull { axis, anchor, side } => {
                let line = anchor.value(&reference, *axis);
                if crosses(&rect, *axis, line) {
                    match side {
                        Side::After => {
                            let size = axis.max(&rect) - line;
                            axis.set_origin(&mut rect, line);
                            axis.set_size(&mut rect, size);
                        }
                        Side::Before => {
                            let size = line - axis.min(&rect);
                            axis.set_size(&mut rect, size);
                        }
                    }
                }
            }
            RectConstraint::Baseline { offset } => {
                rect.origin.y = reference.max_y() - offset;
            }
            RectConstraint::Inset(insets) => {
                rect = rect.inset_by(*insets);
            }
            RectConstraint::SizeRatio { axis, multiplier } => {
                axis.set_size(&mut rect, axis.size(&reference) * multiplier);
            }
            RectConstraint::Equal => rect = reference,
            RectConstraint::Zero => rect = Rect::zero(),
            RectConstraint::Constant(value) => rect = *value,
            RectConstraint::Composite(members) => {
                rect = members
                    .iter()
                    .fold(rect, |acc, member| member.constrained(acc, reference));
            }
        }
        rect
    }

    /// Shrink the source by `insets`
    pub fn insets(insets: EdgeInsets) -> Self {
        RectConstraint::Inset(insets)
    }

    /// Source becomes the reference rectangle
    pub fn equal() -> Self {
        RectConstraint::Equal
    }

    /// Source becomes the zero rectangle
    pub fn zero() -> Self {
        RectConstraint::Zero
    }

    /// Source becomes `value` regardless of the reference
    pub fn constant(value: Rect) -> Self {
        RectConstraint::Constant(value)
    }
}

/// Fold `constraints` over `source` in order, each step using its own reference
pub fn constrain(source: Rect, constraints: &[ConstrainRect]) -> Rect {
    constraints
        .iter()
        .fold(source, |acc, (reference, constraint)| {
            constraint.constrained(acc, *reference)
        })
}

/// Fold several constraints over `source`, all against one reference
pub fn constrain_by(source: Rect, reference: Rect, constraints: &[RectConstraint]) -> Rect {
    constraints
        .iter()
        .fold(source, |acc, constraint| constraint.constrained(acc, reference))
}

fn crosses(rect: &Rect, axis: Axis, line: f64) -> bool {
    axis.min(rect) < line && line < axis.max(rect)
}

/// Physical edge of the reference used by the directional façades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    fn axis_anchor(self) -> (Axis, AxisAnchor) {
        match self {
            Edge::Top => (Axis::Vertical, AxisAnchor::Leading),
            Edge::Bottom => (Axis::Vertical, AxisAnchor::Trailing),
            Edge::Left => (Axis::Horizontal, AxisAnchor::Leading),
            Edge::Right => (Axis::Horizontal, AxisAnchor::Trailing),
        }
    }

    fn align(self, dependency: Dependency) -> RectConstraint {
        let (axis, anchor) = self.axis_anchor();
        RectConstraint::Align {
            axis,
            anchor,
            side: dependency.side(anchor),
        }
    }

    fn limit(self, dependency: Dependency) -> RectConstraint {
        let (axis, anchor) = self.axis_anchor();
        RectConstraint::Limit {
            axis,
            anchor,
            side: dependency.side(anchor),
        }
    }

    fn pull(self, dependency: Dependency) -> RectConstraint {
        let (axis, anchor) = self.axis_anchor();
        RectConstraint::Pull {
            axis,
            anchor,
            side: dependency.side(anchor),
        }
    }

    fn leading(direction: LayoutDirection) -> Edge {
        if direction.is_right_to_left() {
            Edge::Right
        } else {
            Edge::Left
        }
    }

    fn trailing(direction: LayoutDirection) -> Edge {
        if direction.is_right_to_left() {
            Edge::Left
        } else {
            Edge::Right
        }
    }
}

/// Constraints against the top edge of the reference
pub struct Top;

impl Top {
    pub fn align(dependency: Dependency) -> RectConstraint {
        Edge::Top.align(dependency)
    }

    pub fn limit(dependency: Dependency) -> RectConstraint {
        Edge::Top.limit(dependency)
    }

    pub fn pull(dependency: Dependency) -> RectConstraint {
        Edge::Top.pull(dependency)
    }
}

/// Constraints against the bottom edge of the reference
pub struct Bottom;

impl Bottom {
    pub fn align(dependency: Dependency) -> RectConstraint {
        Edge::Bottom.align(dependency)
    }

    pub fn limit(dependency: Dependency) -> RectConstraint {
        Edge::Bottom.limit(dependency)
    }

    pub fn pull(dependency: Dependency) -> RectConstraint {
        Edge::Bottom.pull(dependency)
    }
}

/// Constraints against the left edge of the reference
pub struct Left;

impl Left {
    pub fn align(dependency: Dependency) -> RectConstraint {
        Edge::Left.align(dependency)
    }

    pub fn limit(dependency: Dependency) -> RectConstraint {
        Edge::Left.limit(dependency)
    }

    pub fn pull(dependency: Dependency) -> RectConstraint {
        Edge::Left.pull(dependency)
    }
}

/// Constraints against the right edge of the reference
pub struct Right;

impl Right {
    pub fn align(dependency: Dependency) -> RectConstraint {
        Edge::Right.align(dependency)
    }

    pub fn limit(dependency: Dependency) -> RectConstraint {
        Edge::Right.limit(dependency)
    }

    pub fn pull(dependency: Dependency) -> RectConstraint {
        Edge::Right.pull(dependency)
    }
}

/// Constraints against the leading edge: left, or right when right-to-left
pub struct Leading;

impl Leading {
    pub fn align(dependency: Dependency, direction: LayoutDirection) -> RectConstraint {
        Edge::leading(direction).align(dependency)
    }

    pub fn limit(dependency: Dependency, direction: LayoutDirection) -> RectConstraint {
        Edge::leading(direction).limit(dependency)
    }

    pub fn pull(dependency: Dependency, direction: LayoutDirection) -> RectConstraint {
        Edge::leading(direction).pull(dependency)
    }
}

/// Constraints against the trailing edge: right, or left when right-to-left
pub struct Trailing;

impl Trailing {
    pub fn align(dependency: Dependency, direction: LayoutDirection) -> RectConstraint {
        Edge::trailing(direction).align(dependency)
    }

    pub fn limit(dependency: Dependency, direction: LayoutDirection) -> RectConstraint {
        Edge::trailing(direction).limit(dependency)
    }

    pub fn pull(dependency: Dependency, direction: LayoutDirection) -> RectConstraint {
        Edge::trailing(direction).pull(dependency)
    }
}

/// What a center alignment lines the source's center up with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterDependency {
    /// The reference's center
    Center,
    /// The reference's origin corner
    Origin,
}

/// Center alignment on both axes
pub struct Center;

impl Center {
    pub fn align(dependency: CenterDependency) -> RectConstraint {
        let anchor = match dependency {
            CenterDependency::Center => AxisAnchor::Center,
            CenterDependency::Origin => AxisAnchor::Leading,
        };
        RectConstraint::Composite(vec![
            RectConstraint::CenterAlign {
                axis: Axis::Horizontal,
                anchor,
            },
            RectConstraint::CenterAlign {
                axis: Axis::Vertical,
                anchor,
            },
        ])
    }
}

/// Text baseline alignment
pub struct Baseline;

impl Baseline {
    /// `offset` is the baseline position measured from the source's top
    pub fn align(offset: f64) -> RectConstraint {
        RectConstraint::Baseline { offset }
    }
}

/// Size proportional to the reference
pub struct Size;

impl Size {
    pub fn width(multiplier: f64) -> RectConstraint {
        RectConstraint::SizeRatio {
            axis: Axis::Horizontal,
            multiplier,
        }
    }

    pub fn height(multiplier: f64) -> RectConstraint {
        RectConstraint::SizeRatio {
            axis: Axis::Vertical,
            multiplier,
        }
    }
}
