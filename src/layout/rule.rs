//! Layout rules: place a rectangle inside an available rectangle
//!
//! A [`Layout`] is the product of a [`Filling`] (size) and an [`Alignment`]
//! (origin). Filling always runs first because alignment such as centering
//! depends on the final size.

use std::fmt;
use std::sync::Arc;

use crate::geometry::Rect;

use super::axis::Axis;
use super::config::LayoutDirection;
use super::constraint::{constrain, ConstrainRect};

/// Caller-supplied pure function of the available rectangle
#[derive(Clone)]
pub struct Calculated(Arc<dyn Fn(Rect) -> f64 + Send + Sync>);

impl Calculated {
    pub fn new(f: impl Fn(Rect) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    fn eval(&self, available: Rect) -> f64 {
        (self.0)(available)
    }
}

impl fmt::Debug for Calculated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Calculated(..)")
    }
}

/// Origin rule for one axis
#[derive(Debug, Clone)]
pub enum AxisAlignment {
    /// Origin of the available rectangle
    Equal,
    /// Minimum edge plus offset
    Leading(f64),
    /// Maximum edge minus size minus offset
    Trailing(f64),
    /// Centered, then shifted by offset
    Center(f64),
    Calculated(Calculated),
}

impl AxisAlignment {
    pub fn left(offset: f64) -> Self {
        AxisAlignment::Leading(offset)
    }

    pub fn right(offset: f64) -> Self {
        AxisAlignment::Trailing(offset)
    }

    pub fn top(offset: f64) -> Self {
        AxisAlignment::Leading(offset)
    }

    pub fn bottom(offset: f64) -> Self {
        AxisAlignment::Trailing(offset)
    }

    pub fn center(offset: f64) -> Self {
        AxisAlignment::Center(offset)
    }

    /// Horizontal leading edge for the given reading direction
    pub fn leading(offset: f64, direction: LayoutDirection) -> Self {
        if direction.is_right_to_left() {
            AxisAlignment::Trailing(offset)
        } else {
            AxisAlignment::Leading(offset)
        }
    }

    /// Horizontal trailing edge for the given reading direction
    pub fn trailing(offset: f64, direction: LayoutDirection) -> Self {
        if direction.is_right_to_left() {
            AxisAlignment::Leading(offset)
        } else {
            AxisAlignment::Trailing(offset)
        }
    }

    pub fn calculated(f: impl Fn(Rect) -> f64 + Send + Sync + 'static) -> Self {
        AxisAlignment::Calculated(Calculated::new(f))
    }

    fn apply(&self, rect: &mut Rect, available: Rect, axis: Axis) {
        let origin = match self {
            AxisAlignment::Equal => axis.origin(&available),
            AxisAlignment::Leading(offset) => axis.min(&available) + offset,
            AxisAlignment::Trailing(offset) => {
                axis.max(&available) - axis.size(rect) - offset
            }
            AxisAlignment::Center(offset) => {
                axis.mid(&available) - axis.size(rect) / 2.0 + offset
            }
            AxisAlignment::Calculated(f) => f.eval(available),
        };
        axis.set_origin(rect, origin);
    }
}

/// Size rule for one axis
#[derive(Debug, Clone)]
pub enum AxisFilling {
    /// Dimension of the available rectangle
    Equal,
    Fixed(f64),
    /// Available dimension times the scale
    Scaled(f64),
    /// Available dimension minus the inset, never below zero
    Boxed(f64),
    Calculated(Calculated),
}

impl AxisFilling {
    pub fn fixed(value: f64) -> Self {
        AxisFilling::Fixed(value)
    }

    pub fn scaled(scale: f64) -> Self {
        AxisFilling::Scaled(scale)
    }

    pub fn boxed(inset: f64) -> Self {
        AxisFilling::Boxed(inset)
    }

    pub fn calculated(f: impl Fn(Rect) -> f64 + Send + Sync + 'static) -> Self {
        AxisFilling::Calculated(Calculated::new(f))
    }

    fn apply(&self, rect: &mut Rect, available: Rect, axis: Axis) {
        let size = match self {
            AxisFilling::Equal => axis.size(&available),
            AxisFilling::Fixed(value) => *value,
            AxisFilling::Scaled(scale) => axis.size(&available) * scale,
            AxisFilling::Boxed(inset) => (axis.size(&available) - inset).max(0.0),
            AxisFilling::Calculated(f) => f.eval(available),
        };
        axis.set_size(rect, size);
    }
}

/// Origin placement on both axes
#[derive(Debug, Clone)]
pub struct Alignment {
    pub horizontal: AxisAlignment,
    pub vertical: AxisAlignment,
}

impl Alignment {
    pub fn new(horizontal: AxisAlignment, vertical: AxisAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn equal() -> Self {
        Self::new(AxisAlignment::Equal, AxisAlignment::Equal)
    }

    pub fn apply(&self, rect: Rect, available: Rect) -> Rect {
        let mut rect = rect;
        self.vertical.apply(&mut rect, available, Axis::Vertical);
        self.horizontal.apply(&mut rect, available, Axis::Horizontal);
        rect
    }
}

/// Size determination on both axes
#[derive(Debug, Clone)]
pub struct Filling {
    pub horizontal: AxisFilling,
    pub vertical: AxisFilling,
}

impl Filling {
    pub fn new(horizontal: AxisFilling, vertical: AxisFilling) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn equal() -> Self {
        Self::new(AxisFilling::Equal, AxisFilling::Equal)
    }

    pub fn apply(&self, rect: Rect, available: Rect) -> Rect {
        let mut rect = rect;
        self.vertical.apply(&mut rect, available, Axis::Vertical);
        self.horizontal.apply(&mut rect, available, Axis::Horizontal);
        rect
    }
}

/// Alignment plus filling
#[derive(Debug, Clone)]
pub struct Layout {
    pub alignment: Alignment,
    pub filling: Filling,
}

impl Layout {
    pub fn new(alignment: Alignment, filling: Filling) -> Self {
        Self { alignment, filling }
    }

    /// Shorthand taking each axis rule directly
    pub fn with(x: AxisAlignment, y: AxisAlignment, width: AxisFilling, height: AxisFilling) -> Self {
        Self::new(Alignment::new(x, y), Filling::new(width, height))
    }

    pub fn equal() -> Self {
        Self::new(Alignment::equal(), Filling::equal())
    }

    pub fn apply(&self, rect: Rect, available: Rect) -> Rect {
        let filled = self.filling.apply(rect, available);
        self.alignment.apply(filled, available)
    }
}

/// Custom `(rect, available) -> rect` rule
#[derive(Clone)]
pub struct CustomLayout(Arc<dyn Fn(Rect, Rect) -> Rect + Send + Sync>);

impl CustomLayout {
    pub fn new(f: impl Fn(Rect, Rect) -> Rect + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for CustomLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomLayout(..)")
    }
}

/// Any rule that positions a rectangle inside an available rectangle
#[derive(Debug, Clone)]
pub enum RectLayout {
    Rule(Layout),
    /// Always produce this rectangle
    Constant(Rect),
    Custom(CustomLayout),
}

impl RectLayout {
    /// Result is always the available rectangle
    pub fn equal() -> Self {
        RectLayout::Rule(Layout::equal())
    }

    pub fn constant(value: Rect) -> Self {
        RectLayout::Constant(value)
    }

    pub fn custom(f: impl Fn(Rect, Rect) -> Rect + Send + Sync + 'static) -> Self {
        RectLayout::Custom(CustomLayout::new(f))
    }

    /// Lay out `rect` inside `available`
    pub fn layout(&self, rect: Rect, available: Rect) -> Rect {
        match self {
            RectLayout::Rule(layout) => layout.apply(rect, available),
            RectLayout::Constant(value) => *value,
            RectLayout::Custom(custom) => (custom.0)(rect, available),
        }
    }

    /// Fold `constraints` over `available` first, then lay out `rect` inside the result
    pub fn layout_constrained(&self, rect: Rect, available: Rect, constraints: &[ConstrainRect]) -> Rect {
        self.layout(rect, constrain(available, constraints))
    }
}

impl From<Layout> for RectLayout {
    fn from(layout: Layout) -> Self {
        RectLayout::Rule(layout)
    }
}

impl Default for RectLayout {
    fn default() -> Self {
        Self::equal()
    }
}
