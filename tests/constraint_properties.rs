//! Integration tests for the pure rectangle algebra: constraint folding,
//! align/limit/pull edge behavior, reading direction, and layout rules.
//! No items are involved; everything here is a function of rectangles.

use pretty_assertions::assert_eq;
use rect_layout::layout::constraint::{
    Bottom, Center, CenterDependency, Leading, Left, Right, Size, Top, Trailing,
};
use rect_layout::layout::Side;
use rect_layout::{
    constrain, Axis, AxisAlignment, AxisAnchor, AxisFilling, Dependency, EdgeInsets, Layout, LayoutConfig,
    LayoutDirection, Rect, RectConstraint, RectLayout,
};

const REFERENCE: Rect = Rect {
    origin: rect_layout::Point { x: 0.0, y: 0.0 },
    size: rect_layout::Size {
        width: 100.0,
        height: 50.0,
    },
};

fn samples() -> Vec<Rect> {
    vec![
        Rect::zero(),
        Rect::new(10.0, 5.0, 50.0, 20.0),
        Rect::new(-30.0, 40.0, 300.0, 1.0),
        Rect::new(0.5, 0.25, 0.0, 99.0),
    ]
}

#[test]
fn test_equal_layout_returns_available() {
    for rect in samples() {
        for available in samples() {
            assert_eq!(Layout::equal().apply(rect, available), available);
            assert_eq!(RectLayout::equal().layout(rect, available), available);
        }
    }
}

#[test]
fn test_pull_then_limit_differs_from_limit_then_pull() {
    let source = Rect::new(0.0, 20.0, 100.0, 60.0);
    let pull_first = constrain(
        source,
        &[
            (REFERENCE, Bottom::pull(Dependency::Outer)),
            (REFERENCE, Bottom::limit(Dependency::Outer)),
        ],
    );
    let limit_first = constrain(
        source,
        &[
            (REFERENCE, Bottom::limit(Dependency::Outer)),
            (REFERENCE, Bottom::pull(Dependency::Outer)),
        ],
    );

    assert_eq!(pull_first, Rect::new(0.0, 50.0, 100.0, 30.0));
    assert_eq!(limit_first, Rect::new(0.0, 20.0, 100.0, 30.0));
    assert_ne!(pull_first, limit_first);
}

#[test]
fn test_limit_leaves_non_crossing_source_unchanged() {
    let below = Rect::new(0.0, 60.0, 100.0, 20.0);
    let beside = Rect::new(120.0, 0.0, 10.0, 10.0);

    assert_eq!(Bottom::limit(Dependency::Outer).constrained(below, REFERENCE), below);
    assert_eq!(Top::limit(Dependency::Inner).constrained(below, REFERENCE), below);
    assert_eq!(Right::limit(Dependency::Outer).constrained(beside, REFERENCE), beside);
    assert_eq!(Left::pull(Dependency::Inner).constrained(beside, REFERENCE), beside);
}

#[test]
fn test_crossing_source_pull_moves_limit_crops() {
    let source = Rect::new(80.0, 0.0, 40.0, 10.0);

    let pulled = Right::pull(Dependency::Outer).constrained(source, REFERENCE);
    assert_eq!(pulled, Rect::new(100.0, 0.0, 20.0, 10.0));
    assert!(!pulled.intersects(&REFERENCE));

    let limited = Right::limit(Dependency::Outer).constrained(source, REFERENCE);
    assert_eq!(limited, Rect::new(80.0, 0.0, 20.0, 10.0));

    // inner side of the right edge keeps the part inside the reference
    let kept = Right::limit(Dependency::Inner).constrained(source, REFERENCE);
    assert_eq!(kept, Rect::new(80.0, 0.0, 20.0, 10.0));
    assert_eq!(kept.max_x(), REFERENCE.max_x());
}

#[test]
fn test_leading_follows_reading_direction() {
    let source = Rect::new(0.0, 0.0, 30.0, 30.0);
    let rtl = LayoutConfig::new().with_direction(LayoutDirection::RightToLeft);

    assert_eq!(
        Leading::align(Dependency::Outer, rtl.direction).constrained(source, REFERENCE),
        Right::align(Dependency::Outer).constrained(source, REFERENCE)
    );
    assert_eq!(
        Leading::align(Dependency::Outer, LayoutDirection::LeftToRight)
            .constrained(source, REFERENCE),
        Left::align(Dependency::Outer).constrained(source, REFERENCE)
    );
    assert_eq!(
        Trailing::pull(Dependency::Inner, rtl.direction),
        Left::pull(Dependency::Inner)
    );
    assert_eq!(
        Leading::align(Dependency::Outer, rtl.direction).constrained(source, REFERENCE),
        Rect::new(100.0, 0.0, 30.0, 30.0)
    );
}

#[test]
fn test_leading_alignment_follows_reading_direction() {
    let available = Rect::new(0.0, 0.0, 200.0, 100.0);
    let layout = |direction| {
        Layout::with(
            AxisAlignment::leading(10.0, direction),
            AxisAlignment::top(0.0),
            AxisFilling::fixed(50.0),
            AxisFilling::fixed(20.0),
        )
    };

    assert_eq!(
        layout(LayoutDirection::LeftToRight).apply(Rect::zero(), available),
        Rect::new(10.0, 0.0, 50.0, 20.0)
    );
    assert_eq!(
        layout(LayoutDirection::RightToLeft).apply(Rect::zero(), available),
        Rect::new(140.0, 0.0, 50.0, 20.0)
    );
}

#[test]
fn test_boxed_filling_never_negative() {
    let layout = Layout::with(
        AxisAlignment::left(0.0),
        AxisAlignment::top(0.0),
        AxisFilling::boxed(30.0),
        AxisFilling::boxed(500.0),
    );

    let rect = layout.apply(Rect::zero(), Rect::new(0.0, 0.0, 100.0, 20.0));
    assert_eq!(rect, Rect::new(0.0, 0.0, 70.0, 0.0));
}

#[test]
fn test_concrete_fixed_layout() {
    let layout = Layout::with(
        AxisAlignment::left(10.0),
        AxisAlignment::top(5.0),
        AxisFilling::fixed(50.0),
        AxisFilling::fixed(20.0),
    );

    assert_eq!(
        layout.apply(Rect::zero(), Rect::new(0.0, 0.0, 300.0, 100.0)),
        Rect::new(10.0, 5.0, 50.0, 20.0)
    );
}

#[test]
fn test_constrained_layout_composes() {
    let available = Rect::new(0.0, 0.0, 300.0, 300.0);
    let rule: RectLayout = Layout::with(
        AxisAlignment::center(0.0),
        AxisAlignment::top(0.0),
        AxisFilling::scaled(0.5),
        AxisFilling::Equal,
    )
    .into();

    let rect = rule.layout_constrained(
        Rect::zero(),
        available,
        &[
            (REFERENCE, Bottom::align(Dependency::Outer)),
            (REFERENCE, Size::height(2.0)),
            (Rect::zero(), RectConstraint::insets(EdgeInsets::uniform(10.0))),
        ],
    );
    assert_eq!(rect, Rect::new(80.0, 60.0, 140.0, 80.0));
}

#[test]
fn test_center_and_composite() {
    let source = Rect::new(0.0, 0.0, 20.0, 10.0);
    assert_eq!(
        Center::align(CenterDependency::Center).constrained(source, REFERENCE),
        Rect::new(40.0, 20.0, 20.0, 10.0)
    );
    assert_eq!(
        Center::align(CenterDependency::Origin).constrained(source, REFERENCE),
        Rect::new(-10.0, -5.0, 20.0, 10.0)
    );

    let composite = RectConstraint::Composite(vec![
        Size::width(0.5),
        Left::align(Dependency::Outer),
    ]);
    assert_eq!(
        composite.constrained(source, REFERENCE),
        Rect::new(-50.0, 0.0, 50.0, 10.0)
    );
}

#[test]
fn test_edge_constructors_spell_out_side() {
    assert_eq!(
        Bottom::align(Dependency::Outer),
        RectConstraint::Align {
            axis: Axis::Vertical,
            anchor: AxisAnchor::Trailing,
            side: Side::After,
        }
    );
    assert_eq!(
        Left::limit(Dependency::Outer),
        RectConstraint::Limit {
            axis: Axis::Horizontal,
            anchor: AxisAnchor::Leading,
            side: Side::Before,
        }
    );

    let above = RectConstraint::Align {
        axis: Axis::Vertical,
        anchor: AxisAnchor::Leading,
        side: Side::Before,
    };
    assert_eq!(
        above.constrained(Rect::new(0.0, 0.0, 10.0, 20.0), Rect::new(0.0, 100.0, 10.0, 10.0)),
        Rect::new(0.0, 80.0, 10.0, 20.0)
    );
}
