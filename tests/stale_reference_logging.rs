//! Diagnostics emitted when a snapshot pass has to fall back to a frame that
//! was not computed in the pass. Records are captured per test thread so the
//! tests can run in parallel under one global logger.

use std::cell::RefCell;

use log::{Level, LevelFilter, Metadata, Record};
use pretty_assertions::assert_eq;
use rect_layout::layout::constraint::Bottom;
use rect_layout::{
    AxisAlignment, AxisFilling, CompletedRects, Dependency, ItemId, ItemTree, Layout, LayoutBlock,
    LayoutConfig, LayoutConstraint, LayoutNode, LayoutScheme, Rect, RectConstraint, RectLayout,
};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String, String)>> = RefCell::new(Vec::new());
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records.borrow_mut().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

fn capture() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Records at `level` from this crate, as captured on the current thread
fn captured(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(lvl, target, _)| *lvl == level && target == "rect_layout")
            .map(|(_, _, message)| message.clone())
            .collect()
    })
}

const SOURCE: Rect = Rect {
    origin: rect_layout::Point { x: 0.0, y: 0.0 },
    size: rect_layout::Size {
        width: 200.0,
        height: 200.0,
    },
};

fn bar(height: f64) -> RectLayout {
    Layout::with(
        AxisAlignment::left(0.0),
        AxisAlignment::top(0.0),
        AxisFilling::Equal,
        AxisFilling::fixed(height),
    )
    .into()
}

/// Body placed below a header that is only laid out after it
fn body_before_header() -> (ItemTree, ItemId, LayoutScheme) {
    let mut tree = ItemTree::new();
    let root = tree.add_item(SOURCE);
    let header = tree.add_child(root, Rect::new(0.0, 0.0, 200.0, 10.0));
    let body = tree.add_child(root, Rect::zero());
    let scheme = LayoutScheme::new(vec![
        LayoutNode::from(LayoutBlock::new(
            body,
            bar(50.0),
            vec![LayoutConstraint::frame(header, vec![Bottom::align(Dependency::Outer)])],
        )),
        LayoutNode::from(LayoutBlock::new(header, bar(30.0), vec![])),
    ]);
    (tree, header, scheme)
}

#[test]
fn test_stale_reference_logs_warning() {
    capture();
    let (tree, header, scheme) = body_before_header();

    let snapshot = scheme.snapshot(&tree, SOURCE).unwrap();
    assert_eq!(snapshot.children[0].frame, Rect::new(0.0, 10.0, 200.0, 50.0));

    let warnings = captured(Level::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains(&header.to_string()));
    assert!(warnings[0].contains("not computed in this pass"));
}

#[test]
fn test_stale_reference_logs_debug_when_warnings_disabled() {
    capture();
    let (tree, header, scheme) = body_before_header();
    let config = LayoutConfig::new().with_stale_reference_warnings(false);
    let mut completed = CompletedRects::from_config(&config);

    scheme.snapshot_with(&tree, SOURCE, &mut completed).unwrap();

    assert_eq!(captured(Level::Warn), Vec::<String>::new());
    let debug = captured(Level::Debug);
    assert_eq!(debug.len(), 1);
    assert!(debug[0].contains(&header.to_string()));
}

#[test]
fn test_container_reference_is_not_stale() {
    capture();
    let mut tree = ItemTree::new();
    let root = tree.add_item(SOURCE);
    let child = tree.add_child(root, Rect::zero());
    let block = LayoutBlock::new(
        child,
        RectLayout::equal(),
        vec![LayoutConstraint::layout_bounds(root, vec![RectConstraint::equal()])],
    );

    let snapshot = block.snapshot(&tree, Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
    assert_eq!(snapshot.frame, SOURCE);
    assert_eq!(captured(Level::Warn), Vec::<String>::new());
    assert_eq!(captured(Level::Debug), Vec::<String>::new());
}

#[test]
fn test_completed_reference_is_silent() {
    capture();
    let mut tree = ItemTree::new();
    let root = tree.add_item(SOURCE);
    let header = tree.add_child(root, Rect::zero());
    let body = tree.add_child(root, Rect::zero());
    let scheme = LayoutScheme::new(vec![
        LayoutNode::from(LayoutBlock::new(header, bar(30.0), vec![])),
        LayoutNode::from(LayoutBlock::new(
            body,
            bar(50.0),
            vec![LayoutConstraint::frame(header, vec![Bottom::align(Dependency::Outer)])],
        )),
    ]);

    scheme.snapshot(&tree, SOURCE).unwrap();
    assert_eq!(captured(Level::Warn), Vec::<String>::new());
}
