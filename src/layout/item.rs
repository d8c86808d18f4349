//! Items: the externally owned things that carry frames
//!
//! The engine never owns items. Blocks and constraints hold an [`ItemId`]
//! handle and resolve it through a [`LayoutItems`] host on every use; a
//! handle that no longer resolves is the normal "inactive" case.
//!
//! [`ItemTree`] is a ready-made host on top of an `indextree` arena. It
//! follows the usual view-toolkit conventions: `frame` lives in the parent's
//! coordinate space, `bounds` is the item's own space, and assigning a frame
//! resizes the bounds to match.

use std::fmt;
use std::sync::Arc;

use indextree::{Arena, NodeId};

use crate::geometry::{Point, Rect, Size};

/// Non-owning handle to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(NodeId);

impl ItemId {
    pub fn node_id(self) -> NodeId {
        self.0
    }
}

impl From<NodeId> for ItemId {
    fn from(node: NodeId) -> Self {
        Self(node)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", usize::from(self.0))
    }
}

/// Read-only view of an item used while computing a snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InLayoutTime {
    pub frame: Rect,
    pub layout_bounds: Rect,
    pub super_item: Option<ItemId>,
    pub super_layout_bounds: Option<Rect>,
}

/// Capabilities the engine needs from the item hierarchy.
///
/// All accessors return `None` for handles that no longer resolve.
pub trait LayoutItems {
    /// Rectangle in the parent's coordinate space
    fn frame(&self, item: ItemId) -> Option<Rect>;

    fn set_frame(&mut self, item: ItemId, frame: Rect);

    /// Rectangle in the item's own coordinate space
    fn bounds(&self, item: ItemId) -> Option<Rect>;

    fn set_bounds(&mut self, item: ItemId, bounds: Rect);

    /// Space available to children; scrollable items report their content area
    fn layout_bounds(&self, item: ItemId) -> Option<Rect> {
        self.bounds(item)
    }

    fn super_item(&self, item: ItemId) -> Option<ItemId>;

    fn remove_from_super_item(&mut self, item: ItemId);

    /// Snapshot-time representative of the item
    fn in_layout_time(&self, item: ItemId) -> Option<InLayoutTime> {
        let super_item = self.super_item(item);
        Some(InLayoutTime {
            frame: self.frame(item)?,
            layout_bounds: self.layout_bounds(item)?,
            super_item,
            super_layout_bounds: super_item.and_then(|parent| self.layout_bounds(parent)),
        })
    }

    /// Convert `rect` from the bounds space of `from` into the bounds space of `to`
    fn convert(&self, rect: Rect, from: ItemId, to: ItemId) -> Rect;

    /// Size that best fits the item's content within `size`, for adjustable items
    fn size_that_fits(&self, _item: ItemId, _size: Size) -> Option<Size> {
        None
    }

    /// Baseline offset from the item's top, for text-bearing items
    fn baseline_position(&self, _item: ItemId) -> Option<f64> {
        None
    }
}

/// Intrinsic size measurement for adjustable items
#[derive(Clone)]
pub struct Measure(Arc<dyn Fn(Size) -> Size + Send + Sync>);

impl Measure {
    pub fn new(f: impl Fn(Size) -> Size + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Measure(..)")
    }
}

#[derive(Debug, Clone)]
struct ItemData {
    frame: Rect,
    bounds: Rect,
    layout_bounds: Option<Rect>,
    baseline: Option<f64>,
    measure: Option<Measure>,
}

impl ItemData {
    fn new(frame: Rect) -> Self {
        Self {
            frame,
            bounds: Rect::from_parts(Point::zero(), frame.size),
            layout_bounds: None,
            baseline: None,
            measure: None,
        }
    }
}

/// Arena-backed item hierarchy
#[derive(Debug, Default, Clone)]
pub struct ItemTree {
    arena: Arena<ItemData>,
}

impl ItemTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root item (a window, in toolkit terms)
    pub fn add_item(&mut self, frame: Rect) -> ItemId {
        ItemId(self.arena.new_node(ItemData::new(frame)))
    }

    /// Create an item attached to `parent`; it stays detached if `parent` is gone
    pub fn add_child(&mut self, parent: ItemId, frame: Rect) -> ItemId {
        let child = self.add_item(frame);
        self.attach(parent, child);
        child
    }

    /// Attach `child` as the last child of `parent`, detaching it from any previous parent
    pub fn attach(&mut self, parent: ItemId, child: ItemId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            log::warn!(target: "rect_layout", "cannot attach {} to {}: item not available", child, parent);
            return false;
        }
        child.0.detach(&mut self.arena);
        match parent.0.checked_append(child.0, &mut self.arena) {
            Ok(()) => true,
            Err(err) => {
                log::warn!(target: "rect_layout", "cannot attach {} to {}: {}", child, parent, err);
                false
            }
        }
    }

    /// Remove the item from its parent; it keeps its own children
    pub fn detach(&mut self, item: ItemId) {
        if self.contains(item) {
            item.0.detach(&mut self.arena);
        }
    }

    /// Deallocate the item and its subtree; outstanding handles become inactive
    pub fn remove(&mut self, item: ItemId) {
        if self.contains(item) {
            item.0.remove_subtree(&mut self.arena);
        }
    }

    pub fn contains(&self, item: ItemId) -> bool {
        !item.0.is_removed(&self.arena) && self.arena.get(item.0).is_some()
    }

    pub fn children(&self, item: ItemId) -> Vec<ItemId> {
        if !self.contains(item) {
            return vec![];
        }
        item.0.children(&self.arena).map(ItemId).collect()
    }

    /// Override the layout bounds, e.g. with a scrollable content area
    pub fn set_layout_bounds(&mut self, item: ItemId, layout_bounds: Option<Rect>) {
        if let Some(data) = self.data_mut(item) {
            data.layout_bounds = layout_bounds;
        }
    }

    /// Baseline offset from the item's top
    pub fn set_baseline(&mut self, item: ItemId, baseline: f64) {
        if let Some(data) = self.data_mut(item) {
            data.baseline = Some(baseline);
        }
    }

    /// Intrinsic size measurement used by content constraints
    pub fn set_measure(&mut self, item: ItemId, measure: Measure) {
        if let Some(data) = self.data_mut(item) {
            data.measure = Some(measure);
        }
    }

    fn data(&self, item: ItemId) -> Option<&ItemData> {
        if item.0.is_removed(&self.arena) {
            return None;
        }
        self.arena.get(item.0).map(|node| node.get())
    }

    fn data_mut(&mut self, item: ItemId) -> Option<&mut ItemData> {
        if item.0.is_removed(&self.arena) {
            return None;
        }
        self.arena.get_mut(item.0).map(|node| node.get_mut())
    }

    /// Path from the root down to `item`
    fn chain(&self, item: ItemId) -> Vec<ItemId> {
        let mut chain: Vec<ItemId> = item.0.ancestors(&self.arena).map(ItemId).collect();
        chain.reverse();
        chain
    }

    fn to_window(&self, item: ItemId, point: Point) -> Point {
        self.chain(item)
            .into_iter()
            .rev()
            .filter_map(|id| self.data(id))
            .fold(point, |p, data| {
                Point::new(
                    p.x + data.frame.origin.x - data.bounds.origin.x,
                    p.y + data.frame.origin.y - data.bounds.origin.y,
                )
            })
    }

    fn from_window(&self, item: ItemId, point: Point) -> Point {
        self.chain(item)
            .into_iter()
            .filter_map(|id| self.data(id))
            .fold(point, |p, data| {
                Point::new(
                    p.x - data.frame.origin.x + data.bounds.origin.x,
                    p.y - data.frame.origin.y + data.bounds.origin.y,
                )
            })
    }
}

impl LayoutItems for ItemTree {
    fn frame(&self, item: ItemId) -> Option<Rect> {
        self.data(item).map(|data| data.frame)
    }

    fn set_frame(&mut self, item: ItemId, frame: Rect) {
        if let Some(data) = self.data_mut(item) {
            data.frame = frame;
            data.bounds.size = frame.size;
        }
    }

    fn bounds(&self, item: ItemId) -> Option<Rect> {
        self.data(item).map(|data| data.bounds)
    }

    fn set_bounds(&mut self, item: ItemId, bounds: Rect) {
        if let Some(data) = self.data_mut(item) {
            data.bounds = bounds;
            data.frame.size = bounds.size;
        }
    }

    fn layout_bounds(&self, item: ItemId) -> Option<Rect> {
        self.data(item)
            .map(|data| data.layout_bounds.unwrap_or(data.bounds))
    }

    fn super_item(&self, item: ItemId) -> Option<ItemId> {
        if item.0.is_removed(&self.arena) {
            return None;
        }
        self.arena.get(item.0)?.parent().map(ItemId)
    }

    fn remove_from_super_item(&mut self, item: ItemId) {
        self.detach(item);
    }

    fn convert(&self, rect: Rect, from: ItemId, to: ItemId) -> Rect {
        if from == to || !self.contains(from) || !self.contains(to) {
            return rect;
        }
        let window = self.to_window(from, rect.origin);
        rect.with_origin(self.from_window(to, window))
    }

    fn size_that_fits(&self, item: ItemId, size: Size) -> Option<Size> {
        let measure = self.data(item)?.measure.as_ref()?;
        Some((measure.0)(size))
    }

    fn baseline_position(&self, item: ItemId) -> Option<f64> {
        self.data(item)?.baseline
    }
}
