//! Stack schemes: items laid out one after another along an axis
//!
//! Each item gets the space left over by the items before it, sliced off
//! the source rectangle along the stack axis. The cross axis always gets the
//! full extent of the source. The shared item layout decides where in its
//! slice an item lands and how big it is.

use serde::Deserialize;

use super::axis::Axis;
use super::block::{CompletedRects, LayoutBlock, LayoutSnapshot};
use super::config::LayoutConfig;
use super::error::LayoutError;
use super::item::{ItemId, LayoutItems};
use super::rule::RectLayout;
use super::scheme::union_of;
use crate::geometry::Rect;

/// End of the stack axis the first item starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackDirection {
    #[default]
    FromLeading,
    FromTrailing,
}

/// Items distributed along one axis in sequence order
#[derive(Debug, Clone)]
pub struct StackLayoutScheme {
    items: Vec<ItemId>,
    axis: Axis,
    direction: StackDirection,
    item_layout: RectLayout,
    spacing: f64,
}

impl StackLayoutScheme {
    /// Vertical stack from the leading end, items filling their slice, no spacing
    pub fn new(items: Vec<ItemId>) -> Self {
        Self {
            items,
            axis: Axis::Vertical,
            direction: StackDirection::FromLeading,
            item_layout: RectLayout::equal(),
            spacing: 0.0,
        }
    }

    pub fn from_config(items: Vec<ItemId>, config: &LayoutConfig) -> Self {
        Self::new(items)
            .with_spacing(config.stack_spacing)
            .with_direction(config.stack_direction)
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_direction(mut self, direction: StackDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_item_layout(mut self, layout: impl Into<RectLayout>) -> Self {
        self.item_layout = layout.into();
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn direction(&self) -> StackDirection {
        self.direction
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn is_active(&self, host: &dyn LayoutItems) -> bool {
        self.items.iter().any(|item| host.super_item(*item).is_some())
    }

    pub fn current_rect(&self, host: &dyn LayoutItems) -> Result<Rect, LayoutError> {
        self.current_snapshot(host).map(|snapshot| snapshot.frame)
    }

    pub fn current_snapshot(&self, host: &dyn LayoutItems) -> Result<LayoutSnapshot, LayoutError> {
        if self.items.is_empty() {
            return Err(LayoutError::EmptyScheme);
        }
        let children = self
            .blocks()
            .map(|block| block.current_snapshot(host))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LayoutSnapshot::node(union_of(&children), children))
    }

    /// Stack inside the parent's layout bounds of the first attached item
    pub fn layout(&self, host: &mut dyn LayoutItems) {
        let available = self
            .items
            .iter()
            .find_map(|item| host.super_item(*item))
            .and_then(|parent| host.layout_bounds(parent));
        match available {
            Some(available) => self.layout_in(host, available),
            None => log::warn!(target: "rect_layout", "stack skipped, no item is attached"),
        }
    }

    /// Stack inside `available`, writing frames as it goes; detached items take no space
    pub fn layout_in(&self, host: &mut dyn LayoutItems, available: Rect) {
        let mut previous: Option<Rect> = None;
        for block in self.blocks() {
            if !block.is_active(&*host) {
                log::warn!(
                    target: "rect_layout",
                    "stack item {} skipped, item is not available",
                    block.item()
                );
                continue;
            }
            block.layout_in(host, self.slice(available, previous));
            previous = host.frame(block.item()).or(previous);
        }
    }

    pub fn snapshot(
        &self,
        host: &dyn LayoutItems,
        available: Rect,
    ) -> Result<LayoutSnapshot, LayoutError> {
        let mut completed = CompletedRects::new();
        self.snapshot_with(host, available, &mut completed)
    }

    pub fn snapshot_with(
        &self,
        host: &dyn LayoutItems,
        available: Rect,
        completed: &mut CompletedRects,
    ) -> Result<LayoutSnapshot, LayoutError> {
        let mut previous: Option<Rect> = None;
        let mut children = Vec::with_capacity(self.items.len());
        for block in self.blocks() {
            let snapshot = block.snapshot_with(host, self.slice(available, previous), completed)?;
            previous = Some(snapshot.frame);
            children.push(snapshot);
        }
        Ok(LayoutSnapshot::node(union_of(&children), children))
    }

    pub fn apply(
        &self,
        host: &mut dyn LayoutItems,
        snapshot: &LayoutSnapshot,
    ) -> Result<(), LayoutError> {
        self.validate(&*host, snapshot)?;
        for (item, child) in self.items.iter().zip(&snapshot.children) {
            host.set_frame(*item, child.frame);
        }
        Ok(())
    }

    pub(crate) fn validate(
        &self,
        host: &dyn LayoutItems,
        snapshot: &LayoutSnapshot,
    ) -> Result<(), LayoutError> {
        if snapshot.children.len() != self.items.len() {
            return Err(LayoutError::mismatch(self.items.len(), snapshot.children.len()));
        }
        self.blocks()
            .zip(&snapshot.children)
            .try_for_each(|(block, child)| block.validate(host, child))
    }

    fn blocks(&self) -> impl Iterator<Item = LayoutBlock> + '_ {
        self.items
            .iter()
            .map(|item| LayoutBlock::new(*item, self.item_layout.clone(), vec![]))
    }

    /// Space left in `source` after the previously stacked frame
    fn slice(&self, source: Rect, previous: Option<Rect>) -> Rect {
        let Some(previous) = previous else {
            return source;
        };
        let axis = self.axis;
        let mut rect = source;
        match self.direction {
            StackDirection::FromLeading => {
                let min = axis.max(&previous) + self.spacing;
                axis.set_origin(&mut rect, min);
                axis.set_size(&mut rect, (axis.max(&source) - min).max(0.0));
            }
            StackDirection::FromTrailing => {
                let max = axis.min(&previous) - self.spacing;
                axis.set_size(&mut rect, (max - axis.min(&source)).max(0.0));
            }
        }
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::item::ItemTree;
    use crate::layout::rule::{AxisAlignment, AxisFilling, Layout};
    use pretty_assertions::assert_eq;

    fn setup(count: usize) -> (ItemTree, ItemId, Vec<ItemId>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut tree = ItemTree::new();
        let root = tree.add_item(Rect::new(0.0, 0.0, 100.0, 100.0));
        let items = (0..count).map(|_| tree.add_child(root, Rect::zero())).collect();
        (tree, root, items)
    }

    fn rows(height: f64, vertical: AxisAlignment) -> Layout {
        Layout::with(
            AxisAlignment::left(0.0),
            vertical,
            AxisFilling::Equal,
            AxisFilling::fixed(height),
        )
    }

    #[test]
    fn test_defaults() {
        let stack = StackLayoutScheme::new(vec![]);
        assert_eq!(stack.axis(), Axis::Vertical);
        assert_eq!(stack.direction(), StackDirection::FromLeading);
        assert_eq!(stack.spacing(), 0.0);

        let config = LayoutConfig::new()
            .with_stack_spacing(4.0)
            .with_stack_direction(StackDirection::FromTrailing);
        let stack = StackLayoutScheme::from_config(vec![], &config);
        assert_eq!(stack.spacing(), 4.0);
        assert_eq!(stack.direction(), StackDirection::FromTrailing);
    }

    #[test]
    fn test_vertical_stack_from_leading() {
        let (mut tree, _, items) = setup(3);
        let stack = StackLayoutScheme::new(items.clone())
            .with_item_layout(rows(10.0, AxisAlignment::top(0.0)));

        stack.layout(&mut tree);
        let frames: Vec<_> = items.iter().filter_map(|item| tree.frame(*item)).collect();
        assert_eq!(
            frames,
            vec![
                Rect::new(0.0, 0.0, 100.0, 10.0),
                Rect::new(0.0, 10.0, 100.0, 10.0),
                Rect::new(0.0, 20.0, 100.0, 10.0),
            ]
        );
        assert_eq!(stack.current_rect(&tree), Ok(Rect::new(0.0, 0.0, 100.0, 30.0)));
    }

    #[test]
    fn test_stack_from_trailing_with_spacing() {
        let (tree, _, items) = setup(2);
        let stack = StackLayoutScheme::new(items)
            .with_direction(StackDirection::FromTrailing)
            .with_spacing(5.0)
            .with_item_layout(rows(20.0, AxisAlignment::bottom(0.0)));

        let snapshot = stack.snapshot(&tree, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert_eq!(
            snapshot.leaf_frames(),
            vec![Rect::new(0.0, 80.0, 100.0, 20.0), Rect::new(0.0, 55.0, 100.0, 20.0)]
        );
        assert_eq!(snapshot.frame, Rect::new(0.0, 55.0, 100.0, 45.0));
    }

    #[test]
    fn test_horizontal_stack_uses_full_cross_extent() {
        let (tree, _, items) = setup(2);
        let stack = StackLayoutScheme::new(items)
            .with_axis(Axis::Horizontal)
            .with_spacing(10.0)
            .with_item_layout(Layout::with(
                AxisAlignment::left(0.0),
                AxisAlignment::center(0.0),
                AxisFilling::fixed(30.0),
                AxisFilling::scaled(0.5),
            ));

        let snapshot = stack.snapshot(&tree, Rect::new(0.0, 0.0, 100.0, 40.0)).unwrap();
        assert_eq!(
            snapshot.leaf_frames(),
            vec![Rect::new(0.0, 10.0, 30.0, 20.0), Rect::new(40.0, 10.0, 30.0, 20.0)]
        );
    }

    #[test]
    fn test_exhausted_space_clamps_to_zero() {
        let (tree, _, items) = setup(2);
        let stack = StackLayoutScheme::new(items);

        let snapshot = stack.snapshot(&tree, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert_eq!(
            snapshot.leaf_frames(),
            vec![Rect::new(0.0, 0.0, 100.0, 100.0), Rect::new(0.0, 100.0, 100.0, 0.0)]
        );
    }

    #[test]
    fn test_detached_item_takes_no_space() {
        let (mut tree, _, items) = setup(3);
        tree.detach(items[1]);
        let stack = StackLayoutScheme::new(items.clone())
            .with_item_layout(rows(10.0, AxisAlignment::top(0.0)));

        stack.layout_in(&mut tree, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(tree.frame(items[1]), Some(Rect::zero()));
        assert_eq!(tree.frame(items[2]), Some(Rect::new(0.0, 10.0, 100.0, 10.0)));
        assert_eq!(
            stack.snapshot(&tree, Rect::new(0.0, 0.0, 100.0, 100.0)),
            Err(LayoutError::inactive(items[1]))
        );
    }

    #[test]
    fn test_apply_round_trip() {
        let (mut tree, _, items) = setup(3);
        let stack = StackLayoutScheme::new(items)
            .with_spacing(2.0)
            .with_item_layout(rows(10.0, AxisAlignment::top(0.0)));

        let snapshot = stack.snapshot(&tree, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        stack.apply(&mut tree, &snapshot).unwrap();
        assert_eq!(stack.current_snapshot(&tree), Ok(snapshot));
        assert_eq!(
            stack.apply(&mut tree, &LayoutSnapshot::leaf(Rect::zero())),
            Err(LayoutError::mismatch(3, 0))
        );
    }
}
