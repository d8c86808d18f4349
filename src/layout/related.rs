//! Constraints bound to items
//!
//! A [`LayoutConstraint`] pairs a reference source (another item's frame,
//! layout bounds, baseline or measured content, or a fixed rectangle) with an
//! ordered list of [`RectConstraint`] anchors. The reference is resolved at
//! layout time and converted into the coordinate space of the constrained
//! item's parent before the anchors are folded over the source rectangle.

use std::cell::Cell;
use std::rc::Rc;

use super::block::CompletedRects;
use super::constraint::{constrain_by, RectConstraint};
use super::error::LayoutError;
use super::item::{ItemId, LayoutItems};
use crate::geometry::{Point, Rect};

/// Where a constraint takes its reference rectangle from
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintReference {
    /// The item's frame, in its parent's space
    Frame(ItemId),
    /// The item's layout bounds, in its own space
    LayoutBounds(ItemId),
    /// A zero-height line at the item's baseline
    Baseline(ItemId),
    /// The source origin with the item's fitting size
    Content(ItemId),
    /// A fixed rectangle already in the target space
    Rect(Rect),
}

/// Shared on/off flag for toggling constraints without rebuilding lists.
///
/// Clones share the same flag. The flag is `Rc`-backed, so anything holding
/// one stays on the thread that built it.
#[derive(Debug, Clone)]
pub struct ConstraintSwitch(Rc<Cell<bool>>);

impl ConstraintSwitch {
    pub fn new(is_on: bool) -> Self {
        Self(Rc::new(Cell::new(is_on)))
    }

    pub fn is_on(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, is_on: bool) {
        self.0.set(is_on);
    }

    pub fn toggle(&self) {
        self.0.set(!self.0.get());
    }
}

impl Default for ConstraintSwitch {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Item-bound constraint: a reference source plus ordered anchors
#[derive(Debug, Clone)]
pub struct LayoutConstraint {
    reference: ConstraintReference,
    anchors: Vec<RectConstraint>,
    switch: Option<ConstraintSwitch>,
}

impl LayoutConstraint {
    pub fn new(reference: ConstraintReference, anchors: Vec<RectConstraint>) -> Self {
        Self {
            reference,
            anchors,
            switch: None,
        }
    }

    pub fn frame(item: ItemId, anchors: Vec<RectConstraint>) -> Self {
        Self::new(ConstraintReference::Frame(item), anchors)
    }

    pub fn layout_bounds(item: ItemId, anchors: Vec<RectConstraint>) -> Self {
        Self::new(ConstraintReference::LayoutBounds(item), anchors)
    }

    pub fn baseline(item: ItemId, anchors: Vec<RectConstraint>) -> Self {
        Self::new(ConstraintReference::Baseline(item), anchors)
    }

    pub fn content(item: ItemId, anchors: Vec<RectConstraint>) -> Self {
        Self::new(ConstraintReference::Content(item), anchors)
    }

    pub fn rect(rect: Rect, anchors: Vec<RectConstraint>) -> Self {
        Self::new(ConstraintReference::Rect(rect), anchors)
    }

    /// Gate the constraint behind a switch
    pub fn with_switch(mut self, switch: ConstraintSwitch) -> Self {
        self.switch = Some(switch);
        self
    }

    pub fn reference(&self) -> &ConstraintReference {
        &self.reference
    }

    pub fn anchors(&self) -> &[RectConstraint] {
        &self.anchors
    }

    pub fn switch(&self) -> Option<&ConstraintSwitch> {
        self.switch.as_ref()
    }

    pub fn referenced_item(&self) -> Option<ItemId> {
        match self.reference {
            ConstraintReference::Frame(item)
            | ConstraintReference::LayoutBounds(item)
            | ConstraintReference::Baseline(item)
            | ConstraintReference::Content(item) => Some(item),
            ConstraintReference::Rect(_) => None,
        }
    }

    /// Independent constraints never consult the completed-rects ledger
    pub fn is_independent(&self) -> bool {
        matches!(
            self.reference,
            ConstraintReference::Content(_) | ConstraintReference::Rect(_)
        )
    }

    pub fn is_active(&self, host: &dyn LayoutItems) -> bool {
        let switched_on = self.switch.as_ref().map_or(true, ConstraintSwitch::is_on);
        let attached = match self.referenced_item() {
            Some(item) => host.super_item(item).is_some(),
            None => true,
        };
        switched_on && attached
    }

    /// Reference rectangle from live item state, in the space of `target`
    pub fn reference_rect(
        &self,
        host: &dyn LayoutItems,
        source: Rect,
        target: ItemId,
    ) -> Result<Rect, LayoutError> {
        self.resolve_reference(host, source, target, None)
    }

    /// Fold the anchors over `source` using live item state
    pub fn constrain(
        &self,
        host: &dyn LayoutItems,
        source: Rect,
        target: ItemId,
    ) -> Result<Rect, LayoutError> {
        let reference = self.reference_rect(host, source, target)?;
        Ok(constrain_by(source, reference, &self.anchors))
    }

    /// Fold the anchors over `source`, preferring frames already completed in this pass.
    ///
    /// Completed frames are used for the referenced item and for every
    /// ancestor on the conversion path, so the result matches what immediate
    /// layout would see after writing the same frames.
    pub fn constrain_completed(
        &self,
        host: &dyn LayoutItems,
        source: Rect,
        target: ItemId,
        completed: &CompletedRects,
    ) -> Result<Rect, LayoutError> {
        let is_stale = self
            .referenced_item()
            .map_or(false, |item| completed.get(item).is_none());
        if is_stale {
            self.report_stale(target, completed);
        }
        let reference = self.resolve_reference(host, source, target, Some(completed))?;
        Ok(constrain_by(source, reference, &self.anchors))
    }

    fn resolve_reference(
        &self,
        host: &dyn LayoutItems,
        source: Rect,
        target: ItemId,
        completed: Option<&CompletedRects>,
    ) -> Result<Rect, LayoutError> {
        let completed_frame = |item: ItemId| completed.and_then(|rects| rects.get(item));

        match self.reference {
            ConstraintReference::Frame(item) => {
                let parent = parent_of(host, item)?;
                let frame = match completed_frame(item) {
                    Some(frame) => frame,
                    None => frame_of(host, item)?,
                };
                Ok(convert_in_pass(host, frame, parent, target, completed))
            }
            ConstraintReference::LayoutBounds(item) => {
                let layout_bounds = host
                    .layout_bounds(item)
                    .ok_or_else(|| LayoutError::missing_super_item(item))?;
                let Some(frame) = completed_frame(item) else {
                    return Ok(convert_in_pass(host, layout_bounds, item, target, completed));
                };
                // express the layout bounds in the parent's space through the new frame
                let parent = parent_of(host, item)?;
                let bounds = host.bounds(item).unwrap_or(layout_bounds);
                let size = if layout_bounds == bounds {
                    frame.size
                } else {
                    layout_bounds.size
                };
                let origin = Point::new(
                    frame.origin.x + layout_bounds.origin.x - bounds.origin.x,
                    frame.origin.y + layout_bounds.origin.y - bounds.origin.y,
                );
                let rect = Rect::from_parts(origin, size);
                Ok(convert_in_pass(host, rect, parent, target, completed))
            }
            ConstraintReference::Baseline(item) => {
                let parent = parent_of(host, item)?;
                let frame = match completed_frame(item) {
                    Some(frame) => frame,
                    None => frame_of(host, item)?,
                };
                let line = baseline_line(host, item, frame);
                Ok(convert_in_pass(host, line, parent, target, completed))
            }
            ConstraintReference::Content(item) => {
                let size = host
                    .size_that_fits(item, source.size)
                    .or_else(|| host.frame(item).map(|frame| frame.size))
                    .ok_or_else(|| LayoutError::missing_super_item(item))?;
                Ok(source.with_size(size))
            }
            ConstraintReference::Rect(rect) => Ok(rect),
        }
    }

    fn report_stale(&self, target: ItemId, completed: &CompletedRects) {
        if self.is_independent() {
            return;
        }
        // the container itself is never part of the pass
        let Some(item) = self.referenced_item().filter(|item| *item != target) else {
            return;
        };
        if completed.warns_on_stale_reference() {
            log::warn!(
                target: "rect_layout",
                "constraint on {} operates with a frame not computed in this pass",
                item
            );
        } else {
            log::debug!(
                target: "rect_layout",
                "constraint on {} falls back to the current frame",
                item
            );
        }
    }
}

fn parent_of(host: &dyn LayoutItems, item: ItemId) -> Result<ItemId, LayoutError> {
    host.super_item(item)
        .ok_or_else(|| LayoutError::missing_super_item(item))
}

fn frame_of(host: &dyn LayoutItems, item: ItemId) -> Result<Rect, LayoutError> {
    host.frame(item)
        .ok_or_else(|| LayoutError::missing_super_item(item))
}

fn baseline_line(host: &dyn LayoutItems, item: ItemId, frame: Rect) -> Rect {
    let baseline = host.baseline_position(item).unwrap_or(frame.height());
    let mut line = frame.offset_by(0.0, baseline);
    line.size.height = 0.0;
    line
}

/// Convert `rect` from the bounds space of `from` into that of `to`.
///
/// Inside a snapshot pass, completed frames stand in for the live frames of
/// every item on both ancestor chains.
fn convert_in_pass(
    host: &dyn LayoutItems,
    rect: Rect,
    from: ItemId,
    to: ItemId,
    completed: Option<&CompletedRects>,
) -> Rect {
    if from == to {
        return rect;
    }
    let Some(completed) = completed else {
        return host.convert(rect, from, to);
    };
    let from_offset = window_offset(host, from, completed);
    let to_offset = window_offset(host, to, completed);
    rect.offset_by(from_offset.x - to_offset.x, from_offset.y - to_offset.y)
}

/// Offset from the bounds space of `item` to window space
fn window_offset(host: &dyn LayoutItems, item: ItemId, completed: &CompletedRects) -> Point {
    let mut offset = Point::zero();
    let mut current = Some(item);
    while let Some(id) = current {
        let frame = completed.get(id).or_else(|| host.frame(id));
        if let (Some(frame), Some(bounds)) = (frame, host.bounds(id)) {
            offset.x += frame.origin.x - bounds.origin.x;
            offset.y += frame.origin.y - bounds.origin.y;
        }
        current = host.super_item(id);
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::layout::axis::Dependency;
    use crate::layout::constraint::{Baseline, Bottom, Left, Top};
    use crate::layout::item::{ItemTree, Measure};
    use pretty_assertions::assert_eq;

    fn tree() -> (ItemTree, ItemId, ItemId) {
        let mut tree = ItemTree::new();
        let root = tree.add_item(Rect::new(0.0, 0.0, 400.0, 400.0));
        let anchor = tree.add_child(root, Rect::new(20.0, 30.0, 100.0, 40.0));
        (tree, root, anchor)
    }

    #[test]
    fn test_frame_reference() {
        let (tree, root, anchor) = tree();
        let constraint = LayoutConstraint::frame(anchor, vec![Bottom::align(Dependency::Outer)]);

        let result = constraint
            .constrain(&tree, Rect::new(0.0, 0.0, 50.0, 50.0), root)
            .unwrap();
        assert_eq!(result, Rect::new(0.0, 70.0, 50.0, 50.0));
    }

    #[test]
    fn test_frame_reference_converts_between_parents() {
        let (mut tree, root, anchor) = tree();
        let container = tree.add_child(root, Rect::new(200.0, 0.0, 200.0, 200.0));
        let constraint = LayoutConstraint::frame(anchor, vec![Left::align(Dependency::Inner)]);

        let reference = constraint
            .reference_rect(&tree, Rect::zero(), container)
            .unwrap();
        assert_eq!(reference, Rect::new(-180.0, 30.0, 100.0, 40.0));
    }

    #[test]
    fn test_layout_bounds_reference() {
        let (tree, _, anchor) = tree();
        let constraint = LayoutConstraint::layout_bounds(anchor, vec![RectConstraint::equal()]);

        let result = constraint.constrain(&tree, Rect::zero(), anchor).unwrap();
        assert_eq!(result, Rect::new(0.0, 0.0, 100.0, 40.0));
    }

    #[test]
    fn test_baseline_reference() {
        let (mut tree, root, anchor) = tree();
        tree.set_baseline(anchor, 30.0);
        let constraint = LayoutConstraint::baseline(anchor, vec![Baseline::align(12.0)]);

        let result = constraint
            .constrain(&tree, Rect::new(200.0, 0.0, 50.0, 16.0), root)
            .unwrap();
        assert_eq!(result, Rect::new(200.0, 48.0, 50.0, 16.0));
    }

    #[test]
    fn test_content_reference_is_independent() {
        let (mut tree, root, anchor) = tree();
        tree.set_measure(anchor, Measure::new(|max| Size::new(max.width.min(60.0), 18.0)));
        let constraint = LayoutConstraint::content(anchor, vec![RectConstraint::equal()]);
        assert!(constraint.is_independent());

        let result = constraint
            .constrain(&tree, Rect::new(10.0, 10.0, 200.0, 200.0), root)
            .unwrap();
        assert_eq!(result, Rect::new(10.0, 10.0, 60.0, 18.0));
    }

    #[test]
    fn test_activity_follows_item_and_switch() {
        let (mut tree, _, anchor) = tree();
        let switch = ConstraintSwitch::default();
        let constraint = LayoutConstraint::frame(anchor, vec![Bottom::align(Dependency::Inner)])
            .with_switch(switch.clone());
        assert!(constraint.is_active(&tree));

        switch.set(false);
        assert!(!constraint.is_active(&tree));
        switch.toggle();
        assert!(constraint.is_active(&tree));

        tree.detach(anchor);
        assert!(!constraint.is_active(&tree));
        assert!(LayoutConstraint::rect(Rect::zero(), vec![]).is_active(&tree));
    }

    #[test]
    fn test_missing_super_item_is_an_error() {
        let (mut tree, root, anchor) = tree();
        tree.detach(anchor);
        let constraint = LayoutConstraint::frame(anchor, vec![Top::align(Dependency::Inner)]);

        let err = constraint.constrain(&tree, Rect::zero(), root).unwrap_err();
        assert_eq!(err, LayoutError::missing_super_item(anchor));
    }

    #[test]
    fn test_completed_frame_preferred() {
        let (tree, root, anchor) = tree();
        let mut completed = CompletedRects::new();
        completed.insert(anchor, Rect::new(20.0, 100.0, 100.0, 40.0));
        let constraint = LayoutConstraint::frame(anchor, vec![Bottom::align(Dependency::Outer)]);

        let result = constraint
            .constrain_completed(&tree, Rect::new(0.0, 0.0, 50.0, 50.0), root, &completed)
            .unwrap();
        assert_eq!(result, Rect::new(0.0, 140.0, 50.0, 50.0));
    }
}
