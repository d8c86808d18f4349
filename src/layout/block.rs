//! Layout blocks: one item, one layout rule, ordered constraints
//!
//! A block has two ways to run. Immediate layout computes the frame and
//! writes it back to the item straight away, skipping (with a warning) items
//! that are gone. Snapshots compute the same frame without touching the item
//! and register it in a [`CompletedRects`] ledger so later blocks of the same
//! pass see it; [`LayoutBlock::apply`] commits a snapshot afterwards.

use std::fmt;

use serde::Serialize;

use super::config::LayoutConfig;
use super::constraint::{constrain, ConstrainRect};
use super::error::LayoutError;
use super::item::{ItemId, LayoutItems};
use super::related::LayoutConstraint;
use super::rule::RectLayout;
use crate::geometry::Rect;

/// Computed, not yet committed, layout result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub frame: Rect,
    pub children: Vec<LayoutSnapshot>,
}

impl LayoutSnapshot {
    pub fn leaf(frame: Rect) -> Self {
        Self {
            frame,
            children: vec![],
        }
    }

    pub fn node(frame: Rect, children: Vec<LayoutSnapshot>) -> Self {
        Self { frame, children }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Frames of all leaves in structural order
    pub fn leaf_frames(&self) -> Vec<Rect> {
        if self.is_leaf() {
            return vec![self.frame];
        }
        self.children
            .iter()
            .flat_map(LayoutSnapshot::leaf_frames)
            .collect()
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.frame, indent = depth * 2)?;
        for child in &self.children {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for LayoutSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Ledger of frames already computed in a snapshot pass
#[derive(Debug, Clone)]
pub struct CompletedRects {
    entries: Vec<(ItemId, Rect)>,
    warn_on_stale_reference: bool,
}

impl Default for CompletedRects {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletedRects {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            warn_on_stale_reference: true,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            entries: vec![],
            warn_on_stale_reference: config.warn_on_stale_reference,
        }
    }

    pub fn insert(&mut self, item: ItemId, frame: Rect) {
        self.entries.push((item, frame));
    }

    /// Most recently completed frame of `item`
    pub fn get(&self, item: ItemId) -> Option<Rect> {
        self.entries
            .iter()
            .rev()
            .find(|(id, _)| *id == item)
            .map(|(_, frame)| *frame)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ItemId, Rect)> {
        self.entries.iter()
    }

    pub fn warns_on_stale_reference(&self) -> bool {
        self.warn_on_stale_reference
    }
}

impl Extend<(ItemId, Rect)> for CompletedRects {
    fn extend<T: IntoIterator<Item = (ItemId, Rect)>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

/// Binds one item to a layout rule and its constraints
#[derive(Debug, Clone)]
pub struct LayoutBlock {
    item: ItemId,
    layout: RectLayout,
    constraints: Vec<LayoutConstraint>,
}

impl LayoutBlock {
    pub fn new(item: ItemId, layout: RectLayout, constraints: Vec<LayoutConstraint>) -> Self {
        Self {
            item,
            layout,
            constraints,
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn rule(&self) -> &RectLayout {
        &self.layout
    }

    pub fn constraints(&self) -> &[LayoutConstraint] {
        &self.constraints
    }

    pub fn set_layout(&mut self, layout: RectLayout) {
        self.layout = layout;
    }

    pub fn set_constraints(&mut self, constraints: Vec<LayoutConstraint>) {
        self.constraints = constraints;
    }

    /// The item still resolves and is attached to a parent
    pub fn is_active(&self, host: &dyn LayoutItems) -> bool {
        host.super_item(self.item).is_some()
    }

    /// Frame as it is now, without recalculating
    pub fn current_rect(&self, host: &dyn LayoutItems) -> Result<Rect, LayoutError> {
        host.in_layout_time(self.item)
            .filter(|item| item.super_item.is_some())
            .map(|item| item.frame)
            .ok_or_else(|| LayoutError::inactive(self.item))
    }

    pub fn current_snapshot(&self, host: &dyn LayoutItems) -> Result<LayoutSnapshot, LayoutError> {
        self.current_rect(host).map(LayoutSnapshot::leaf)
    }

    /// Lay the item out inside its parent's layout bounds
    pub fn layout(&self, host: &mut dyn LayoutItems) {
        let available = host
            .super_item(self.item)
            .and_then(|parent| host.layout_bounds(parent));
        match available {
            Some(available) => self.layout_in(host, available),
            None => self.report_skipped(),
        }
    }

    /// Lay the item out inside `available` and write the frame back
    pub fn layout_in(&self, host: &mut dyn LayoutItems, available: Rect) {
        let Ok(container) = self.container(&*host) else {
            self.report_skipped();
            return;
        };
        match self.resolve(&*host, available, container, None) {
            Ok(frame) => {
                log::trace!(target: "rect_layout", "layout {} -> {}", self.item, frame);
                host.set_frame(self.item, frame);
            }
            Err(err) => {
                log::warn!(target: "rect_layout", "layout block for {} skipped: {}", self.item, err);
            }
        }
    }

    /// Compute the frame for `available` without touching the item
    pub fn snapshot(
        &self,
        host: &dyn LayoutItems,
        available: Rect,
    ) -> Result<LayoutSnapshot, LayoutError> {
        let mut completed = CompletedRects::new();
        self.snapshot_with(host, available, &mut completed)
    }

    /// Like [`LayoutBlock::snapshot`], with frames of items outside the block
    /// registered up front
    pub fn snapshot_constrained(
        &self,
        host: &dyn LayoutItems,
        available: Rect,
        constrain_rects: &[(ItemId, Rect)],
    ) -> Result<LayoutSnapshot, LayoutError> {
        let mut completed = CompletedRects::new();
        completed.extend(constrain_rects.iter().copied());
        self.snapshot_with(host, available, &mut completed)
    }

    /// Compute the frame and register it in `completed`
    pub fn snapshot_with(
        &self,
        host: &dyn LayoutItems,
        available: Rect,
        completed: &mut CompletedRects,
    ) -> Result<LayoutSnapshot, LayoutError> {
        let container = self.container(host)?;
        let frame = self.resolve(host, available, container, Some(&*completed))?;
        completed.insert(self.item, frame);
        Ok(LayoutSnapshot::leaf(frame))
    }

    /// Fold `constrain_rects` over `available` before laying out
    pub fn layout_constrained(
        &self,
        host: &mut dyn LayoutItems,
        available: Rect,
        constrain_rects: &[ConstrainRect],
    ) {
        self.layout_in(host, constrain(available, constrain_rects));
    }

    /// Write a snapshot's frame to the item
    pub fn apply(
        &self,
        host: &mut dyn LayoutItems,
        snapshot: &LayoutSnapshot,
    ) -> Result<(), LayoutError> {
        self.validate(&*host, snapshot)?;
        host.set_frame(self.item, snapshot.frame);
        Ok(())
    }

    /// Check that `snapshot` can be applied without touching any item
    pub(crate) fn validate(
        &self,
        host: &dyn LayoutItems,
        snapshot: &LayoutSnapshot,
    ) -> Result<(), LayoutError> {
        if !snapshot.is_leaf() {
            return Err(LayoutError::mismatch(0, snapshot.children.len()));
        }
        if !self.is_active(host) {
            return Err(LayoutError::inactive(self.item));
        }
        Ok(())
    }

    fn container(&self, host: &dyn LayoutItems) -> Result<ItemId, LayoutError> {
        host.in_layout_time(self.item)
            .and_then(|item| item.super_item)
            .ok_or_else(|| LayoutError::inactive(self.item))
    }

    fn resolve(
        &self,
        host: &dyn LayoutItems,
        available: Rect,
        container: ItemId,
        completed: Option<&CompletedRects>,
    ) -> Result<Rect, LayoutError> {
        let frame = host
            .frame(self.item)
            .ok_or_else(|| LayoutError::inactive(self.item))?;

        let mut source = available;
        for constraint in self.constraints.iter().filter(|c| c.is_active(host)) {
            source = match completed {
                Some(completed) => constraint.constrain_completed(host, source, container, completed)?,
                None => constraint.constrain(host, source, container)?,
            };
        }
        Ok(self.layout.layout(frame, source))
    }

    fn report_skipped(&self) {
        log::warn!(
            target: "rect_layout",
            "layout block skipped, item {} is not available",
            self.item
        );
    }
}
