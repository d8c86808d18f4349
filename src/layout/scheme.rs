//! Layout schemes: ordered composition of blocks
//!
//! Order is part of the meaning. In immediate mode each node sees the frames
//! already written by the nodes before it and the pre-pass frames of the
//! nodes after it. In snapshot mode the same order decides which frames are
//! in the [`CompletedRects`] ledger when a node is resolved.

use super::block::{CompletedRects, LayoutBlock, LayoutSnapshot};
use super::error::LayoutError;
use super::item::{ItemId, LayoutItems};
use super::stack::StackLayoutScheme;
use crate::geometry::Rect;

/// Anything a scheme can hold
#[derive(Debug, Clone)]
pub enum LayoutNode {
    Block(LayoutBlock),
    Scheme(LayoutScheme),
    Stack(StackLayoutScheme),
}

impl LayoutNode {
    pub fn is_active(&self, host: &dyn LayoutItems) -> bool {
        match self {
            LayoutNode::Block(block) => block.is_active(host),
            LayoutNode::Scheme(scheme) => scheme.is_active(host),
            LayoutNode::Stack(stack) => stack.is_active(host),
        }
    }

    pub fn current_rect(&self, host: &dyn LayoutItems) -> Result<Rect, LayoutError> {
        match self {
            LayoutNode::Block(block) => block.current_rect(host),
            LayoutNode::Scheme(scheme) => scheme.current_rect(host),
            LayoutNode::Stack(stack) => stack.current_rect(host),
        }
    }

    pub fn current_snapshot(&self, host: &dyn LayoutItems) -> Result<LayoutSnapshot, LayoutError> {
        match self {
            LayoutNode::Block(block) => block.current_snapshot(host),
            LayoutNode::Scheme(scheme) => scheme.current_snapshot(host),
            LayoutNode::Stack(stack) => stack.current_snapshot(host),
        }
    }

    pub fn layout(&self, host: &mut dyn LayoutItems) {
        match self {
            LayoutNode::Block(block) => block.layout(host),
            LayoutNode::Scheme(scheme) => scheme.layout(host),
            LayoutNode::Stack(stack) => stack.layout(host),
        }
    }

    pub fn layout_in(&self, host: &mut dyn LayoutItems, available: Rect) {
        match self {
            LayoutNode::Block(block) => block.layout_in(host, available),
            LayoutNode::Scheme(scheme) => scheme.layout_in(host, available),
            LayoutNode::Stack(stack) => stack.layout_in(host, available),
        }
    }

    pub fn snapshot_with(
        &self,
        host: &dyn LayoutItems,
        available: Rect,
        completed: &mut CompletedRects,
    ) -> Result<LayoutSnapshot, LayoutError> {
        match self {
            LayoutNode::Block(block) => block.snapshot_with(host, available, completed),
            LayoutNode::Scheme(scheme) => scheme.snapshot_with(host, available, completed),
            LayoutNode::Stack(stack) => stack.snapshot_with(host, available, completed),
        }
    }

    pub fn apply(
        &self,
        host: &mut dyn LayoutItems,
        snapshot: &LayoutSnapshot,
    ) -> Result<(), LayoutError> {
        match self {
            LayoutNode::Block(block) => block.apply(host, snapshot),
            LayoutNode::Scheme(scheme) => scheme.apply(host, snapshot),
            LayoutNode::Stack(stack) => stack.apply(host, snapshot),
        }
    }

    fn validate(&self, host: &dyn LayoutItems, snapshot: &LayoutSnapshot) -> Result<(), LayoutError> {
        match self {
            LayoutNode::Block(block) => block.validate(host, snapshot),
            LayoutNode::Scheme(scheme) => scheme.validate(host, snapshot),
            LayoutNode::Stack(stack) => stack.validate(host, snapshot),
        }
    }
}

impl From<LayoutBlock> for LayoutNode {
    fn from(block: LayoutBlock) -> Self {
        LayoutNode::Block(block)
    }
}

impl From<LayoutScheme> for LayoutNode {
    fn from(scheme: LayoutScheme) -> Self {
        LayoutNode::Scheme(scheme)
    }
}

impl From<StackLayoutScheme> for LayoutNode {
    fn from(stack: StackLayoutScheme) -> Self {
        LayoutNode::Stack(stack)
    }
}

/// Ordered sequence of layout nodes
#[derive(Debug, Clone, Default)]
pub struct LayoutScheme {
    nodes: Vec<LayoutNode>,
}

impl LayoutScheme {
    pub fn new(nodes: Vec<LayoutNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Active while any node is active
    pub fn is_active(&self, host: &dyn LayoutItems) -> bool {
        self.nodes.iter().any(|node| node.is_active(host))
    }

    /// Union of the current frames of all nodes
    pub fn current_rect(&self, host: &dyn LayoutItems) -> Result<Rect, LayoutError> {
        let mut rect: Option<Rect> = None;
        for node in &self.nodes {
            let frame = node.current_rect(host)?;
            rect = Some(rect.map_or(frame, |rect| rect.union(&frame)));
        }
        rect.ok_or(LayoutError::EmptyScheme)
    }

    pub fn current_snapshot(&self, host: &dyn LayoutItems) -> Result<LayoutSnapshot, LayoutError> {
        if self.nodes.is_empty() {
            return Err(LayoutError::EmptyScheme);
        }
        let children = self
            .nodes
            .iter()
            .map(|node| node.current_snapshot(host))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LayoutSnapshot::node(union_of(&children), children))
    }

    /// Lay out every node inside its own parent's layout bounds
    pub fn layout(&self, host: &mut dyn LayoutItems) {
        for node in &self.nodes {
            node.layout(host);
        }
    }

    /// Lay out every node inside `available`, writing frames as it goes
    pub fn layout_in(&self, host: &mut dyn LayoutItems, available: Rect) {
        log::debug!(target: "rect_layout", "layout scheme of {} nodes in {}", self.nodes.len(), available);
        for node in &self.nodes {
            node.layout_in(host, available);
        }
    }

    /// Compute all frames for `available` without touching any item
    pub fn snapshot(
        &self,
        host: &dyn LayoutItems,
        available: Rect,
    ) -> Result<LayoutSnapshot, LayoutError> {
        let mut completed = CompletedRects::new();
        self.snapshot_with(host, available, &mut completed)
    }

    /// Like [`LayoutScheme::snapshot`], with frames of items outside the scheme
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

    pub fn snapshot_with(
        &self,
        host: &dyn LayoutItems,
        available: Rect,
        completed: &mut CompletedRects,
    ) -> Result<LayoutSnapshot, LayoutError> {
        let children = self
            .nodes
            .iter()
            .map(|node| node.snapshot_with(host, available, completed))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LayoutSnapshot::node(union_of(&children), children))
    }

    /// Commit a snapshot taken from this scheme.
    ///
    /// The whole structure is checked first, so either every frame is
    /// written or none is.
    pub fn apply(
        &self,
        host: &mut dyn LayoutItems,
        snapshot: &LayoutSnapshot,
    ) -> Result<(), LayoutError> {
        self.validate(&*host, snapshot)?;
        for (node, child) in self.nodes.iter().zip(&snapshot.children) {
            node.apply(host, child)?;
        }
        Ok(())
    }

    pub(crate) fn validate(
        &self,
        host: &dyn LayoutItems,
        snapshot: &LayoutSnapshot,
    ) -> Result<(), LayoutError> {
        if snapshot.children.len() != self.nodes.len() {
            return Err(LayoutError::mismatch(self.nodes.len(), snapshot.children.len()));
        }
        self.nodes
            .iter()
            .zip(&snapshot.children)
            .try_for_each(|(node, child)| node.validate(host, child))
    }

    /// Insert a node; positions past the end append
    pub fn insert(&mut self, node: impl Into<LayoutNode>, position: usize) {
        let position = position.min(self.nodes.len());
        self.nodes.insert(position, node.into());
    }

    pub fn push(&mut self, node: impl Into<LayoutNode>) {
        self.nodes.push(node.into());
    }

    pub fn remove_inactive(&mut self, host: &dyn LayoutItems) {
        self.nodes.retain(|node| node.is_active(host));
    }
}

/// Union of snapshot frames; zero for no snapshots
pub(crate) fn union_of(snapshots: &[LayoutSnapshot]) -> Rect {
    snapshots
        .iter()
        .map(|snapshot| snapshot.frame)
        .reduce(|acc, frame| acc.union(&frame))
        .unwrap_or_else(Rect::zero)
}
