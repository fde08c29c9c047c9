// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node records: payload, expansion flag, capability flags, ordered children.

use alloc::vec::Vec;

bitflags::bitflags! {
    /// Per-node capability flags consulted by drag-and-drop.
    ///
    /// Structural editing ignores these; they only gate interactive moves.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NodeFlags: u32 {
        /// Node may be lifted by a drag.
        const DRAGGABLE = 1 << 0;
        /// Node may receive dropped children.
        const DROPPABLE = 1 << 1;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::DRAGGABLE | Self::DROPPABLE
    }
}

/// One record of the tree data: a payload, an expansion flag, and an ordered
/// sequence of child records.
///
/// `expanded` controls whether `children` contribute rows to the visible
/// mapping; collapsing never discards data. A node with `expanded == true`
/// and no children is a plain leaf row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode<T> {
    /// Caller payload.
    pub data: T,
    /// Whether children are shown in the row mapping.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expanded: bool,
    /// Capability flags for drag-and-drop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: NodeFlags,
    /// Ordered child records.
    #[cfg_attr(feature = "serde", serde(default = "Vec::new"))]
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// New collapsed leaf with default flags.
    pub fn new(data: T) -> Self {
        Self {
            data,
            expanded: false,
            flags: NodeFlags::default(),
            children: Vec::new(),
        }
    }

    /// Builder: replace the child list.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Builder: set the expansion flag.
    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Builder: replace the capability flags.
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether drag-and-drop may lift this node.
    pub fn is_draggable(&self) -> bool {
        self.flags.contains(NodeFlags::DRAGGABLE)
    }

    /// Whether drag-and-drop may drop children under this node.
    pub fn is_droppable(&self) -> bool {
        self.flags.contains(NodeFlags::DROPPABLE)
    }

    /// Number of descendants below this node.
    ///
    /// With `ignore_collapsed`, descendants hidden behind a collapsed node do
    /// not count; this equals the number of rows the subtree contributes
    /// beyond its own.
    pub fn descendant_count(&self, ignore_collapsed: bool) -> usize {
        if ignore_collapsed && !self.expanded {
            return 0;
        }
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count(ignore_collapsed))
            .sum()
    }

    /// Depth of the deepest descendant below this node (0 for a leaf).
    pub fn subtree_depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.subtree_depth())
            .max()
            .unwrap_or(0)
    }
}
