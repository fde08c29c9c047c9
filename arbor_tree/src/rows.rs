// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visible-row mapping: flattening the forest in document order.
//!
//! A row exists for every node whose ancestors are all expanded. Rows carry
//! enough derived state (depth, lower-sibling counts, child counts) for hosts
//! to render guides and toggles without touching the tree structure.

use alloc::vec::Vec;

use crate::node::{NodeFlags, TreeNode};
use crate::tree::{Tree, TreeError};

/// One visible row of the flattened mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Positional path of the node this row shows.
    pub path: Vec<usize>,
    /// Nesting depth; roots are 0. Equals `path.len() - 1`.
    pub depth: usize,
    /// Visible row index, dense from 0 top to bottom.
    pub index: usize,
    /// For each level from the root down to this node (inclusive, so the
    /// length is `depth + 1`): how many siblings follow below at that level.
    /// Guide rendering draws a vertical line where an ancestor count is
    /// nonzero and a branch/elbow from this node's own count.
    pub lower_siblings: Vec<usize>,
    /// Expansion flag of the node.
    pub expanded: bool,
    /// Direct child count of the node.
    pub child_count: usize,
    /// Capability flags of the node.
    pub flags: NodeFlags,
}

impl Row {
    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.child_count == 0
    }

    /// Whether the node is the last of its sibling list.
    pub fn is_last_sibling(&self) -> bool {
        self.lower_siblings.last() == Some(&0)
    }

    /// Positional path of the parent; `None` for roots.
    pub fn parent_path(&self) -> Option<&[usize]> {
        if self.depth == 0 {
            None
        } else {
            Some(&self.path[..self.depth])
        }
    }
}

/// An insertion slot resolved by [`Tree::find_slot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotInfo {
    /// Path the node will occupy once inserted.
    pub path: Vec<usize>,
    /// Visible row index the node will occupy once inserted.
    pub row: usize,
    /// Parent path; `None` for a slot in the root list.
    pub parent: Option<Vec<usize>>,
}

impl<T> Tree<T> {
    /// Flatten the forest into its visible rows.
    pub fn rows(&self) -> Vec<Row> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        let mut counts = Vec::new();
        flatten(self.roots(), &mut path, &mut counts, &mut out);
        out
    }

    /// Number of visible rows, without materializing them.
    pub fn row_count(&self) -> usize {
        self.roots()
            .iter()
            .map(|n| 1 + n.descendant_count(true))
            .sum()
    }

    /// The row at a visible index, by early-exit walk.
    pub fn row_at(&self, index: usize) -> Option<Row> {
        let mut path = Vec::new();
        let mut counts = Vec::new();
        let mut next = 0;
        row_at_rec(self.roots(), &mut path, &mut counts, &mut next, index)
    }

    /// Find the first insertion slot of exactly `depth` whose resulting
    /// visible row index is at least `min_row`, without inserting anything.
    ///
    /// This is the dry run behind the drop primitive: a drag resolves to a
    /// depth and a minimum row, the slot describes where the node would land,
    /// and [`Tree::insert_at_slot`] realizes it. A node lacking
    /// [`DROPPABLE`](NodeFlags::DROPPABLE) never gains a child through a
    /// slot; the search moves past such positions. Errors with
    /// [`TreeError::NoSlotAtDepth`] when no row at or after `min_row` admits
    /// the depth.
    pub fn find_slot(&self, depth: usize, min_row: usize) -> Result<SlotInfo, TreeError> {
        let rows = self.rows();
        let count = rows.len();
        let start = min_row.min(count);
        for p in start..=count {
            if let Some(below) = rows.get(p)
                && depth < below.depth
            {
                // Inserting shallower here would detach `below` from its
                // parent chain; the slot moves past its subtree.
                continue;
            }
            let Some(above) = p.checked_sub(1).map(|i| &rows[i]) else {
                if depth == 0 {
                    return Ok(SlotInfo {
                        path: alloc::vec![0],
                        row: p,
                        parent: None,
                    });
                }
                continue;
            };
            if depth == above.depth + 1 {
                if !above.flags.contains(NodeFlags::DROPPABLE) {
                    continue;
                }
                let parent_path = above.path.clone();
                let mut path = parent_path.clone();
                path.push(0);
                return Ok(SlotInfo {
                    path,
                    row: p,
                    parent: Some(parent_path),
                });
            }
            if depth <= above.depth {
                let parent_path = above.path[..depth].to_vec();
                if !parent_path.is_empty()
                    && let Some(parent) = self.node_at(&parent_path)
                    && !parent.is_droppable()
                {
                    continue;
                }
                let index = above.path[depth] + 1;
                let mut path = parent_path.clone();
                path.push(index);
                let parent = if parent_path.is_empty() {
                    None
                } else {
                    Some(parent_path)
                };
                return Ok(SlotInfo { path, row: p, parent });
            }
        }
        Err(TreeError::NoSlotAtDepth)
    }

    /// Realize a slot from [`Tree::find_slot`]: insert `node` there.
    ///
    /// When the slot is a first-child position, the parent is expanded so
    /// the inserted node is visible. The slot must come from `find_slot` on
    /// this tree in its current state; a stale slot does not error, it
    /// clamps to the nearest valid position.
    pub fn insert_at_slot(&mut self, slot: &SlotInfo, node: TreeNode<T>) {
        let (index, parent_path) = match slot.path.split_last() {
            Some((&index, parent)) => (index, parent),
            None => (0, &[][..]),
        };
        if !parent_path.is_empty() {
            match self.node_at_mut(parent_path) {
                Some(parent) => {
                    if index == 0 {
                        parent.expanded = true;
                    }
                    let at = index.min(parent.children.len());
                    parent.children.insert(at, node);
                }
                // Stale slot: the parent is gone. Keep the node.
                None => self.roots_mut().push(node),
            }
        } else {
            let len = self.roots().len();
            self.roots_mut().insert(index.min(len), node);
        }
    }

    /// Insert `node` at the first slot of exactly `depth` at or after
    /// `min_row`; see [`Tree::find_slot`].
    ///
    /// On [`TreeError::NoSlotAtDepth`] the node is dropped; callers that
    /// need it back on failure should run `find_slot` first and then
    /// [`Tree::insert_at_slot`].
    pub fn insert_at_depth(
        &mut self,
        depth: usize,
        min_row: usize,
        node: TreeNode<T>,
    ) -> Result<SlotInfo, TreeError> {
        let slot = self.find_slot(depth, min_row)?;
        self.insert_at_slot(&slot, node);
        Ok(slot)
    }
}

fn flatten<T>(
    nodes: &[TreeNode<T>],
    path: &mut Vec<usize>,
    counts: &mut Vec<usize>,
    out: &mut Vec<Row>,
) {
    for (i, node) in nodes.iter().enumerate() {
        path.push(i);
        counts.push(nodes.len() - 1 - i);
        out.push(Row {
            path: path.clone(),
            depth: path.len() - 1,
            index: out.len(),
            lower_siblings: counts.clone(),
            expanded: node.expanded,
            child_count: node.children.len(),
            flags: node.flags,
        });
        if node.expanded && !node.children.is_empty() {
            flatten(&node.children, path, counts, out);
        }
        path.pop();
        counts.pop();
    }
}

fn row_at_rec<T>(
    nodes: &[TreeNode<T>],
    path: &mut Vec<usize>,
    counts: &mut Vec<usize>,
    next: &mut usize,
    target: usize,
) -> Option<Row> {
    for (i, node) in nodes.iter().enumerate() {
        path.push(i);
        counts.push(nodes.len() - 1 - i);
        if *next == target {
            return Some(Row {
                path: path.clone(),
                depth: path.len() - 1,
                index: target,
                lower_siblings: counts.clone(),
                expanded: node.expanded,
                child_count: node.children.len(),
                flags: node.flags,
            });
        }
        *next += 1;
        if node.expanded
            && !node.children.is_empty()
            && let Some(row) = row_at_rec(&node.children, path, counts, next, target)
        {
            return Some(row);
        }
        path.pop();
        counts.pop();
    }
    None
}
