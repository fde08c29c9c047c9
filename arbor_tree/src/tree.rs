// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The forest container: positional addressing, structural edits, expansion.

use alloc::vec::Vec;

use crate::node::TreeNode;

/// Error for structural operations addressed by positional paths.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// A path component did not resolve to a node.
    PathNotFound,
    /// An insertion index was beyond the end of the target child list.
    IndexOutOfBounds,
    /// No insertion slot of the requested depth exists at or after the
    /// requested row.
    NoSlotAtDepth,
}

impl core::fmt::Display for TreeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PathNotFound => write!(f, "path does not resolve to a node"),
            Self::IndexOutOfBounds => write!(f, "insertion index out of bounds"),
            Self::NoSlotAtDepth => write!(f, "no insertion slot at the requested depth"),
        }
    }
}

impl core::error::Error for TreeError {}

/// An ordered forest of [`TreeNode`] records.
///
/// Nodes are addressed by positional paths: a slice of child indices from the
/// root list downwards. `&[2]` is the third root; `&[2, 0]` is its first
/// child. The empty path addresses no node; as a *parent* path in
/// [`Tree::insert`] it addresses the root list itself.
///
/// Paths are positions, not identities: any structural edit may invalidate
/// paths obtained earlier. Operations that change structure return the paths
/// that remain valid afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree<T> {
    roots: Vec<TreeNode<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// New empty forest.
    pub const fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Wrap an existing root list.
    pub const fn from_roots(roots: Vec<TreeNode<T>>) -> Self {
        Self { roots }
    }

    /// The root list.
    pub fn roots(&self) -> &[TreeNode<T>] {
        &self.roots
    }

    /// Mutable access to the root list.
    ///
    /// Callers holding a [`Tree`] inside a widget state should prefer the
    /// widget's editing operations, which keep derived row state fresh.
    pub fn roots_mut(&mut self) -> &mut Vec<TreeNode<T>> {
        &mut self.roots
    }

    /// Unwrap into the root list.
    pub fn into_roots(self) -> Vec<TreeNode<T>> {
        self.roots
    }

    /// Total number of nodes, collapsed ones included.
    pub fn len(&self) -> usize {
        fn count<T>(nodes: &[TreeNode<T>]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    /// Whether the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth of the deepest node (roots are depth 0; empty forest is 0).
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(TreeNode::subtree_depth)
            .max()
            .unwrap_or(0)
    }

    /// Resolve a path to a node.
    ///
    /// The empty path resolves to `None`.
    pub fn node_at(&self, path: &[usize]) -> Option<&TreeNode<T>> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.roots.get(first)?;
        for &i in rest {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    /// Resolve a path to a node, mutably.
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode<T>> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.roots.get_mut(first)?;
        for &i in rest {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// Map a positional path to caller keys, root first.
    pub fn key_path<K>(&self, path: &[usize], key_of: impl Fn(&T) -> K) -> Option<Vec<K>> {
        let mut out = Vec::with_capacity(path.len());
        for end in 1..=path.len() {
            out.push(key_of(&self.node_at(&path[..end])?.data));
        }
        if out.is_empty() { None } else { Some(out) }
    }

    /// Number of descendants below the node at `path`.
    ///
    /// See [`TreeNode::descendant_count`] for the `ignore_collapsed`
    /// semantics.
    pub fn descendant_count(&self, path: &[usize], ignore_collapsed: bool) -> Option<usize> {
        Some(self.node_at(path)?.descendant_count(ignore_collapsed))
    }

    fn child_list_mut(&mut self, parent_path: &[usize]) -> Option<&mut Vec<TreeNode<T>>> {
        if parent_path.is_empty() {
            Some(&mut self.roots)
        } else {
            Some(&mut self.node_at_mut(parent_path)?.children)
        }
    }

    /// Insert `node` at `index` under the node at `parent_path`.
    ///
    /// The empty parent path addresses the root list. `index` may equal the
    /// current child count (append). Structural insertion ignores
    /// [`NodeFlags`](crate::NodeFlags); capability checks belong to
    /// interactive moves.
    pub fn insert(
        &mut self,
        parent_path: &[usize],
        index: usize,
        node: TreeNode<T>,
    ) -> Result<(), TreeError> {
        let list = self
            .child_list_mut(parent_path)
            .ok_or(TreeError::PathNotFound)?;
        if index > list.len() {
            return Err(TreeError::IndexOutOfBounds);
        }
        list.insert(index, node);
        Ok(())
    }

    /// Detach and return the subtree at `path`.
    ///
    /// The subtree round-trips: re-inserting it elsewhere preserves payloads,
    /// expansion flags, and capability flags unchanged.
    pub fn remove(&mut self, path: &[usize]) -> Result<TreeNode<T>, TreeError> {
        let (&index, parent_path) = path.split_last().ok_or(TreeError::PathNotFound)?;
        let list = self
            .child_list_mut(parent_path)
            .ok_or(TreeError::PathNotFound)?;
        if index >= list.len() {
            return Err(TreeError::PathNotFound);
        }
        Ok(list.remove(index))
    }

    /// Replace the subtree at `path`, returning the old one.
    pub fn replace(&mut self, path: &[usize], node: TreeNode<T>) -> Result<TreeNode<T>, TreeError> {
        let slot = self.node_at_mut(path).ok_or(TreeError::PathNotFound)?;
        Ok(core::mem::replace(slot, node))
    }

    /// Set the expansion flag at `path`; returns whether the flag changed.
    pub fn set_expanded(&mut self, path: &[usize], expanded: bool) -> Result<bool, TreeError> {
        let node = self.node_at_mut(path).ok_or(TreeError::PathNotFound)?;
        let changed = node.expanded != expanded;
        node.expanded = expanded;
        Ok(changed)
    }

    /// Flip the expansion flag at `path`; returns the new state.
    pub fn toggle_expanded(&mut self, path: &[usize]) -> Result<bool, TreeError> {
        let node = self.node_at_mut(path).ok_or(TreeError::PathNotFound)?;
        node.expanded = !node.expanded;
        Ok(node.expanded)
    }

    /// Set every node's expansion flag to true.
    ///
    /// Childless nodes are included; their flag has no visible effect.
    pub fn expand_all(&mut self) {
        set_expanded_all(&mut self.roots, true);
    }

    /// Set every node's expansion flag to false.
    pub fn collapse_all(&mut self) {
        set_expanded_all(&mut self.roots, false);
    }

    /// Expand every ancestor of `path` so the node at `path` is visible.
    ///
    /// The node's own flag is untouched. Errors if the full path does not
    /// resolve.
    pub fn expand_along(&mut self, path: &[usize]) -> Result<(), TreeError> {
        if self.node_at(path).is_none() {
            return Err(TreeError::PathNotFound);
        }
        for end in 1..path.len() {
            // Resolved above, so the prefix resolves too.
            if let Some(node) = self.node_at_mut(&path[..end]) {
                node.expanded = true;
            }
        }
        Ok(())
    }
}

fn set_expanded_all<T>(nodes: &mut [TreeNode<T>], expanded: bool) {
    for node in nodes {
        node.expanded = expanded;
        set_expanded_all(&mut node.children, expanded);
    }
}
