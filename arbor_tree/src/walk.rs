// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visitor traversal in document order.

use alloc::vec::Vec;

use crate::node::TreeNode;
use crate::tree::Tree;

/// Visitor control flow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Descend into children (if any are traversed at all).
    Continue,
    /// Do not descend into this node's children.
    SkipChildren,
    /// Abort the whole traversal.
    Stop,
}

/// One visited node.
#[derive(Debug)]
pub struct Visit<'a, T> {
    /// The visited node.
    pub node: &'a TreeNode<T>,
    /// Positional path of the visited node.
    pub path: &'a [usize],
    /// Zero-based position in traversal order. When traversing with
    /// `ignore_collapsed`, this equals the node's visible row index.
    pub ordinal: usize,
}

impl<T> Tree<T> {
    /// Visit nodes in document order: parent first, then children, siblings
    /// in stored order.
    ///
    /// With `ignore_collapsed`, children of collapsed nodes are not visited,
    /// so the traversal covers exactly the visible rows.
    pub fn walk(&self, ignore_collapsed: bool, visitor: &mut impl FnMut(Visit<'_, T>) -> Flow) {
        let mut path = Vec::new();
        let mut ordinal = 0;
        walk_nodes(
            self.roots(),
            ignore_collapsed,
            &mut path,
            &mut ordinal,
            visitor,
        );
    }

    /// Visit every node mutably (collapsed included), parent before children.
    ///
    /// The callback runs before descent, so children added by the callback
    /// are themselves visited.
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut TreeNode<T>)) {
        for_each_nodes(self.roots_mut(), f);
    }
}

fn walk_nodes<T>(
    nodes: &[TreeNode<T>],
    ignore_collapsed: bool,
    path: &mut Vec<usize>,
    ordinal: &mut usize,
    visitor: &mut impl FnMut(Visit<'_, T>) -> Flow,
) -> bool {
    for (i, node) in nodes.iter().enumerate() {
        path.push(i);
        let flow = visitor(Visit {
            node,
            path,
            ordinal: *ordinal,
        });
        *ordinal += 1;
        let descend = match flow {
            Flow::Continue => true,
            Flow::SkipChildren => false,
            Flow::Stop => {
                path.pop();
                return false;
            }
        };
        if descend
            && !node.children.is_empty()
            && (!ignore_collapsed || node.expanded)
            && !walk_nodes(&node.children, ignore_collapsed, path, ordinal, visitor)
        {
            path.pop();
            return false;
        }
        path.pop();
    }
    true
}

fn for_each_nodes<T>(nodes: &mut [TreeNode<T>], f: &mut impl FnMut(&mut TreeNode<T>)) {
    for node in nodes {
        f(node);
        for_each_nodes(&mut node.children, f);
    }
}
