// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_tree --heading-base-level=0

//! Arbor Tree: the ordered tree data model behind a tree-list widget.
//!
//! Tree data is an ordered sequence of node records, each optionally carrying
//! a nested ordered sequence of child records and an expansion flag. This
//! crate owns that data and its mapping to visible rows; viewport math, drag
//! semantics, and rendering live in higher layers.
//!
//! - [`TreeNode`] records hold a payload, the expansion flag, capability
//!   flags, and ordered children.
//! - [`Tree`] flattens to visible rows in document order ([`Tree::rows`]);
//!   collapsing hides descendants from the mapping without discarding them.
//! - Structural edits are positional (paths of child indices from the root
//!   list), including the drop primitive [`Tree::insert_at_depth`] that
//!   realizes "insert at this depth, at or after this row".
//! - Flat parent-keyed records convert to a forest and back
//!   ([`Tree::from_flat`], [`Tree::to_flat`]) so tabular sources map in
//!   directly.
//! - [`Tree::find`] collects matches over all nodes, hidden ones included,
//!   with a caller-pluggable method; [`substring_method`] is the default.
//!
//! # Example
//!
//! ```rust
//! use arbor_tree::{Tree, TreeNode};
//!
//! let mut tree = Tree::from_roots(vec![
//!     TreeNode::new("fruit").with_expanded(true).with_children(vec![
//!         TreeNode::new("apple"),
//!         TreeNode::new("pear"),
//!     ]),
//!     TreeNode::new("vegetables"),
//! ]);
//! assert_eq!(tree.row_count(), 4);
//!
//! // Collapse the first root: its children leave the mapping but stay in
//! // the data.
//! tree.set_expanded(&[0], false).unwrap();
//! assert_eq!(tree.row_count(), 2);
//! assert_eq!(tree.len(), 4);
//!
//! // Matching sees hidden nodes, so a widget can reveal them.
//! let matches = tree.find("pear", arbor_tree::substring_method(|d: &&str| *d));
//! assert_eq!(matches[0].path, vec![0, 1]);
//! tree.expand_along(&matches[0].path).unwrap();
//! assert_eq!(tree.row_count(), 4);
//! ```
//!
//! ## Features
//!
//! - `serde`: serialize/deserialize node records and flat records.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod flat;
pub mod node;
pub mod rows;
pub mod search;
pub mod tree;
pub mod walk;

pub use flat::{FlatError, FlatRecord};
pub use node::{NodeFlags, TreeNode};
pub use rows::{Row, SlotInfo};
pub use search::{Match, contains_ignore_ascii_case, substring_method};
pub use tree::{Tree, TreeError};
pub use walk::{Flow, Visit};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn labels(tree: &Tree<&'static str>) -> Vec<&'static str> {
        tree.rows()
            .iter()
            .map(|r| tree.node_at(&r.path).map(|n| n.data).unwrap_or("?"))
            .collect()
    }

    fn sample() -> Tree<&'static str> {
        Tree::from_roots(vec![
            TreeNode::new("projects")
                .with_expanded(true)
                .with_children(vec![
                    TreeNode::new("arbor").with_expanded(true).with_children(vec![
                        TreeNode::new("src"),
                        TreeNode::new("notes"),
                    ]),
                    TreeNode::new("attic")
                        .with_expanded(false)
                        .with_children(vec![TreeNode::new("old-src")]),
                ]),
            TreeNode::new("scratch"),
        ])
    }

    #[test]
    fn toggling_mutates_the_row_mapping_only() {
        let mut tree = sample();
        assert_eq!(
            labels(&tree),
            vec!["projects", "arbor", "src", "notes", "attic", "scratch"]
        );
        let before = tree.len();

        tree.toggle_expanded(&[0, 1]).unwrap();
        assert_eq!(
            labels(&tree),
            vec!["projects", "arbor", "src", "notes", "attic", "old-src", "scratch"]
        );

        tree.toggle_expanded(&[0]).unwrap();
        assert_eq!(labels(&tree), vec!["projects", "scratch"]);
        assert_eq!(tree.len(), before);
    }

    #[test]
    fn move_as_remove_then_insert_at_depth() {
        let mut tree = sample();
        // Lift "notes" and drop it as a root-level row after everything.
        let lifted = tree.remove(&[0, 0, 1]).unwrap();
        let slot = tree.insert_at_depth(0, usize::MAX, lifted).unwrap();
        assert_eq!(slot.path, vec![2]);
        assert_eq!(
            labels(&tree),
            vec!["projects", "arbor", "src", "attic", "scratch", "notes"]
        );
    }

    #[test]
    fn reparent_under_collapsed_node_reveals_it() {
        let mut tree = sample();
        let lifted = tree.remove(&[0, 0, 0]).unwrap();
        // "attic" sits at depth 1 after the removal; dropping at depth 2
        // right below it nests under "attic" and expands it.
        let rows = tree.rows();
        let attic = rows.iter().position(|r| {
            tree.node_at(&r.path).map(|n| n.data) == Some("attic")
        });
        let slot = tree.insert_at_depth(2, attic.unwrap() + 1, lifted).unwrap();
        assert_eq!(slot.parent.as_deref(), Some(&[0, 1][..]));
        assert_eq!(
            labels(&tree),
            vec!["projects", "arbor", "notes", "attic", "src", "old-src", "scratch"]
        );
    }

    #[test]
    fn search_then_reveal_then_rows() {
        let mut tree = sample();
        let matches = tree.find("src", substring_method(|d: &&str| *d));
        let paths: Vec<_> = matches.iter().map(|m| m.path.clone()).collect();
        assert_eq!(paths, vec![vec![0, 0, 0], vec![0, 1, 0]]);

        for m in &matches {
            tree.expand_along(&m.path).unwrap();
        }
        // "old-src" is now on a row; match order stayed document order.
        assert_eq!(
            labels(&tree),
            vec!["projects", "arbor", "src", "notes", "attic", "old-src", "scratch"]
        );
    }

    #[test]
    fn flat_input_maps_to_the_same_rows_as_nested_input() {
        let nested = sample();
        let flat = nested.to_flat(|d| *d);
        let rebuilt = Tree::from_flat(flat).unwrap();
        assert_eq!(rebuilt, nested);
        assert_eq!(labels(&rebuilt), labels(&nested));
    }
}
