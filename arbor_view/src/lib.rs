// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_view --heading-base-level=0

//! Arbor View: widget state for a virtualized tree view.
//!
//! Arbor View keeps the bookkeeping of a scrollable tree-view widget out of the rendering layer.
//!
//! - Owns an [`arbor_tree::Tree`] plus its visible-row cache, kept in step across every operation.
//! - Virtualizes rendering: a [`Viewport`] over fixed-height rows yields the dense index range worth materializing, so trees with tens of thousands of nodes stay cheap.
//! - Resolves toggles, policy-checked moves, and the drag lift/land/cancel cycle into [`TreeEvent`] values the host forwards to its own notification scheme.
//! - Runs incremental search over all nodes (collapsed ones included) with a focused match the viewport follows.
//!
//! Rendering itself stays with the host: this crate hands it rows, guide
//! cells, and pixel rectangles, and takes pointer positions back.
//!
//! ## API overview
//!
//! - [`TreeView`]: the widget-state container.
//! - [`Viewport`], [`ScrollAlign`], [`RowLayout`]: scroll geometry over fixed-height rows.
//! - [`MovePolicy`], [`DropProbe`], [`MoveError`]: limits on moves and drops.
//! - [`TreeEvent`]: change notifications returned by operations.
//! - [`scaffold`], [`ScaffoldPiece`], [`GuideSet`]: per-row guide cells for rendering.
//!
//! Key operations:
//! - [`TreeView::visible_range`] → the rows to materialize.
//! - [`TreeView::toggle_row`] / [`TreeView::move_node`].
//! - [`TreeView::begin_drag`] → [`TreeView::finish_drag`] / [`TreeView::cancel_drag`].
//! - [`TreeView::set_query`] → [`TreeView::focus_next`] / [`TreeView::focus_prev`].
//!
//! ### Minimal usage
//!
//! ```
//! use arbor_tree::{Tree, TreeNode, substring_method};
//! use arbor_view::{SearchOptions, TreeEvent, TreeView, Viewport};
//! use kurbo::Size;
//!
//! let tree = Tree::from_roots(vec![
//!     TreeNode::new("src").with_expanded(true).with_children(vec![
//!         TreeNode::new("lib.rs"),
//!         TreeNode::new("main.rs"),
//!     ]),
//!     TreeNode::new("README.md"),
//! ]);
//! let mut view = TreeView::with_tree(tree, Viewport::new(24.0));
//! view.resize(Size::new(320.0, 120.0));
//!
//! // Only the scrolled slice needs materializing.
//! assert_eq!(view.visible_range(1), 0..4);
//!
//! // Collapse the first root through its row.
//! let event = view.toggle_row(0).unwrap();
//! assert!(matches!(event, TreeEvent::VisibilityToggled { expanded: false, .. }));
//! assert_eq!(view.row_count(), 2);
//!
//! // Search reveals and focuses the first match.
//! let finished = view.set_query("main", substring_method(|d: &&str| *d), &SearchOptions::default());
//! assert_eq!(finished, TreeEvent::SearchFinished { matches: 1, focus: Some(0) });
//! assert_eq!(view.matches()[0].row, Some(2));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): forwards to Kurbo's `std` feature.
//! - `libm`: for `no_std` builds, forwards to Kurbo's `libm` feature.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod events;
pub mod scaffold;
pub mod view;
pub mod viewport;

pub use events::TreeEvent;
pub use scaffold::{GuideSet, ScaffoldPiece, scaffold};
pub use view::{DropProbe, Lift, MoveError, MovePolicy, SearchOptions, TreeView};
pub use viewport::{RowLayout, ScrollAlign, Viewport};

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    use arbor_tree::{Tree, TreeNode, substring_method};
    use kurbo::Size;

    use crate::{MovePolicy, ScrollAlign, SearchOptions, TreeEvent, TreeView, Viewport};

    fn names(view: &TreeView<String>) -> Vec<String> {
        view.rows()
            .iter()
            .map(|r| view.tree().node_at(&r.path).unwrap().data.clone())
            .collect()
    }

    #[test]
    fn ten_thousand_rows_render_as_a_small_window() {
        let roots = (0..100)
            .map(|i| {
                let children = (0..100)
                    .map(|j| TreeNode::new(format!("{i}/{j}")))
                    .collect();
                TreeNode::new(format!("{i}"))
                    .with_expanded(true)
                    .with_children(children)
            })
            .collect();
        let viewport = Viewport::new(24.0).with_size(Size::new(300.0, 600.0));
        let mut view = TreeView::with_tree(Tree::from_roots(roots), viewport);
        assert_eq!(view.row_count(), 10_100);
        view.scroll_to_row(5_000, ScrollAlign::Start);
        let range = view.visible_range(2);
        assert_eq!(range, 4_998..5_027);
        // The window is a fixed 25 rows plus overscan, however big the tree.
        assert_eq!(range.len(), 29);
    }

    #[test]
    fn narrowing_search_reveals_only_match_ancestors() {
        let tree = Tree::from_roots(alloc::vec![
            TreeNode::new(String::from("home")).with_children(alloc::vec![
                TreeNode::new(String::from("docs")).with_children(alloc::vec![
                    TreeNode::new(String::from("letter.txt")),
                    TreeNode::new(String::from("taxes.txt")),
                ]),
                TreeNode::new(String::from("pics"))
                    .with_children(alloc::vec![TreeNode::new(String::from("cat.png"))]),
            ]),
            TreeNode::new(String::from("tmp")),
        ]);
        let mut view = TreeView::with_tree(tree, Viewport::new(10.0));
        view.expand_all();
        assert_eq!(view.row_count(), 7);
        let options = SearchOptions {
            only_expand_matches: true,
            ..SearchOptions::default()
        };
        let event = view.set_query("tax", substring_method(String::as_str), &options);
        assert_eq!(
            event,
            TreeEvent::SearchFinished {
                matches: 1,
                focus: Some(0),
            }
        );
        // "pics" stays visible as a collapsed sibling; its contents do not.
        assert_eq!(
            names(&view),
            ["home", "docs", "letter.txt", "taxes.txt", "pics", "tmp"]
        );
        assert_eq!(view.focused_match().unwrap().row, Some(3));
    }

    #[test]
    fn focus_cycle_walks_matches_and_scrolls() {
        let roots = (0..50)
            .map(|i| {
                if i % 20 == 5 {
                    TreeNode::new(format!("hit-{i}"))
                } else {
                    TreeNode::new(format!("row-{i}"))
                }
            })
            .collect();
        let viewport = Viewport::new(10.0).with_size(Size::new(200.0, 100.0));
        let mut view = TreeView::with_tree(Tree::from_roots(roots), viewport);
        let event = view.set_query("hit", substring_method(String::as_str), &Default::default());
        assert_eq!(
            event,
            TreeEvent::SearchFinished {
                matches: 3,
                focus: Some(0),
            }
        );
        // Matches sit at rows 5, 25, and 45; the viewport chases the focus.
        assert_eq!(view.viewport().scroll_top(), 0.0);
        let step = view.focus_next().unwrap();
        assert_eq!(
            step,
            TreeEvent::SearchFocusChanged {
                focus: 1,
                row: Some(25),
            }
        );
        assert_eq!(view.viewport().scroll_top(), 160.0);
        view.focus_next();
        assert_eq!(view.viewport().scroll_top(), 360.0);
        view.focus_next();
        assert_eq!(view.focus(), Some(0));
        assert_eq!(view.viewport().scroll_top(), 50.0);
        let back = view.focus_prev().unwrap();
        assert_eq!(
            back,
            TreeEvent::SearchFocusChanged {
                focus: 2,
                row: Some(45),
            }
        );
    }

    #[test]
    fn drag_to_the_end_of_the_root_list() {
        let tree = Tree::from_roots(alloc::vec![
            TreeNode::new(String::from("first")),
            TreeNode::new(String::from("second")),
            TreeNode::new(String::from("third")),
        ]);
        let mut view = TreeView::with_tree(tree, Viewport::new(10.0));
        let policy = MovePolicy::new();
        view.begin_drag(0, &policy).unwrap();
        let events = view.finish_drag(0, 3, &policy).unwrap();
        assert_eq!(names(&view), ["second", "third", "first"]);
        assert_eq!(
            events[0],
            TreeEvent::NodeMoved {
                prev_path: alloc::vec![0],
                prev_row: Some(0),
                next_path: alloc::vec![2],
                next_row: Some(2),
                next_parent: None,
            }
        );
        assert_eq!(events[1], TreeEvent::DragEnded { dropped: true });
    }

    #[test]
    fn edits_through_the_closure_keep_rows_fresh() {
        let tree = Tree::from_roots(alloc::vec![TreeNode::new(String::from("only"))]);
        let mut view = TreeView::with_tree(tree, Viewport::new(10.0));
        view.edit(|t| t.insert(&[], 0, TreeNode::new(String::from("front"))))
            .unwrap();
        assert_eq!(names(&view), ["front", "only"]);
    }
}
