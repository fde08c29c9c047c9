// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building a tree, rendering its rows, and toggling expansion.
//!
//! Run:
//! - `cargo run -p arbor_demos --example tree_basics`

use arbor_tree::{Tree, TreeNode};
use arbor_view::{GuideSet, TreeView, Viewport, scaffold};
use kurbo::Size;

fn print_rows(view: &TreeView<&'static str>) {
    for row in view.rows() {
        let guides = GuideSet::ASCII.render(&scaffold(row));
        let marker = if row.is_leaf() {
            "  "
        } else if row.expanded {
            "v "
        } else {
            "> "
        };
        let name = view.tree().node_at(&row.path).map(|n| n.data).unwrap_or("?");
        println!("{:>2}  {guides}{marker}{name}", row.index);
    }
}

fn main() {
    let tree = Tree::from_roots(vec![
        TreeNode::new("src").with_expanded(true).with_children(vec![
            TreeNode::new("parser").with_children(vec![
                TreeNode::new("lexer.rs"),
                TreeNode::new("grammar.rs"),
            ]),
            TreeNode::new("main.rs"),
        ]),
        TreeNode::new("tests").with_children(vec![TreeNode::new("integration.rs")]),
        TreeNode::new("README.md"),
    ]);

    let viewport = Viewport::new(20.0).with_size(Size::new(300.0, 200.0));
    let mut view = TreeView::with_tree(tree, viewport);

    println!("== Initial rows ==");
    print_rows(&view);

    // Expand the collapsed "parser" row.
    let event = view.toggle_row(1);
    println!("\n== After toggling row 1 ({event:?}) ==");
    print_rows(&view);

    // Collapsing the root hides the whole subtree but keeps the data.
    let event = view.toggle_row(0);
    println!("\n== After toggling row 0 ({event:?}) ==");
    print_rows(&view);
    println!(
        "\nvisible rows: {}, nodes in the tree: {}",
        view.row_count(),
        view.tree().len()
    );
}
