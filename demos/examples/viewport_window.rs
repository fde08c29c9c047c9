// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtualized windowing over a hundred-thousand-row tree.
//!
//! Only the rows inside the viewport (plus overscan) are materialized;
//! scrolling just moves the window.
//!
//! Run:
//! - `cargo run -p arbor_demos --example viewport_window`

use arbor_tree::{Tree, TreeNode};
use arbor_view::{ScrollAlign, TreeView, Viewport};
use kurbo::Size;

fn chapter(c: usize) -> TreeNode<String> {
    TreeNode::new(format!("chapter-{c}"))
        .with_expanded(true)
        .with_children(
            (0..99)
                .map(|s| TreeNode::new(format!("chapter-{c}/section-{s}")))
                .collect(),
        )
}

fn main() {
    let tree = Tree::from_roots((0..1000).map(chapter).collect());
    let mut view = TreeView::with_tree(
        tree,
        Viewport::new(18.0).with_size(Size::new(480.0, 180.0)),
    );
    println!(
        "rows: {}, content height: {:.0}px",
        view.row_count(),
        view.viewport().content_height(view.row_count())
    );

    for scroll in [0.0, 90.0, 36_000.0, 1_000_000.0] {
        view.set_scroll_top(scroll);
        let window = view.visible_range(2);
        println!(
            "\nscroll={:.0} -> window {:?} ({} rows)",
            view.viewport().scroll_top(),
            window.clone(),
            window.len()
        );
        for i in window.take(4) {
            let row = view.row(i).unwrap();
            let name = &view.tree().node_at(&row.path).unwrap().data;
            println!("  {:>6}  depth {}  {}", i, row.depth, name);
        }
        println!("  ...");
    }

    // Jump straight to a row; Center puts it mid-viewport.
    view.scroll_to_row(55_000, ScrollAlign::Center);
    println!(
        "\nafter scroll_to_row(55000, Center): scroll={:.0}, window {:?}",
        view.viewport().scroll_top(),
        view.visible_range(0)
    );
}
