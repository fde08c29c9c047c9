// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental search: matching, narrowing, and focus cycling.
//!
//! Run:
//! - `cargo run -p arbor_demos --example search_focus`

use arbor_tree::{Tree, TreeNode, substring_method};
use arbor_view::{SearchOptions, TreeEvent, TreeView, Viewport};
use kurbo::Size;

fn library() -> Tree<String> {
    let shelf = |name: &str, books: &[&str]| {
        TreeNode::new(String::from(name)).with_children(
            books
                .iter()
                .map(|b| TreeNode::new(String::from(*b)))
                .collect(),
        )
    };
    Tree::from_roots(vec![
        shelf("novels", &["Wind in the Pines", "The Winter Room", "Summer Light"]),
        shelf("poetry", &["Windfall", "Harvest Songs"]),
        shelf("manuals", &["Woodworking", "Window Glazing"]),
    ])
}

fn print_visible(view: &TreeView<String>) {
    for row in view.rows() {
        let name = &view.tree().node_at(&row.path).unwrap().data;
        let focused = view
            .focused_match()
            .and_then(|m| m.row)
            .is_some_and(|r| r == row.index);
        let mark = if focused { " <-- focus" } else { "" };
        println!("  {}{}{}", "    ".repeat(row.depth), name, mark);
    }
}

fn main() {
    let mut view = TreeView::with_tree(
        library(),
        Viewport::new(20.0).with_size(Size::new(400.0, 120.0)),
    );
    // Everything starts collapsed: only the shelves are visible.
    println!("== Collapsed library ==");
    print_visible(&view);

    // Matching expands the ancestors of every match.
    let event = view.set_query(
        "wind",
        substring_method(|d: &String| d.as_str()),
        &SearchOptions::default(),
    );
    println!("\n== set_query(\"wind\") -> {event:?} ==");
    print_visible(&view);

    // Cycle the focus; the viewport follows each jump.
    for _ in 0..3 {
        if let Some(TreeEvent::SearchFocusChanged { focus, row }) = view.focus_next() {
            println!("focus_next -> match {focus} at row {row:?}");
        }
    }

    // Narrowing mode collapses everything that is not on a match path.
    let options = SearchOptions {
        only_expand_matches: true,
        ..SearchOptions::default()
    };
    let event = view.set_query("winter", substring_method(|d: &String| d.as_str()), &options);
    println!("\n== narrowed to \"winter\" -> {event:?} ==");
    print_visible(&view);

    let _ = view.clear_query();
    println!("\nafter clear_query: {} matches", view.matches().len());
}
