// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full drag pipeline: pointer samples through recognition, drop-slot
//! resolution, and the tree edit.
//!
//! The mouse backend recognizes the gesture, the session reports drift,
//! and the view adapter resolves where the payload would land before
//! `finish_drag` commits the move.
//!
//! Run:
//! - `cargo run -p arbor_demos --example drag_reorder`

use arbor_drag::adapters::view::resolve_drop;
use arbor_drag::backend::{MouseBackend, PointerAction, PointerSample};
use arbor_drag::session::{DragEvent, DragSession};
use arbor_tree::{Tree, TreeNode};
use arbor_view::{MovePolicy, TreeView, Viewport};
use kurbo::Size;

const ROW_H: f64 = 20.0;
const INDENT: f64 = 24.0;

fn print_tree(view: &TreeView<&'static str>) {
    for row in view.rows() {
        let name = view.tree().node_at(&row.path).map(|n| n.data).unwrap_or("?");
        println!("  {}{}", "    ".repeat(row.depth), name);
    }
}

fn main() {
    let tree = Tree::from_roots(vec![
        TreeNode::new("inbox").with_expanded(true).with_children(vec![
            TreeNode::new("report.pdf"),
            TreeNode::new("notes.txt"),
        ]),
        TreeNode::new("archive").with_expanded(true),
        TreeNode::new("todo.md"),
    ]);
    let mut view = TreeView::with_tree(
        tree,
        Viewport::new(ROW_H).with_size(Size::new(400.0, 200.0)),
    );
    let policy = MovePolicy::new();
    let mut session = DragSession::new(MouseBackend::with_threshold(4.0));

    println!("== Before ==");
    print_tree(&view);

    // Press on row 4 ("todo.md"), pull up with one indent of rightward
    // drift, release just under "archive" to land as its child.
    let samples = [
        PointerSample::new(8.0, 90.0, 0, PointerAction::Down),
        PointerSample::new(14.0, 86.0, 16, PointerAction::Move),
        PointerSample::new(30.0, 70.0, 32, PointerAction::Move),
        PointerSample::new(34.0, 85.0, 48, PointerAction::Up),
    ];

    for sample in &samples {
        let Some(event) = session.feed(sample) else {
            continue;
        };
        match event {
            DragEvent::Started => {
                let (_, press_y) = session.origin().unwrap();
                let row = view.row_at_y(press_y).unwrap();
                let started = view.begin_drag(row, &policy).unwrap();
                println!("\n{started:?}");
            }
            DragEvent::Moved { y, dx, .. } => {
                if let Some(candidate) = resolve_drop(&view, &policy, y, dx, INDENT) {
                    println!(
                        "hovering: depth {} row {} allowed {}",
                        candidate.depth, candidate.row, candidate.allowed
                    );
                }
            }
            DragEvent::Finished { y, dx, .. } => {
                let candidate = resolve_drop(&view, &policy, y, dx, INDENT).unwrap();
                let events = view
                    .finish_drag(candidate.depth, candidate.min_row, &policy)
                    .unwrap();
                println!("dropped: {events:?}");
            }
            DragEvent::Canceled => {
                println!("canceled: {:?}", view.cancel_drag());
            }
        }
    }

    println!("\n== After ==");
    print_tree(&view);
}
