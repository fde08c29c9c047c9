// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Round-tripping between flat parent-keyed records and the nested tree.
//!
//! Flat rows with `(key, parent)` pairs are what databases and
//! spreadsheets hand out; `from_flat` nests them and `to_flat` turns an
//! edited tree back into records.
//!
//! Run:
//! - `cargo run -p arbor_demos --example flat_data`

use arbor_tree::{FlatRecord, Tree, TreeNode};

fn main() {
    // Order does not matter: children may arrive before their parents.
    let records = vec![
        FlatRecord::new(11, Some(1), String::from("drafts")).with_expanded(true),
        FlatRecord::new(1, None, String::from("mail")).with_expanded(true),
        FlatRecord::new(12, Some(1), String::from("sent")),
        FlatRecord::new(2, None, String::from("feeds")).with_expanded(true),
        FlatRecord::new(21, Some(2), String::from("rust-blog")),
        FlatRecord::new(111, Some(11), String::from("unfinished-reply")),
    ];

    let mut tree: Tree<String> = Tree::from_flat(records).unwrap();
    println!("== Nested ==");
    for row in tree.rows() {
        let name = &tree.node_at(&row.path).unwrap().data;
        println!("  {}{}", "    ".repeat(row.depth), name);
    }

    // Edit the tree, then flatten it back out. Keys here live in the
    // payload; real callers usually carry an id field.
    tree.insert(&[1], 1, TreeNode::new(String::from("podcasts")))
        .unwrap();
    let flat = tree.to_flat(|data| data.clone());
    println!("\n== Back to records ==");
    for r in &flat {
        println!("  key={:<18} parent={:?}", r.key, r.parent);
    }

    // A record pointing at a key that never appears is rejected.
    let orphan = vec![
        FlatRecord::new(1, None, String::from("root")),
        FlatRecord::new(2, Some(9), String::from("stray")),
    ];
    println!("\norphan input -> {:?}", Tree::<String>::from_flat(orphan));
}
