// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matching over tree data.
//!
//! Matching is independent of visibility: collapsed nodes match too, so a
//! widget can reveal them. What constitutes a match is fully caller-defined
//! through a method predicate; [`substring_method`] builds the common case.

use alloc::vec::Vec;

use crate::node::TreeNode;
use crate::tree::Tree;
use crate::walk::Flow;

/// One search match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// Positional path of the matched node.
    pub path: Vec<usize>,
    /// Visible row index of the matched node, filled in by the widget state
    /// once reveal expansion has run. `None` while the node is hidden.
    pub row: Option<usize>,
}

/// ASCII-case-insensitive substring test.
///
/// Bytes outside ASCII compare exactly, so multi-byte text matches verbatim.
pub fn contains_ignore_ascii_case(haystack: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(query.len())
        .any(|w| w.eq_ignore_ascii_case(query.as_bytes()))
}

/// Build the default search method: ASCII-case-insensitive substring over a
/// caller-provided text accessor.
pub fn substring_method<T>(
    text_of: impl Fn(&T) -> &str,
) -> impl Fn(&TreeNode<T>, &[usize], &str) -> bool {
    move |node, _path, query| contains_ignore_ascii_case(text_of(&node.data), query)
}

impl<T> Tree<T> {
    /// Collect matches in document order over the whole forest, collapsed
    /// nodes included.
    ///
    /// An empty query matches nothing; an incremental search treats it as
    /// clearing. Row indices are left unfilled (see [`Match::row`]).
    pub fn find(
        &self,
        query: &str,
        mut method: impl FnMut(&TreeNode<T>, &[usize], &str) -> bool,
    ) -> Vec<Match> {
        let mut matches = Vec::new();
        if query.is_empty() {
            return matches;
        }
        self.walk(false, &mut |v| {
            if method(v.node, v.path, query) {
                matches.push(Match {
                    path: v.path.to_vec(),
                    row: None,
                });
            }
            Flow::Continue
        });
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn tree() -> Tree<&'static str> {
        Tree::from_roots(vec![
            TreeNode::new("Alpha").with_expanded(true).with_children(vec![
                TreeNode::new("beta")
                    .with_expanded(false)
                    .with_children(vec![TreeNode::new("Alphabet")]),
                TreeNode::new("gamma"),
            ]),
            TreeNode::new("delta"),
        ])
    }

    #[test]
    fn substring_ignores_ascii_case() {
        assert!(contains_ignore_ascii_case("Alphabet", "alpha"));
        assert!(contains_ignore_ascii_case("alphabet", "BET"));
        assert!(!contains_ignore_ascii_case("beta", "alpha"));
        // Longer query than haystack.
        assert!(!contains_ignore_ascii_case("ab", "abc"));
    }

    #[test]
    fn matches_are_document_order_including_hidden() {
        let t = tree();
        let matches = t.find("alpha", substring_method(|d: &&str| *d));
        let paths: Vec<_> = matches.iter().map(|m| m.path.clone()).collect();
        // "Alphabet" is hidden behind collapsed "beta" but still matches.
        assert_eq!(paths, vec![vec![0], vec![0, 0, 0]]);
        assert!(matches.iter().all(|m| m.row.is_none()));
    }

    #[test]
    fn empty_query_matches_nothing() {
        let t = tree();
        assert!(t.find("", substring_method(|d: &&str| *d)).is_empty());
    }

    #[test]
    fn custom_method_sees_paths() {
        let t = tree();
        // Match only nodes at depth 1, regardless of text.
        let matches = t.find("*", |_n, path, _q| path.len() == 2);
        assert_eq!(matches.len(), 2);
    }
}
