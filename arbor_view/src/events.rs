// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications returned by view operations.

use alloc::vec::Vec;

/// A change reported by a [`TreeView`](crate::TreeView) operation.
///
/// Operations return events instead of invoking stored callbacks; hosts
/// forward them into whatever notification scheme they use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEvent {
    /// A node's expansion flag flipped through the view.
    VisibilityToggled {
        /// Path of the toggled node.
        path: Vec<usize>,
        /// The flag after the toggle.
        expanded: bool,
    },
    /// A node settled at a new position.
    NodeMoved {
        /// Path before the move.
        prev_path: Vec<usize>,
        /// Visible row index before the move, when the node had a row.
        prev_row: Option<usize>,
        /// Path after the move.
        next_path: Vec<usize>,
        /// Visible row index after the move, when the node has a row.
        next_row: Option<usize>,
        /// Parent path after the move; `None` for the root list.
        next_parent: Option<Vec<usize>>,
    },
    /// A drag lifted a node out of the tree.
    DragStarted {
        /// Path the node was lifted from.
        path: Vec<usize>,
        /// Visible row index the node had.
        row: usize,
    },
    /// An active drag ended.
    DragEnded {
        /// `true` when the node landed somewhere new, `false` when the drag
        /// was canceled or rejected and the node was restored at its origin.
        dropped: bool,
    },
    /// A search pass over the tree finished.
    SearchFinished {
        /// Number of matching nodes.
        matches: usize,
        /// Index of the focused match, when there is one.
        focus: Option<usize>,
    },
    /// The focused match moved.
    SearchFocusChanged {
        /// Index of the focused match.
        focus: usize,
        /// Visible row index of the focused match, when visible.
        row: Option<usize>,
    },
}
