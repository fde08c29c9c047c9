// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget-state container tying tree, rows, viewport, search, and drag
//! together.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use arbor_tree::{Match, Row, SlotInfo, Tree, TreeError, TreeNode};
use kurbo::Size;

use crate::events::TreeEvent;
use crate::viewport::{RowLayout, ScrollAlign, Viewport};

/// Why a move or drop was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The underlying tree operation failed.
    Tree(TreeError),
    /// The source node does not allow dragging (flags or policy).
    NotDraggable,
    /// The target parent does not accept children.
    NotDroppable,
    /// The target lies inside the moved node's own subtree.
    IntoOwnSubtree,
    /// The move would nest deeper than the policy allows.
    DepthExceeded,
    /// The policy's `can_drop` hook refused the target.
    Rejected,
    /// No drag is active.
    NoDrag,
    /// A drag is already active.
    DragActive,
}

impl From<TreeError> for MoveError {
    fn from(err: TreeError) -> Self {
        Self::Tree(err)
    }
}

impl core::fmt::Display for MoveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Tree(err) => write!(f, "{err}"),
            Self::NotDraggable => write!(f, "source node is not draggable"),
            Self::NotDroppable => write!(f, "target parent does not accept children"),
            Self::IntoOwnSubtree => write!(f, "target lies inside the moved subtree"),
            Self::DepthExceeded => write!(f, "move exceeds the maximum depth"),
            Self::Rejected => write!(f, "drop hook refused the target"),
            Self::NoDrag => write!(f, "no drag is active"),
            Self::DragActive => write!(f, "a drag is already active"),
        }
    }
}

impl core::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            _ => None,
        }
    }
}

/// What a [`MovePolicy::can_drop`] hook sees when a target is probed.
#[derive(Debug)]
pub struct DropProbe<'a, T> {
    /// The node being moved.
    pub node: &'a TreeNode<T>,
    /// Path the node is moving from.
    pub prev_path: &'a [usize],
    /// Parent path of the probed target; `None` for the root list.
    pub next_parent: Option<&'a [usize]>,
    /// Path the node would occupy.
    pub next_path: &'a [usize],
    /// Depth the node would occupy.
    pub depth: usize,
}

/// Limits on moves and drops.
///
/// The hooks are plain function pointers, so a policy stays `Copy` and the
/// view never stores caller state.
pub struct MovePolicy<T> {
    /// Deepest row depth the tree may reach; `None` is unlimited.
    pub max_depth: Option<usize>,
    /// Extra veto on top of [`NodeFlags::DRAGGABLE`](arbor_tree::NodeFlags::DRAGGABLE).
    pub can_drag: Option<fn(&TreeNode<T>, &[usize]) -> bool>,
    /// Extra veto on top of [`NodeFlags::DROPPABLE`](arbor_tree::NodeFlags::DROPPABLE).
    pub can_drop: Option<fn(&DropProbe<'_, T>) -> bool>,
}

impl<T> MovePolicy<T> {
    /// No limits beyond the node flags.
    pub const fn new() -> Self {
        Self {
            max_depth: None,
            can_drag: None,
            can_drop: None,
        }
    }

    /// Whether the policy and the node's flags allow lifting it.
    pub fn allows_drag(&self, node: &TreeNode<T>, path: &[usize]) -> bool {
        node.is_draggable() && self.can_drag.is_none_or(|f| f(node, path))
    }

    /// Whether the `can_drop` hook accepts the probed target.
    pub fn allows_drop(&self, probe: &DropProbe<'_, T>) -> bool {
        self.can_drop.is_none_or(|f| f(probe))
    }

    /// Whether a node of `subtree_depth` placed at `target_depth` stays
    /// within `max_depth`.
    pub fn within_depth(&self, target_depth: usize, subtree_depth: usize) -> bool {
        self.max_depth
            .is_none_or(|max| target_depth + subtree_depth <= max)
    }
}

impl<T> Default for MovePolicy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MovePolicy<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MovePolicy<T> {}

impl<T> core::fmt::Debug for MovePolicy<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MovePolicy")
            .field("max_depth", &self.max_depth)
            .field("can_drag", &self.can_drag.is_some())
            .field("can_drop", &self.can_drop.is_some())
            .finish()
    }
}

/// A node lifted out of the tree by an active drag.
#[derive(Clone, Debug)]
pub struct Lift<T> {
    node: TreeNode<T>,
    prev_path: Vec<usize>,
    prev_row: usize,
}

impl<T> Lift<T> {
    /// The lifted subtree.
    pub fn node(&self) -> &TreeNode<T> {
        &self.node
    }

    /// Path the node was lifted from.
    pub fn prev_path(&self) -> &[usize] {
        &self.prev_path
    }

    /// Visible row index the node had.
    pub fn prev_row(&self) -> usize {
        self.prev_row
    }

    /// Depth the node had.
    pub fn origin_depth(&self) -> usize {
        self.prev_path.len().saturating_sub(1)
    }
}

/// Tuning for [`TreeView::set_query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Expand the ancestors of every match so all matches get rows.
    pub expand_matches: bool,
    /// First collapse everything, then reveal only match ancestors.
    pub only_expand_matches: bool,
    /// How the viewport follows the focused match.
    pub scroll_align: ScrollAlign,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            expand_matches: true,
            only_expand_matches: false,
            scroll_align: ScrollAlign::Nearest,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct SearchState {
    query: Option<String>,
    matches: Vec<Match>,
    focus: Option<usize>,
}

/// Widget state for a scrollable tree view.
///
/// Owns the tree and keeps the visible-row cache in step with it across
/// every operation, tracks scroll geometry, search matches with a focus,
/// and at most one lifted node while a drag is under way.
///
/// Operations report changes as [`TreeEvent`] values instead of invoking
/// stored callbacks.
#[derive(Debug)]
pub struct TreeView<T> {
    tree: Tree<T>,
    rows: Vec<Row>,
    viewport: Viewport,
    search: SearchState,
    lift: Option<Lift<T>>,
}

impl<T> TreeView<T> {
    /// A view over an empty tree.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            tree: Tree::new(),
            rows: Vec::new(),
            viewport,
            search: SearchState::default(),
            lift: None,
        }
    }

    /// A view over an existing tree.
    pub fn with_tree(tree: Tree<T>, viewport: Viewport) -> Self {
        let mut view = Self {
            tree,
            rows: Vec::new(),
            viewport,
            search: SearchState::default(),
            lift: None,
        };
        view.refresh();
        view
    }

    /// The tree under the view.
    pub fn tree(&self) -> &Tree<T> {
        &self.tree
    }

    /// Edit the tree directly; the row cache and match rows are brought
    /// back in step when the closure returns.
    ///
    /// Match paths are not re-resolved, so structural edits can orphan
    /// search results; re-run [`TreeView::set_query`] afterwards.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Tree<T>) -> R) -> R {
        let out = f(&mut self.tree);
        self.refresh();
        out
    }

    /// Take the tree out, dropping all view state.
    pub fn into_tree(self) -> Tree<T> {
        self.tree
    }

    /// The visible rows, top to bottom.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of visible rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The row at a dense visible index.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Visible row index of the node at `path`, when it has a row.
    pub fn row_index_of(&self, path: &[usize]) -> Option<usize> {
        // Document order is lexicographic on positional paths.
        self.rows
            .binary_search_by(|row| row.path.as_slice().cmp(path))
            .ok()
    }

    // --- Scroll geometry ---

    /// Scroll geometry, read-only; mutations go through the view so the
    /// row count stays authoritative.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Resize the viewport, keeping the scroll position in content bounds.
    pub fn resize(&mut self, size: Size) {
        self.viewport.resize(size, self.rows.len());
    }

    /// Set the absolute scroll position, clamped to the content.
    pub fn set_scroll_top(&mut self, y: f64) {
        self.viewport.set_scroll_top(y, self.rows.len());
    }

    /// Scroll by `dy`; returns the movement actually applied.
    pub fn scroll_by(&mut self, dy: f64) -> f64 {
        self.viewport.scroll_by(dy, self.rows.len())
    }

    /// Bring a row to where `align` asks.
    pub fn scroll_to_row(&mut self, index: usize, align: ScrollAlign) {
        self.viewport.scroll_to_row(index, align, self.rows.len());
    }

    /// The dense row range worth materializing at the current scroll
    /// position, widened by `overscan` rows on each side.
    pub fn visible_range(&self, overscan: usize) -> Range<usize> {
        self.viewport.visible_range(self.rows.len(), overscan)
    }

    /// The visible row under a viewport-local y, when one is.
    pub fn row_at_y(&self, local_y: f64) -> Option<usize> {
        let y = self.viewport.local_to_content(local_y);
        self.viewport.row_at_content_y(y, self.rows.len())
    }

    /// Hot zones of a visible row, with `indent` pixels per level.
    pub fn row_layout(&self, index: usize, indent: f64) -> Option<RowLayout> {
        let row = self.rows.get(index)?;
        Some(self.viewport.row_layout(index, row.depth, indent))
    }

    // --- Expansion ---

    /// Toggle the node behind a visible row; leaves are left alone.
    pub fn toggle_row(&mut self, index: usize) -> Option<TreeEvent> {
        let row = self.rows.get(index)?;
        if row.is_leaf() {
            return None;
        }
        let path = row.path.clone();
        let expanded = self.tree.toggle_expanded(&path).ok()?;
        self.refresh();
        Some(TreeEvent::VisibilityToggled { path, expanded })
    }

    /// Set the expansion flag of the node at `path`.
    ///
    /// `Ok(None)` when the flag already had that value.
    pub fn set_expanded(
        &mut self,
        path: &[usize],
        expanded: bool,
    ) -> Result<Option<TreeEvent>, TreeError> {
        let changed = self.tree.set_expanded(path, expanded)?;
        if !changed {
            return Ok(None);
        }
        self.refresh();
        Ok(Some(TreeEvent::VisibilityToggled {
            path: path.to_vec(),
            expanded,
        }))
    }

    /// Expand every node. Bulk changes report no per-node events.
    pub fn expand_all(&mut self) {
        self.tree.expand_all();
        self.refresh();
    }

    /// Collapse every node.
    pub fn collapse_all(&mut self) {
        self.tree.collapse_all();
        self.refresh();
    }

    // --- Structure ---

    /// Insert a node as child `index` of `parent_path`.
    pub fn insert(
        &mut self,
        parent_path: &[usize],
        index: usize,
        node: TreeNode<T>,
    ) -> Result<(), TreeError> {
        self.tree.insert(parent_path, index, node)?;
        self.refresh();
        Ok(())
    }

    /// Remove the subtree at `path` and hand it back.
    pub fn remove(&mut self, path: &[usize]) -> Result<TreeNode<T>, TreeError> {
        let node = self.tree.remove(path)?;
        self.refresh();
        Ok(node)
    }

    /// Move the node at `from` to child `to_index` of `to_parent`.
    ///
    /// Both positions name nodes of the tree as it is now; a move further
    /// down its own sibling list accounts for the removal automatically.
    /// The policy is consulted the way a drop is: drag rights on the
    /// source, drop rights on the target parent, the depth limit, then the
    /// `can_drop` hook (probed with pre-move coordinates).
    pub fn move_node(
        &mut self,
        from: &[usize],
        to_parent: &[usize],
        to_index: usize,
        policy: &MovePolicy<T>,
    ) -> Result<TreeEvent, MoveError> {
        if self.lift.is_some() {
            return Err(MoveError::DragActive);
        }
        let node = self.tree.node_at(from).ok_or(TreeError::PathNotFound)?;
        if !policy.allows_drag(node, from) {
            return Err(MoveError::NotDraggable);
        }
        if to_parent.starts_with(from) {
            return Err(MoveError::IntoOwnSubtree);
        }
        if !policy.within_depth(to_parent.len(), node.subtree_depth()) {
            return Err(MoveError::DepthExceeded);
        }
        let list_len = if to_parent.is_empty() {
            self.tree.roots().len()
        } else {
            let parent = self.tree.node_at(to_parent).ok_or(TreeError::PathNotFound)?;
            if !parent.is_droppable() {
                return Err(MoveError::NotDroppable);
            }
            parent.child_count()
        };
        let mut probe_path = to_parent.to_vec();
        probe_path.push(to_index);
        let probe = DropProbe {
            node,
            prev_path: from,
            next_parent: (!to_parent.is_empty()).then_some(to_parent),
            next_path: &probe_path,
            depth: to_parent.len(),
        };
        if !policy.allows_drop(&probe) {
            return Err(MoveError::Rejected);
        }

        // Removing `from` shifts everything after it in its sibling list;
        // rewrite the target into post-removal coordinates.
        let level = from.len() - 1;
        let mut parent_vec = to_parent.to_vec();
        let mut index = to_index;
        let mut len_after = list_len;
        if parent_vec.len() > level
            && parent_vec[..level] == from[..level]
            && parent_vec[level] > from[level]
        {
            parent_vec[level] -= 1;
        } else if parent_vec.len() == level && parent_vec[..] == from[..level] {
            len_after -= 1;
            if index > from[level] {
                index -= 1;
            }
        }
        if index > len_after {
            return Err(MoveError::Tree(TreeError::IndexOutOfBounds));
        }

        let prev_row = self.row_index_of(from);
        let node = self.tree.remove(from)?;
        // The parent was checked and the index bounded above, so this
        // cannot miss.
        let _ = self.tree.insert(&parent_vec, index, node);
        self.refresh();
        let mut next_path = parent_vec.clone();
        next_path.push(index);
        let next_row = self.row_index_of(&next_path);
        Ok(TreeEvent::NodeMoved {
            prev_path: from.to_vec(),
            prev_row,
            next_path,
            next_row,
            next_parent: (!parent_vec.is_empty()).then_some(parent_vec),
        })
    }

    // --- Drag ---

    /// The active lift, while a drag is under way.
    pub fn lift(&self) -> Option<&Lift<T>> {
        self.lift.as_ref()
    }

    /// Lift the node behind a visible row out of the tree to start a drag.
    ///
    /// Until the drag finishes or cancels the tree no longer contains the
    /// node, and other edits must wait.
    pub fn begin_drag(
        &mut self,
        row: usize,
        policy: &MovePolicy<T>,
    ) -> Result<TreeEvent, MoveError> {
        if self.lift.is_some() {
            return Err(MoveError::DragActive);
        }
        let info = self.rows.get(row).ok_or(TreeError::PathNotFound)?;
        let path = info.path.clone();
        let node = self.tree.node_at(&path).ok_or(TreeError::PathNotFound)?;
        if !policy.allows_drag(node, &path) {
            return Err(MoveError::NotDraggable);
        }
        let node = self.tree.remove(&path)?;
        self.lift = Some(Lift {
            node,
            prev_path: path.clone(),
            prev_row: row,
        });
        self.refresh();
        Ok(TreeEvent::DragStarted { path, row })
    }

    /// Land the lifted node at the first slot of `depth` at or after
    /// `min_row`, subject to the policy.
    ///
    /// A missing or refused slot restores the node at its origin, exactly
    /// like [`TreeView::cancel_drag`]; so does a slot equal to the origin,
    /// since nothing moved. The returned events say which way it went.
    /// Errors only when no drag is active.
    pub fn finish_drag(
        &mut self,
        depth: usize,
        min_row: usize,
        policy: &MovePolicy<T>,
    ) -> Result<Vec<TreeEvent>, MoveError> {
        let lift = self.lift.take().ok_or(MoveError::NoDrag)?;
        let Ok(slot) = self.tree.find_slot(depth, min_row) else {
            return Ok(vec![self.restore(lift)]);
        };
        if slot.path == lift.prev_path {
            return Ok(vec![self.restore(lift)]);
        }
        if !policy.within_depth(depth, lift.node.subtree_depth()) {
            return Ok(vec![self.restore(lift)]);
        }
        let probe = DropProbe {
            node: &lift.node,
            prev_path: &lift.prev_path,
            next_parent: slot.parent.as_deref(),
            next_path: &slot.path,
            depth,
        };
        if !policy.allows_drop(&probe) {
            return Ok(vec![self.restore(lift)]);
        }
        let Lift {
            node,
            prev_path,
            prev_row,
        } = lift;
        self.tree.insert_at_slot(&slot, node);
        self.refresh();
        Ok(vec![
            TreeEvent::NodeMoved {
                prev_path,
                prev_row: Some(prev_row),
                next_path: slot.path,
                next_row: Some(slot.row),
                next_parent: slot.parent,
            },
            TreeEvent::DragEnded { dropped: true },
        ])
    }

    /// Abort an active drag, restoring the node at its origin.
    pub fn cancel_drag(&mut self) -> Option<TreeEvent> {
        let lift = self.lift.take()?;
        Some(self.restore(lift))
    }

    fn restore(&mut self, lift: Lift<T>) -> TreeEvent {
        let Lift {
            node,
            prev_path,
            prev_row,
        } = lift;
        let parent = prev_path
            .split_last()
            .and_then(|(_, p)| (!p.is_empty()).then(|| p.to_vec()));
        let slot = SlotInfo {
            path: prev_path,
            row: prev_row,
            parent,
        };
        self.tree.insert_at_slot(&slot, node);
        self.refresh();
        TreeEvent::DragEnded { dropped: false }
    }

    // --- Search ---

    /// The current query.
    pub fn query(&self) -> Option<&str> {
        self.search.query.as_deref()
    }

    /// The current matches, in document order.
    pub fn matches(&self) -> &[Match] {
        &self.search.matches
    }

    /// Index into [`TreeView::matches`] of the focused match.
    pub fn focus(&self) -> Option<usize> {
        self.search.focus
    }

    /// The focused match, when there is one.
    pub fn focused_match(&self) -> Option<&Match> {
        self.search.matches.get(self.search.focus?)
    }

    /// Run `method` over every node, collapsed ones included, and keep the
    /// matches.
    ///
    /// With [`SearchOptions::expand_matches`] the ancestors of each match
    /// are expanded so every match gets a row;
    /// [`SearchOptions::only_expand_matches`] collapses everything else
    /// first. The focus carries over from the previous query when still in
    /// range, and the viewport follows it. An empty query clears.
    pub fn set_query(
        &mut self,
        query: &str,
        method: impl Fn(&TreeNode<T>, &[usize], &str) -> bool,
        options: &SearchOptions,
    ) -> TreeEvent {
        if query.is_empty() {
            return self.clear_query();
        }
        let prev_focus = self.search.focus;
        let matches = self.tree.find(query, method);
        if options.only_expand_matches {
            self.tree.collapse_all();
        }
        if options.expand_matches || options.only_expand_matches {
            for m in &matches {
                let _ = self.tree.expand_along(&m.path);
            }
        }
        self.search.query = Some(String::from(query));
        self.search.matches = matches;
        self.refresh();
        let len = self.search.matches.len();
        self.search.focus = (len > 0).then(|| prev_focus.unwrap_or(0).min(len - 1));
        if let Some(focus) = self.search.focus
            && let Some(row) = self.search.matches[focus].row
        {
            self.scroll_to_row(row, options.scroll_align);
        }
        TreeEvent::SearchFinished {
            matches: len,
            focus: self.search.focus,
        }
    }

    /// Drop the query and all match state.
    ///
    /// Expansion changes made while searching stay as they are.
    pub fn clear_query(&mut self) -> TreeEvent {
        self.search.query = None;
        self.search.matches.clear();
        self.search.focus = None;
        TreeEvent::SearchFinished {
            matches: 0,
            focus: None,
        }
    }

    /// Focus the next match, wrapping past the end. `None` without matches.
    pub fn focus_next(&mut self) -> Option<TreeEvent> {
        self.step_focus(true)
    }

    /// Focus the previous match, wrapping past the start.
    pub fn focus_prev(&mut self) -> Option<TreeEvent> {
        self.step_focus(false)
    }

    fn step_focus(&mut self, forward: bool) -> Option<TreeEvent> {
        let len = self.search.matches.len();
        if len == 0 {
            return None;
        }
        let next = match (self.search.focus, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(cur), true) => (cur + 1) % len,
            (Some(cur), false) => (cur + len - 1) % len,
        };
        self.search.focus = Some(next);
        let row = self.search.matches[next].row;
        if let Some(row) = row {
            self.scroll_to_row(row, ScrollAlign::Nearest);
        }
        Some(TreeEvent::SearchFocusChanged { focus: next, row })
    }

    /// Rebuild the row cache and everything derived from it.
    fn refresh(&mut self) {
        self.rows = self.tree.rows();
        self.viewport.clamp_scroll(self.rows.len());
        // Match rows go stale with every reflow. Both lists are in document
        // order, so one merge pass re-pins them; hidden matches get `None`.
        let matches = &mut self.search.matches;
        let mut mi = 0;
        for row in &self.rows {
            while mi < matches.len() && matches[mi].path.as_slice() < row.path.as_slice() {
                matches[mi].row = None;
                mi += 1;
            }
            if mi < matches.len() && matches[mi].path == row.path {
                matches[mi].row = Some(row.index);
                mi += 1;
            }
        }
        for m in &mut matches[mi..] {
            m.row = None;
        }
    }
}
