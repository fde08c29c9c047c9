// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-slot resolution against an [`arbor_view::TreeView`].
//!
//! ## Feature
//!
//! Enable with the `view_adapter` feature.
//!
//! ## Notes
//!
//! - Coordinates are viewport-local, the same space
//!   [`DragSession`](crate::session::DragSession) events report.
//! - [`resolve_drop`] is a dry run. A candidate with `allowed: true`
//!   is guaranteed to land when its `depth` and `min_row` are passed
//!   straight to [`TreeView::finish_drag`], because both sides run the
//!   same slot search and policy checks. A candidate at the lifted
//!   node's own origin finishes as a restore, since nothing moves.

use alloc::vec::Vec;

use arbor_view::{DropProbe, MovePolicy, TreeView};

use crate::slot::depth_for_drift;

/// A resolved drop target for the active drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropCandidate {
    /// Depth the payload would land at.
    pub depth: usize,
    /// The minimum-row constraint that resolved this candidate. Pass it
    /// to [`TreeView::finish_drag`] together with `depth` to land here.
    pub min_row: usize,
    /// Path the payload would occupy.
    pub path: Vec<usize>,
    /// Visible row the payload would occupy.
    pub row: usize,
    /// Parent path of the landing slot; `None` for the root list.
    pub parent: Option<Vec<usize>>,
    /// Whether the view's policy checks accept this drop.
    pub allowed: bool,
}

/// Resolve where the active drag would drop, from pointer geometry.
///
/// `local_y` picks the insertion row: the row under the pointer, the
/// top when the pointer is above the rows, one past the end when it is
/// below them. `drift_x` bends the requested depth in `indent`-sized
/// steps from the lifted node's origin depth, clamped to the depths
/// the rows around the insertion point admit (and to the policy's
/// depth limit, so the indicator never shows a slot the drop would
/// refuse on depth alone).
///
/// Returns `None` when no drag is active or no slot of the clamped
/// depth exists at or after the insertion row.
pub fn resolve_drop<T>(
    view: &TreeView<T>,
    policy: &MovePolicy<T>,
    local_y: f64,
    drift_x: f64,
    indent: f64,
) -> Option<DropCandidate> {
    let lift = view.lift()?;
    let node = lift.node();
    let count = view.row_count();
    let min_row = if view.viewport().local_to_content(local_y) < 0.0 {
        0
    } else {
        view.row_at_y(local_y).unwrap_or(count)
    };

    let requested = depth_for_drift(lift.origin_depth(), drift_x, indent);
    let lo = view.row(min_row).map_or(0, |below| below.depth);
    let mut hi = min_row
        .checked_sub(1)
        .and_then(|i| view.row(i))
        .map_or(0, |above| above.depth + 1);
    if let Some(max) = policy.max_depth {
        hi = hi.min(max.saturating_sub(node.subtree_depth()));
    }
    // Adjacent rows step one level at a time, so `lo <= hi` short of a
    // depth cap below `lo`; the cap case surfaces as a refused drop.
    let depth = requested.clamp(lo, hi.max(lo));

    let slot = view.tree().find_slot(depth, min_row).ok()?;
    let probe = DropProbe {
        node,
        prev_path: lift.prev_path(),
        next_parent: slot.parent.as_deref(),
        next_path: &slot.path,
        depth,
    };
    let allowed = policy.within_depth(depth, node.subtree_depth()) && policy.allows_drop(&probe);
    Some(DropCandidate {
        depth,
        min_row,
        path: slot.path,
        row: slot.row,
        parent: slot.parent,
        allowed,
    })
}

/// Nudge the view's scroll while the pointer hovers a viewport edge.
///
/// One call applies at most one row height of scroll; hosts call this
/// per pointer sample or animation tick while a drag is live. The
/// applied delta comes back, `0.0` away from the edges.
pub fn auto_scroll<T>(view: &mut TreeView<T>, local_y: f64, slide_region: f64) -> f64 {
    let step = view.viewport().auto_scroll_step(local_y, slide_region);
    if step == 0.0 {
        0.0
    } else {
        view.scroll_by(step)
    }
}
