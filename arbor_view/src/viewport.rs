// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll geometry over fixed-height rows.
//!
//! All vertical positions are in content space: y grows downward from the top
//! of row 0, independent of scrolling. Pointer input arrives in
//! viewport-local coordinates and converts through
//! [`Viewport::local_to_content`]. Float inputs are assumed to be finite.

use core::ops::Range;

use kurbo::{Rect, Size};

/// Where [`Viewport::scroll_to_row`] places the target row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Top edge of the viewport.
    Start,
    /// Vertically centered.
    Center,
    /// Bottom edge of the viewport.
    End,
    /// The shortest scroll that makes the row fully visible; none when it
    /// already is.
    #[default]
    Nearest,
}

/// Hot zones of one row, in content space.
///
/// From the left: ancestor guide columns, the expand/collapse toggle cell,
/// the drag handle cell, then the content. Each cell is one indent wide.
/// Hosts with a different arrangement can take [`RowLayout::rect`] and
/// carve it themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowLayout {
    /// The whole row.
    pub rect: Rect,
    /// Ancestor guide columns; empty for roots.
    pub guides: Rect,
    /// The expand/collapse toggle cell.
    pub toggle: Rect,
    /// The drag handle cell.
    pub handle: Rect,
    /// Everything right of the handle.
    pub content: Rect,
}

/// Scroll state over a list of fixed-height rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    size: Size,
    row_height: f64,
    scroll_top: f64,
}

impl Viewport {
    /// A zero-sized viewport at the top of the content.
    ///
    /// `row_height` is clamped to at least one pixel.
    pub fn new(row_height: f64) -> Self {
        Self {
            size: Size::ZERO,
            row_height: row_height.max(1.0),
            scroll_top: 0.0,
        }
    }

    /// Builder-style size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Height of every row, in pixels.
    #[inline]
    pub const fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Viewport size.
    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Scroll offset from the top of the content.
    #[inline]
    pub const fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Total pixel height of `count` rows.
    #[inline]
    pub fn content_height(&self, count: usize) -> f64 {
        count as f64 * self.row_height
    }

    /// Greatest scroll position that still fills the viewport.
    pub fn max_scroll(&self, count: usize) -> f64 {
        (self.content_height(count) - self.size.height).max(0.0)
    }

    /// Set the scroll position, clamped to `[0, max_scroll]`.
    pub fn set_scroll_top(&mut self, y: f64, count: usize) {
        self.scroll_top = y.clamp(0.0, self.max_scroll(count));
    }

    /// Scroll by `dy`; returns the movement actually applied after clamping.
    pub fn scroll_by(&mut self, dy: f64, count: usize) -> f64 {
        let before = self.scroll_top;
        self.set_scroll_top(before + dy, count);
        self.scroll_top - before
    }

    /// Re-clamp the scroll position after the content shrank.
    pub fn clamp_scroll(&mut self, count: usize) {
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll(count));
    }

    /// Change the viewport size, keeping the scroll position in bounds.
    pub fn resize(&mut self, size: Size, count: usize) {
        self.size = size;
        self.clamp_scroll(count);
    }

    /// Scroll so row `index` sits where `align` asks, within content bounds.
    pub fn scroll_to_row(&mut self, index: usize, align: ScrollAlign, count: usize) {
        let top = index as f64 * self.row_height;
        let bottom = top + self.row_height;
        let height = self.size.height;
        let target = match align {
            ScrollAlign::Start => top,
            ScrollAlign::Center => top - (height - self.row_height) / 2.0,
            ScrollAlign::End => bottom - height,
            ScrollAlign::Nearest => {
                if top < self.scroll_top {
                    top
                } else if bottom > self.scroll_top + height {
                    bottom - height
                } else {
                    return;
                }
            }
        };
        self.scroll_top = target.clamp(0.0, self.max_scroll(count));
    }

    /// Convert a viewport-local y to content space.
    #[inline]
    pub fn local_to_content(&self, y: f64) -> f64 {
        y + self.scroll_top
    }

    /// Convert a content-space y to viewport-local.
    #[inline]
    pub fn content_to_local(&self, y: f64) -> f64 {
        y - self.scroll_top
    }

    /// The row containing a content-space y, when one does.
    pub fn row_at_content_y(&self, y: f64, count: usize) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Truncation is the row floor for non-negative y."
        )]
        let index = (y / self.row_height) as usize;
        (index < count).then_some(index)
    }

    /// The dense index range of rows intersecting the viewport, widened by
    /// `overscan` rows on each side and clamped to `count`.
    ///
    /// This is the virtualization window: only rows in this range need to be
    /// materialized for display.
    pub fn visible_range(&self, count: usize, overscan: usize) -> Range<usize> {
        if count == 0 || self.size.height <= 0.0 {
            return 0..0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Scroll offsets are clamped non-negative."
        )]
        let first = (self.scroll_top / self.row_height) as usize;
        let bottom = (self.scroll_top + self.size.height) / self.row_height;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Scroll offsets are clamped non-negative."
        )]
        let mut last = bottom as usize;
        // Round up unless the window ends exactly on a row boundary.
        if (last as f64) < bottom {
            last += 1;
        }
        let first = first.saturating_sub(overscan).min(count);
        let last = last.saturating_add(overscan).min(count);
        first.min(last)..last
    }

    /// The full rectangle of row `index`, in content space.
    pub fn row_rect(&self, index: usize) -> Rect {
        let y0 = index as f64 * self.row_height;
        Rect::new(0.0, y0, self.size.width, y0 + self.row_height)
    }

    /// Hot zones of the row at `index` and `depth`, with `indent` pixels per
    /// level, in content space.
    pub fn row_layout(&self, index: usize, depth: usize, indent: f64) -> RowLayout {
        let y0 = index as f64 * self.row_height;
        let y1 = y0 + self.row_height;
        let guides = depth as f64 * indent;
        RowLayout {
            rect: Rect::new(0.0, y0, self.size.width, y1),
            guides: Rect::new(0.0, y0, guides, y1),
            toggle: Rect::new(guides, y0, guides + indent, y1),
            handle: Rect::new(guides + indent, y0, guides + 2.0 * indent, y1),
            content: Rect::new(guides + 2.0 * indent, y0, self.size.width, y1),
        }
    }

    /// Edge auto-scroll for drags: the signed step to apply while a pointer
    /// hovers at viewport-local `local_y`, with a slide region of
    /// `slide_region` pixels at each edge.
    ///
    /// Zero in the middle; up to one row height per call at (or beyond) an
    /// edge, scaled linearly in between.
    pub fn auto_scroll_step(&self, local_y: f64, slide_region: f64) -> f64 {
        let height = self.size.height;
        if slide_region <= 0.0 || height <= 0.0 {
            return 0.0;
        }
        let region = slide_region.min(height / 2.0);
        if local_y < region {
            let ratio = ((region - local_y) / region).min(1.0);
            -ratio * self.row_height
        } else if local_y > height - region {
            let ratio = ((local_y - (height - region)) / region).min(1.0);
            ratio * self.row_height
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(10.0).with_size(Size::new(200.0, 50.0))
    }

    #[test]
    fn visible_range_covers_the_scrolled_window() {
        let mut vp = viewport();
        assert_eq!(vp.visible_range(100, 0), 0..5);
        vp.set_scroll_top(95.0, 100);
        // Rows 9..=14 intersect [95, 145).
        assert_eq!(vp.visible_range(100, 0), 9..15);
        vp.set_scroll_top(100.0, 100);
        // Exactly on a boundary: no partial row at either edge.
        assert_eq!(vp.visible_range(100, 0), 10..15);
    }

    #[test]
    fn overscan_widens_but_clamps_at_the_edges() {
        let mut vp = viewport();
        assert_eq!(vp.visible_range(100, 3), 0..8);
        vp.set_scroll_top(950.0, 100);
        assert_eq!(vp.visible_range(100, 3), 92..100);
    }

    #[test]
    fn empty_or_flat_viewport_sees_nothing() {
        let vp = viewport();
        assert_eq!(vp.visible_range(0, 2), 0..0);
        let flat = Viewport::new(10.0);
        assert_eq!(flat.visible_range(100, 2), 0..0);
    }

    #[test]
    fn scroll_clamps_to_content() {
        let mut vp = viewport();
        vp.set_scroll_top(10_000.0, 12);
        // 12 rows of 10px minus a 50px viewport.
        assert_eq!(vp.scroll_top(), 70.0);
        vp.set_scroll_top(-5.0, 12);
        assert_eq!(vp.scroll_top(), 0.0);
    }

    #[test]
    fn scroll_by_reports_the_applied_delta() {
        let mut vp = viewport();
        assert_eq!(vp.scroll_by(30.0, 100), 30.0);
        vp.set_scroll_top(940.0, 100);
        assert_eq!(vp.scroll_by(100.0, 100), 10.0);
        assert_eq!(vp.scroll_by(100.0, 100), 0.0);
    }

    #[test]
    fn shrinking_content_pulls_the_scroll_back() {
        let mut vp = viewport();
        vp.set_scroll_top(900.0, 100);
        vp.clamp_scroll(12);
        assert_eq!(vp.scroll_top(), 70.0);
    }

    #[test]
    fn scroll_to_row_honors_alignment() {
        let mut vp = viewport();
        vp.scroll_to_row(20, ScrollAlign::Start, 100);
        assert_eq!(vp.scroll_top(), 200.0);
        vp.scroll_to_row(20, ScrollAlign::Center, 100);
        assert_eq!(vp.scroll_top(), 180.0);
        vp.scroll_to_row(20, ScrollAlign::End, 100);
        assert_eq!(vp.scroll_top(), 160.0);
        // Clamped at both extremes.
        vp.scroll_to_row(0, ScrollAlign::End, 100);
        assert_eq!(vp.scroll_top(), 0.0);
        vp.scroll_to_row(99, ScrollAlign::Start, 100);
        assert_eq!(vp.scroll_top(), 950.0);
    }

    #[test]
    fn nearest_moves_only_when_needed() {
        let mut vp = viewport();
        vp.scroll_to_row(2, ScrollAlign::Nearest, 100);
        assert_eq!(vp.scroll_top(), 0.0);
        vp.scroll_to_row(20, ScrollAlign::Nearest, 100);
        // Scrolls down just enough to show the bottom of row 20.
        assert_eq!(vp.scroll_top(), 160.0);
        vp.scroll_to_row(3, ScrollAlign::Nearest, 100);
        assert_eq!(vp.scroll_top(), 30.0);
    }

    #[test]
    fn row_at_content_y_respects_bounds() {
        let vp = viewport();
        assert_eq!(vp.row_at_content_y(-0.1, 100), None);
        assert_eq!(vp.row_at_content_y(0.0, 100), Some(0));
        assert_eq!(vp.row_at_content_y(9.9, 100), Some(0));
        assert_eq!(vp.row_at_content_y(10.0, 100), Some(1));
        assert_eq!(vp.row_at_content_y(999.9, 100), Some(99));
        assert_eq!(vp.row_at_content_y(1000.0, 100), None);
    }

    #[test]
    fn row_layout_cells_line_up() {
        let vp = viewport();
        let layout = vp.row_layout(3, 2, 16.0);
        assert_eq!(layout.rect, Rect::new(0.0, 30.0, 200.0, 40.0));
        assert_eq!(layout.guides.width(), 32.0);
        assert_eq!(layout.guides.x1, layout.toggle.x0);
        assert_eq!(layout.toggle.x1, layout.handle.x0);
        assert_eq!(layout.handle.x1, layout.content.x0);
        assert_eq!(layout.content.x1, 200.0);
    }

    #[test]
    fn auto_scroll_ramps_at_the_edges() {
        let vp = viewport();
        assert_eq!(vp.auto_scroll_step(25.0, 20.0), 0.0);
        assert_eq!(vp.auto_scroll_step(5.0, 20.0), -7.5);
        assert_eq!(vp.auto_scroll_step(45.0, 20.0), 7.5);
        // Beyond the edges the step caps at one row height.
        assert_eq!(vp.auto_scroll_step(-30.0, 20.0), -10.0);
        assert_eq!(vp.auto_scroll_step(80.0, 20.0), 10.0);
        // No slide region, no movement.
        assert_eq!(vp.auto_scroll_step(5.0, 0.0), 0.0);
    }
}
