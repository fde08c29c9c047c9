// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognition backends: raw pointer samples in, drag intents out.
//!
//! A backend decides *when* a gesture becomes a drag. [`MouseBackend`]
//! begins once the pointer travels past a movement threshold while
//! pressed. [`TouchBackend`] begins once the pointer has been held
//! near the press point for long enough, so short swipes stay
//! available for scrolling.
//!
//! Backends are deliberately dumb: they never see the tree and never
//! decide *where* a drop lands. That is the job of
//! [`DragSession`](crate::session::DragSession) and, behind the
//! `view_adapter` feature, [`resolve_drop`](crate::adapters::view::resolve_drop).

use alloc::boxed::Box;

/// One raw pointer sample from the host.
///
/// Coordinates are viewport-local, the same space `TreeView::row_at_y`
/// expects. Timestamps only need to be monotonic; any origin works.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Pointer x, viewport-local.
    pub x: f64,
    /// Pointer y, viewport-local.
    pub y: f64,
    /// Monotonic time in milliseconds.
    pub time_ms: u64,
    /// What the pointer did.
    pub action: PointerAction,
}

impl PointerSample {
    /// A sample at `(x, y)` carrying `action` at time `time_ms`.
    pub const fn new(x: f64, y: f64, time_ms: u64, action: PointerAction) -> Self {
        Self {
            x,
            y,
            time_ms,
            action,
        }
    }
}

/// The kind of pointer transition a sample reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    /// The pointer was pressed.
    Down,
    /// The pointer moved while pressed.
    Move,
    /// The pointer was released.
    Up,
    /// The gesture was taken away (pointer capture lost, window blur).
    Cancel,
}

/// What a backend wants done with the gesture after a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragIntent {
    /// Recognition succeeded; a drag begins from the press origin.
    Begin {
        /// Press x, viewport-local.
        origin_x: f64,
        /// Press y, viewport-local.
        origin_y: f64,
    },
    /// The pointer moved while a drag is recognized.
    Update,
    /// The pointer released; the drag should drop.
    Commit,
    /// The gesture failed or was taken away; the drag should unwind.
    Abort,
}

/// Recognition strategy turning raw pointer samples into drag intents.
///
/// Implementations are single-gesture state machines: one pointer,
/// press to release. Hosts tracking several pointers run one backend
/// per pointer.
pub trait DragBackend {
    /// Feed one sample. `None` means the sample changed nothing.
    fn sample(&mut self, sample: &PointerSample) -> Option<DragIntent>;

    /// Drop all recognition state, as if the pointer was never pressed.
    fn reset(&mut self);
}

impl<B: DragBackend + ?Sized> DragBackend for Box<B> {
    fn sample(&mut self, sample: &PointerSample) -> Option<DragIntent> {
        (**self).sample(sample)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Mouse-style recognition: a drag begins once the pressed pointer
/// travels past a movement threshold.
///
/// Releases inside the threshold never begin a drag, which keeps
/// plain clicks (row selection, expander toggles) cheap for the host
/// to tell apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseBackend {
    threshold: f64,
    origin: Option<(f64, f64)>,
    dragging: bool,
}

impl MouseBackend {
    /// Recognition with the default 4px movement threshold.
    pub const fn new() -> Self {
        Self::with_threshold(4.0)
    }

    /// Recognition that begins a drag after `threshold` pixels of travel.
    pub const fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            origin: None,
            dragging: false,
        }
    }

    /// The movement threshold in pixels.
    #[inline]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for MouseBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DragBackend for MouseBackend {
    fn sample(&mut self, sample: &PointerSample) -> Option<DragIntent> {
        match sample.action {
            PointerAction::Down => {
                self.origin = Some((sample.x, sample.y));
                self.dragging = false;
                None
            }
            PointerAction::Move => {
                let (ox, oy) = self.origin?;
                if self.dragging {
                    return Some(DragIntent::Update);
                }
                let (dx, dy) = (sample.x - ox, sample.y - oy);
                if dx * dx + dy * dy >= self.threshold * self.threshold {
                    self.dragging = true;
                    Some(DragIntent::Begin {
                        origin_x: ox,
                        origin_y: oy,
                    })
                } else {
                    None
                }
            }
            PointerAction::Up => {
                let was_dragging = self.dragging;
                self.reset();
                was_dragging.then_some(DragIntent::Commit)
            }
            PointerAction::Cancel => {
                let was_dragging = self.dragging;
                self.reset();
                was_dragging.then_some(DragIntent::Abort)
            }
        }
    }

    fn reset(&mut self) {
        self.origin = None;
        self.dragging = false;
    }
}

/// Touch-style recognition: a drag begins once the pointer has been
/// held near the press point for a hold period.
///
/// Moving past the slop radius before the hold elapses gives the
/// gesture up for good, so list scrolling keeps working. Recognition
/// is sample-driven; a host that wants the drag to begin exactly at
/// the hold deadline feeds a synthetic [`PointerAction::Move`] sample
/// when its timer fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchBackend {
    hold_ms: u64,
    slop: f64,
    origin: Option<(f64, f64, u64)>,
    dragging: bool,
}

impl TouchBackend {
    /// Recognition with a 300ms hold and an 8px slop radius.
    pub const fn new() -> Self {
        Self::with_tuning(300, 8.0)
    }

    /// Recognition that begins after `hold_ms` of press within `slop` pixels.
    pub const fn with_tuning(hold_ms: u64, slop: f64) -> Self {
        Self {
            hold_ms,
            slop,
            origin: None,
            dragging: false,
        }
    }

    /// The hold period in milliseconds.
    #[inline]
    pub const fn hold_ms(&self) -> u64 {
        self.hold_ms
    }

    /// The slop radius in pixels.
    #[inline]
    pub const fn slop(&self) -> f64 {
        self.slop
    }
}

impl Default for TouchBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DragBackend for TouchBackend {
    fn sample(&mut self, sample: &PointerSample) -> Option<DragIntent> {
        match sample.action {
            PointerAction::Down => {
                self.origin = Some((sample.x, sample.y, sample.time_ms));
                self.dragging = false;
                None
            }
            PointerAction::Move => {
                let (ox, oy, t0) = self.origin?;
                if self.dragging {
                    return Some(DragIntent::Update);
                }
                let (dx, dy) = (sample.x - ox, sample.y - oy);
                if dx * dx + dy * dy > self.slop * self.slop {
                    // Swiped away before the hold elapsed: this is a
                    // scroll, not a drag. Give the gesture up.
                    self.reset();
                    return None;
                }
                if sample.time_ms.saturating_sub(t0) >= self.hold_ms {
                    self.dragging = true;
                    Some(DragIntent::Begin {
                        origin_x: ox,
                        origin_y: oy,
                    })
                } else {
                    None
                }
            }
            PointerAction::Up => {
                let was_dragging = self.dragging;
                self.reset();
                was_dragging.then_some(DragIntent::Commit)
            }
            PointerAction::Cancel => {
                let was_dragging = self.dragging;
                self.reset();
                was_dragging.then_some(DragIntent::Abort)
            }
        }
    }

    fn reset(&mut self) {
        self.origin = None;
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64, t: u64) -> PointerSample {
        PointerSample::new(x, y, t, PointerAction::Down)
    }

    fn mv(x: f64, y: f64, t: u64) -> PointerSample {
        PointerSample::new(x, y, t, PointerAction::Move)
    }

    fn up(x: f64, y: f64, t: u64) -> PointerSample {
        PointerSample::new(x, y, t, PointerAction::Up)
    }

    // A mouse press that stays inside the threshold is a click, not a drag.
    #[test]
    fn mouse_click_never_begins() {
        let mut backend = MouseBackend::with_threshold(4.0);
        assert_eq!(backend.sample(&down(10.0, 10.0, 0)), None);
        assert_eq!(backend.sample(&mv(12.0, 11.0, 16)), None);
        assert_eq!(backend.sample(&up(12.0, 11.0, 32)), None);
    }

    // Crossing the threshold begins exactly once, from the press origin.
    #[test]
    fn mouse_begins_past_threshold() {
        let mut backend = MouseBackend::with_threshold(4.0);
        assert_eq!(backend.sample(&down(10.0, 10.0, 0)), None);
        assert_eq!(
            backend.sample(&mv(15.0, 10.0, 16)),
            Some(DragIntent::Begin {
                origin_x: 10.0,
                origin_y: 10.0
            })
        );
        assert_eq!(backend.sample(&mv(20.0, 12.0, 32)), Some(DragIntent::Update));
        assert_eq!(backend.sample(&up(20.0, 12.0, 48)), Some(DragIntent::Commit));
    }

    // A threshold crossing split across both axes still counts.
    #[test]
    fn mouse_threshold_is_euclidean() {
        let mut backend = MouseBackend::with_threshold(5.0);
        assert_eq!(backend.sample(&down(0.0, 0.0, 0)), None);
        assert_eq!(backend.sample(&mv(3.0, 3.0, 16)), None);
        assert_eq!(
            backend.sample(&mv(3.0, 4.0, 32)),
            Some(DragIntent::Begin {
                origin_x: 0.0,
                origin_y: 0.0
            })
        );
    }

    // Capture loss mid-drag aborts; before recognition it is silent.
    #[test]
    fn mouse_cancel_aborts_only_after_begin() {
        let cancel = PointerSample::new(0.0, 0.0, 50, PointerAction::Cancel);
        let mut backend = MouseBackend::with_threshold(4.0);
        assert_eq!(backend.sample(&down(0.0, 0.0, 0)), None);
        assert_eq!(backend.sample(&cancel), None);

        assert_eq!(backend.sample(&down(0.0, 0.0, 100)), None);
        assert!(matches!(
            backend.sample(&mv(10.0, 0.0, 116)),
            Some(DragIntent::Begin { .. })
        ));
        assert_eq!(backend.sample(&cancel), Some(DragIntent::Abort));
    }

    // Moves without a press are noise and change nothing.
    #[test]
    fn mouse_ignores_unpressed_moves() {
        let mut backend = MouseBackend::new();
        assert_eq!(backend.sample(&mv(100.0, 100.0, 0)), None);
        assert_eq!(backend.sample(&up(100.0, 100.0, 16)), None);
    }

    // Holding within slop long enough begins the drag on the next sample.
    #[test]
    fn touch_begins_after_hold() {
        let mut backend = TouchBackend::with_tuning(300, 8.0);
        assert_eq!(backend.sample(&down(10.0, 10.0, 0)), None);
        assert_eq!(backend.sample(&mv(12.0, 10.0, 150)), None);
        assert_eq!(
            backend.sample(&mv(12.0, 11.0, 320)),
            Some(DragIntent::Begin {
                origin_x: 10.0,
                origin_y: 10.0
            })
        );
        assert_eq!(backend.sample(&mv(40.0, 11.0, 340)), Some(DragIntent::Update));
        assert_eq!(backend.sample(&up(40.0, 11.0, 360)), Some(DragIntent::Commit));
    }

    // Swiping past slop before the hold elapses turns the gesture over
    // to scrolling; a later hold on the same press cannot revive it.
    #[test]
    fn touch_early_swipe_gives_up() {
        let mut backend = TouchBackend::with_tuning(300, 8.0);
        assert_eq!(backend.sample(&down(10.0, 10.0, 0)), None);
        assert_eq!(backend.sample(&mv(10.0, 40.0, 50)), None);
        assert_eq!(backend.sample(&mv(10.0, 40.0, 400)), None);
        assert_eq!(backend.sample(&up(10.0, 40.0, 450)), None);
    }

    // A quick tap releases before the hold and begins nothing.
    #[test]
    fn touch_tap_never_begins() {
        let mut backend = TouchBackend::with_tuning(300, 8.0);
        assert_eq!(backend.sample(&down(10.0, 10.0, 0)), None);
        assert_eq!(backend.sample(&up(10.0, 10.0, 80)), None);
    }

    // Backends stay usable behind a box, so hosts can pick one at runtime.
    #[test]
    fn boxed_backend_dispatches() {
        let mut backend: Box<dyn DragBackend> = Box::new(MouseBackend::with_threshold(2.0));
        assert_eq!(backend.sample(&down(0.0, 0.0, 0)), None);
        assert!(matches!(
            backend.sample(&mv(5.0, 0.0, 16)),
            Some(DragIntent::Begin { .. })
        ));
        backend.reset();
        assert_eq!(backend.sample(&mv(9.0, 0.0, 32)), None);
    }
}
