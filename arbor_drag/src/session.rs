// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: a deterministic lifecycle over a recognition backend.
//!
//! [`DragSession`] owns one backend and tracks one gesture from press
//! to release. Feeding it a pointer sample yields at most one
//! [`DragEvent`], and the event order is guaranteed: exactly one
//! [`DragEvent::Started`] per drag, then any number of
//! [`DragEvent::Moved`], then exactly one terminal
//! [`DragEvent::Finished`] or [`DragEvent::Canceled`].
//!
//! The session never touches the tree. Hosts react to the events, for
//! example by calling `TreeView::begin_drag` on `Started` and
//! `TreeView::finish_drag` on `Finished`.

use crate::backend::{DragBackend, DragIntent, PointerSample};

/// A drag lifecycle transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// Recognition succeeded; the drag is live.
    Started,
    /// The pointer moved while dragging.
    Moved {
        /// Pointer x, viewport-local.
        x: f64,
        /// Pointer y, viewport-local.
        y: f64,
        /// Horizontal drift from the press origin.
        dx: f64,
        /// Vertical drift from the press origin.
        dy: f64,
    },
    /// The pointer released while dragging; the payload should drop.
    Finished {
        /// Release x, viewport-local.
        x: f64,
        /// Release y, viewport-local.
        y: f64,
        /// Horizontal drift from the press origin at release.
        dx: f64,
        /// Vertical drift from the press origin at release.
        dy: f64,
    },
    /// The drag unwound without dropping.
    Canceled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Active {
        origin_x: f64,
        origin_y: f64,
        x: f64,
        y: f64,
    },
}

/// Tracks one pointer from press to release through a recognition
/// backend.
///
/// The session is the layer hosts talk to: it filters backend intents
/// down to a well-ordered event stream and remembers the pointer's
/// drift from the press origin while a drag is live.
#[derive(Clone, Copy, Debug)]
pub struct DragSession<B> {
    backend: B,
    phase: Phase,
}

impl<B: DragBackend> DragSession<B> {
    /// A session over `backend`, initially idle.
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            phase: Phase::Idle,
        }
    }

    /// Whether a drag is live.
    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    /// Current pointer position while a drag is live.
    #[inline]
    pub const fn position(&self) -> Option<(f64, f64)> {
        match self.phase {
            Phase::Idle => None,
            Phase::Active { x, y, .. } => Some((x, y)),
        }
    }

    /// The press origin while a drag is live.
    ///
    /// This is where the gesture began, not where recognition happened;
    /// hosts use it to pick the row being lifted.
    #[inline]
    pub const fn origin(&self) -> Option<(f64, f64)> {
        match self.phase {
            Phase::Idle => None,
            Phase::Active {
                origin_x, origin_y, ..
            } => Some((origin_x, origin_y)),
        }
    }

    /// Pointer drift from the press origin while a drag is live.
    #[inline]
    pub const fn drift(&self) -> Option<(f64, f64)> {
        match self.phase {
            Phase::Idle => None,
            Phase::Active {
                origin_x,
                origin_y,
                x,
                y,
            } => Some((x - origin_x, y - origin_y)),
        }
    }

    /// Feed one pointer sample; at most one event comes back.
    ///
    /// Intents that do not fit the current phase are dropped rather
    /// than surfaced, so a misbehaving backend cannot produce a
    /// second `Started` or a terminal event for a drag that never
    /// began.
    pub fn feed(&mut self, sample: &PointerSample) -> Option<DragEvent> {
        let intent = self.backend.sample(sample)?;
        match (intent, self.phase) {
            (DragIntent::Begin { origin_x, origin_y }, Phase::Idle) => {
                self.phase = Phase::Active {
                    origin_x,
                    origin_y,
                    x: sample.x,
                    y: sample.y,
                };
                Some(DragEvent::Started)
            }
            (DragIntent::Update, Phase::Active { origin_x, origin_y, .. }) => {
                self.phase = Phase::Active {
                    origin_x,
                    origin_y,
                    x: sample.x,
                    y: sample.y,
                };
                Some(DragEvent::Moved {
                    x: sample.x,
                    y: sample.y,
                    dx: sample.x - origin_x,
                    dy: sample.y - origin_y,
                })
            }
            (DragIntent::Commit, Phase::Active { origin_x, origin_y, .. }) => {
                self.phase = Phase::Idle;
                Some(DragEvent::Finished {
                    x: sample.x,
                    y: sample.y,
                    dx: sample.x - origin_x,
                    dy: sample.y - origin_y,
                })
            }
            (DragIntent::Abort, Phase::Active { .. }) => {
                self.phase = Phase::Idle;
                Some(DragEvent::Canceled)
            }
            // Begin while active, or anything else while idle.
            _ => None,
        }
    }

    /// Abort from outside the pointer stream, say for an Escape press.
    ///
    /// Returns [`DragEvent::Canceled`] if a drag was live, `None` if
    /// there was nothing to cancel. The backend is reset either way.
    pub fn cancel(&mut self) -> Option<DragEvent> {
        self.backend.reset();
        if self.is_active() {
            self.phase = Phase::Idle;
            Some(DragEvent::Canceled)
        } else {
            None
        }
    }

    /// The recognition backend.
    #[inline]
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}
