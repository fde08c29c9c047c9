// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_drag --heading-base-level=0

//! Arbor Drag: deterministic drag recognition for tree views.
//!
//! ## Overview
//!
//! This crate turns raw pointer samples into a drag lifecycle: press, recognize, drift, drop.
//! It does not touch the tree.
//! Feed [`PointerSample`](crate::backend::PointerSample) values to a [`DragSession`](crate::session::DragSession) and it emits at most one [`DragEvent`](crate::session::DragEvent) per sample; the host applies the result to its view.
//!
//! ## Recognition
//!
//! A [`DragBackend`](crate::backend::DragBackend) decides when a gesture becomes a drag.
//! [`MouseBackend`](crate::backend::MouseBackend) begins once the pressed pointer travels past a movement threshold, so plain clicks stay cheap to tell apart.
//! [`TouchBackend`](crate::backend::TouchBackend) begins after a hold near the press point, and gives the gesture up when the pointer swipes away before the hold elapses, so list scrolling keeps working.
//! The trait is object-safe; hosts can pick a backend at runtime.
//!
//! ## Ordering
//!
//! Event order per drag is guaranteed: exactly one [`DragEvent::Started`](crate::session::DragEvent::Started), any number of [`DragEvent::Moved`](crate::session::DragEvent::Moved), then exactly one terminal [`DragEvent::Finished`](crate::session::DragEvent::Finished) or [`DragEvent::Canceled`](crate::session::DragEvent::Canceled).
//! Intents that do not fit the current phase are dropped, so a misbehaving backend cannot produce a second start or a terminal event for a drag that never began.
//!
//! ## Layering
//!
//! The session only reports geometry.
//! Behind the `view_adapter` feature, [`resolve_drop`](crate::adapters::view::resolve_drop) maps a live drag onto an `arbor_view::TreeView`: pointer y picks the insertion row, horizontal drift bends the requested depth, and the candidate carries the same verdict the view's `finish_drag` would reach.
//!
//! ## Workflow
//!
//! 1) Feed every pointer sample to [`DragSession::feed`](crate::session::DragSession::feed).
//! 2) On `Started`, lift the pressed row with `TreeView::begin_drag`.
//! 3) On `Moved`, resolve a [`DropCandidate`](crate::adapters::view::DropCandidate) for the
//!    drop indicator and nudge edge auto-scroll.
//! 4) On `Finished`, pass the candidate's `depth` and `min_row` to
//!    `TreeView::finish_drag`; on `Canceled`, call `TreeView::cancel_drag`.
//!
//! ```rust
//! use arbor_drag::backend::{MouseBackend, PointerAction, PointerSample};
//! use arbor_drag::session::{DragEvent, DragSession};
//!
//! let mut session = DragSession::new(MouseBackend::with_threshold(4.0));
//!
//! let press = PointerSample::new(10.0, 10.0, 0, PointerAction::Down);
//! assert_eq!(session.feed(&press), None);
//!
//! // Crossing the threshold starts the drag from the press origin.
//! let pull = PointerSample::new(22.0, 10.0, 16, PointerAction::Move);
//! assert_eq!(session.feed(&pull), Some(DragEvent::Started));
//! assert_eq!(session.drift(), Some((12.0, 0.0)));
//!
//! let release = PointerSample::new(22.0, 30.0, 32, PointerAction::Up);
//! assert_eq!(
//!     session.feed(&release),
//!     Some(DragEvent::Finished { x: 22.0, y: 30.0, dx: 12.0, dy: 20.0 })
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod backend;
pub mod session;
pub mod slot;
