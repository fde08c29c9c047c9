// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters connecting drag recognition to tree views.

#[cfg(feature = "view_adapter")]
pub mod view;
