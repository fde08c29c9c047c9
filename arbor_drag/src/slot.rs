// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-drift arithmetic shared by the drop-slot adapters.

/// Map horizontal pointer drift to a requested depth.
///
/// Every `indent` pixels of drift shifts one level from
/// `origin_depth`, rounded to the nearest level. Rightward drift
/// deepens, leftward drift climbs toward the roots, and the result
/// saturates at depth zero. A non-positive `indent` pins the depth to
/// the origin.
///
/// The returned depth is a *request*: adapters clamp it to the depths
/// the neighboring rows actually admit before resolving a slot.
pub fn depth_for_drift(origin_depth: usize, dx: f64, indent: f64) -> usize {
    if indent <= 0.0 {
        return origin_depth;
    }
    let levels = dx / indent;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "level shifts beyond i64 do not occur; saturation below covers pathological drift"
    )]
    let shift = if levels >= 0.0 {
        (levels + 0.5) as i64
    } else {
        (levels - 0.5) as i64
    };
    let origin = i64::try_from(origin_depth).unwrap_or(i64::MAX);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the value was just clamped to be non-negative and depths stay tiny"
    )]
    {
        origin.saturating_add(shift).max(0) as usize
    }
}
