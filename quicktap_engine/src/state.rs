// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface gesture state.

use kurbo::Point;

use crate::host::PointerId;

/// Mutable tracking state, exactly one per attached surface.
///
/// Only the owning surface's handlers mutate this; surfaces share nothing.
/// While a gesture is being tracked, `target` is always `Some`. After
/// end-of-gesture arbitration the target can outlive `tracking`: it stays
/// recorded until the matching native activation has been reconciled (or a
/// new gesture begins), which is what lets the arbiter recognize phantom
/// clicks.
#[derive(Clone, Debug)]
pub struct GestureState<K> {
    /// Whether a candidate tap is currently being tracked.
    pub tracking: bool,
    /// Timestamp at which tracking began, in milliseconds.
    pub track_start: u64,
    /// The element the gesture is (or was last) aimed at.
    pub target: Option<K>,
    /// Touch position at gesture start, in page coordinates.
    pub start: Point,
    /// Identifier of the previous gesture's touch, for duplicate-delivery
    /// suppression on the platform family that repeats identifiers.
    pub last_touch_id: Option<PointerId>,
    /// Timestamp of the last accepted activation, in milliseconds.
    pub last_click_time: u64,
    /// Set when the upcoming native activation is a known duplicate and must
    /// be blocked by the arbiter.
    pub cancel_next_click: bool,
    /// The target's nearest scrolling ancestor and its offset at tracking
    /// start, for fling-stop suppression.
    pub scroll_parent: Option<(K, f64)>,
}

impl<K> Default for GestureState<K> {
    fn default() -> Self {
        Self {
            tracking: false,
            track_start: 0,
            target: None,
            start: Point::ZERO,
            last_touch_id: None,
            last_click_time: 0,
            cancel_next_click: false,
            scroll_parent: None,
        }
    }
}

impl<K> GestureState<K> {
    /// Leave tracking and drop the recorded target.
    pub(crate) fn abandon(&mut self) {
        self.tracking = false;
        self.target = None;
    }
}
