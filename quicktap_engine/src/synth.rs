// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click synthesis and focus simulation.
//!
//! The synthesizer produces the immediate activation that replaces the
//! browser's delayed one. Every event built here carries the forwarding
//! marker, which is how the arbiter later tells the engine's own activations
//! apart from genuine device-originated ones.

use kurbo::Point;

use quicktap_platform::Quirks;
use quicktap_policy::ElementKind;

use crate::host::{Surface, TouchPoint};

/// Shape of a synthetic activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickKind {
    /// A full press-and-release activation; the common case.
    PressAndRelease,
    /// A bare press. Selection lists on one platform family only open their
    /// popup for a press event, never for a full synthetic click.
    PressOnly,
}

/// The ephemeral activation the engine dispatches through
/// [`Surface::dispatch_click`].
///
/// Indistinguishable from a genuine activation apart from the forwarding
/// marker, which is implicit: every value of this type is forwarded.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SyntheticClick {
    /// Press-and-release or press-only.
    pub kind: ClickKind,
    /// Screen coordinates copied from the terminating touch point.
    pub screen: Point,
    /// Client coordinates copied from the terminating touch point.
    pub client: Point,
}

/// Simulate focus on `target`.
///
/// On the platform family with the caret-positioning focus bug, text
/// controls get their caret moved past the end of the current value through
/// the selection-range primitive instead of a generic focus call. Date/time
/// input subtypes are excluded from that path: they expose a selection range
/// but querying it throws on that family, so they take plain focus like
/// everything else.
pub fn simulate_focus<K, S>(surface: &mut S, quirks: &Quirks, target: K)
where
    K: Copy + Eq,
    S: Surface<K>,
{
    let kind = surface.element(target).kind;
    let caret_safe = match kind {
        ElementKind::Input(subtype) => !subtype.caret_query_throws(),
        _ => true,
    };
    if quirks.ios && kind.exposes_selection_range() && caret_safe {
        surface.place_caret_at_end(target);
    } else {
        surface.focus(target);
    }
}

/// Dispatch a synthetic activation on `target` with coordinates taken from
/// the terminating touch point.
///
/// If a different element currently holds focus it is blurred first; without
/// that, the synthetic activation has no effect on some platforms. No result
/// is awaited and dispatch failures are not caught here.
pub fn send_click<K, S>(surface: &mut S, quirks: &Quirks, target: K, touch: &TouchPoint)
where
    K: Copy + Eq,
    S: Surface<K>,
{
    if let Some(focused) = surface.focused()
        && focused != target
    {
        surface.blur(focused);
    }

    let kind = if quirks.android && surface.element(target).kind == ElementKind::Select {
        ClickKind::PressOnly
    } else {
        ClickKind::PressAndRelease
    };
    surface.dispatch_click(
        target,
        SyntheticClick {
            kind,
            screen: touch.screen,
            client: touch.client,
        },
    );
}
