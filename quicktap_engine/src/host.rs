// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing types: the [`Surface`] trait, touch points, native activation
//! events, and the [`Reaction`] the engine hands back for each event.

use core::num::NonZeroU64;

use kurbo::Point;

use quicktap_policy::ElementInfo;

use crate::synth::SyntheticClick;

/// Touch identifier, as reported by the host's touch points.
pub type PointerId = NonZeroU64;

/// One touch contact, with the coordinate triple hosts report.
///
/// `page` coordinates drive movement tracking, `client` coordinates drive
/// hit testing, and `screen`/`client` are copied onto synthetic activations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Stable identifier of this contact across its start/move/end events.
    ///
    /// `None` models hosts that report identifier 0 (touch-emulation tools);
    /// such contacts are exempt from duplicate-identifier suppression.
    pub id: Option<PointerId>,
    /// Position in page coordinates (includes scroll offset).
    pub page: Point,
    /// Position in screen coordinates.
    pub screen: Point,
    /// Position in viewport (client) coordinates.
    pub client: Point,
}

impl TouchPoint {
    /// A touch point with all three coordinate spaces coinciding, which is
    /// exact for an unscrolled, unzoomed surface.
    pub fn at(position: Point) -> Self {
        Self {
            id: None,
            page: position,
            screen: position,
            client: position,
        }
    }

    /// The same point with an explicit contact identifier.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = PointerId::new(id);
        self
    }
}

bitflags::bitflags! {
    /// What the host should do with the event that was just handled.
    ///
    /// An empty reaction permits the event untouched. The engine never asks
    /// for `STOP_IMMEDIATE` without the other two; blocked activations are
    /// cancelled outright.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Reaction: u8 {
        /// Cancel the event's default action.
        const PREVENT_DEFAULT = 1 << 0;
        /// Stop the event from propagating to ancestors.
        const STOP_PROPAGATION = 1 << 1;
        /// Stop further same-type handlers on the current element as well.
        ///
        /// Hosts lacking this primitive can route activation callbacks
        /// through `quicktap_listener`, which emulates it.
        const STOP_IMMEDIATE = 1 << 2;
    }
}

impl Reaction {
    /// The full suppression used for phantom activations.
    pub const fn block() -> Self {
        Self::PREVENT_DEFAULT
            .union(Self::STOP_PROPAGATION)
            .union(Self::STOP_IMMEDIATE)
    }
}

/// A native activation (click) or mouse-family event as seen by the arbiter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent<K> {
    /// The element the event targets.
    pub target: K,
    /// Whether the event can be cancelled. Programmatic dispatches from
    /// unrelated code are not cancelable and are always permitted.
    pub cancelable: bool,
    /// Whether the event carries the forwarding marker, i.e. was produced by
    /// the click synthesizer itself.
    pub forwarded: bool,
    /// The activation count the host reports (`detail` in DOM terms); some
    /// hosts deliver genuine keyboard-driven activations with a count of 0.
    pub detail: u32,
}

impl<K> ClickEvent<K> {
    /// A device-originated, cancelable activation.
    pub fn native(target: K) -> Self {
        Self {
            target,
            cancelable: true,
            forwarded: false,
            detail: 1,
        }
    }

    /// The echo of a synthetic activation, as it re-enters the handler
    /// chain after dispatch.
    pub fn forwarded(target: K) -> Self {
        Self {
            forwarded: true,
            ..Self::native(target)
        }
    }
}

/// Host services the engine consumes, keyed by an opaque element handle `K`.
///
/// The engine queries element state through this trait at every decision
/// point rather than caching it; attributes can change between events.
/// Methods with default implementations cover optional host capabilities and
/// default toward the engine staying engaged (or toward plain focus).
pub trait Surface<K: Copy + Eq> {
    /// Policy-relevant snapshot of an element, recomputed on each call.
    fn element(&self, target: K) -> ElementInfo;

    /// Parent of a node, used to normalize text-node targets.
    fn parent(&self, target: K) -> Option<K>;

    /// Topmost element at a point in client coordinates.
    ///
    /// Consulted only on the platform family whose touch-end targets go
    /// stale during scrolls and transitions; `None` keeps the recorded
    /// target.
    fn element_from_point(&self, client: Point) -> Option<K> {
        let _ = client;
        None
    }

    /// The element currently holding input focus, if any.
    fn focused(&self) -> Option<K>;

    /// Give an element input focus.
    fn focus(&mut self, target: K);

    /// Remove input focus from an element.
    fn blur(&mut self, target: K);

    /// Move the caret past the last character of a text control's value.
    ///
    /// Only called for elements that expose a selection range; the default
    /// falls back to a plain focus call.
    fn place_caret_at_end(&mut self, target: K) {
        self.focus(target);
    }

    /// Whether a non-collapsed text selection is active on the surface.
    fn has_active_selection(&self) -> bool {
        false
    }

    /// Nearest ancestor of `target` that scrolls independently, if any.
    fn scroll_parent(&self, target: K) -> Option<K> {
        let _ = target;
        None
    }

    /// Current scroll offset of an element.
    fn scroll_offset(&self, target: K) -> f64 {
        let _ = target;
        0.0
    }

    /// The control a label is associated with at the host level, when the
    /// host exposes a direct association.
    fn explicit_control(&self, label: K) -> Option<K> {
        let _ = label;
        None
    }

    /// The control referenced by the label's `for` attribute.
    fn control_for_attribute(&self, label: K) -> Option<K> {
        let _ = label;
        None
    }

    /// The label's first labellable descendant, by the host's fixed tag
    /// priority (button, non-hidden input, meter, output, progress, select,
    /// textarea, in document order).
    fn first_labellable_descendant(&self, label: K) -> Option<K> {
        let _ = label;
        None
    }

    /// Dispatch a synthetic activation on `target`, synchronously.
    ///
    /// Dispatch failures are not the engine's concern; they propagate
    /// through the host's normal fault path.
    fn dispatch_click(&mut self, target: K, click: SyntheticClick);
}
