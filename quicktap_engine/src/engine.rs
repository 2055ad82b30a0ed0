// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-surface tap engine: gesture tracking and activation arbitration.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use quicktap_gate::Environment;
use quicktap_platform::Quirks;
use quicktap_policy::{ElementKind, InputType, needs_focus, needs_native_click};

use crate::Config;
use crate::attachment::{Attachment, EventRegistry};
use crate::control::resolve_control;
use crate::host::{ClickEvent, Reaction, Surface, TouchPoint};
use crate::state::GestureState;
use crate::synth::{send_click, simulate_focus};

/// Tap engine for one surface.
///
/// Construct with [`TapEngine::attach`], register listeners with
/// [`TapEngine::install`], then feed every matching event through the
/// `on_*` handlers and apply the returned [`Reaction`] to the event.
///
/// An engine attached in an environment where [`Environment::engine_needed`]
/// is `false` is permanently inert: `install` registers nothing and every
/// handler returns the empty reaction.
#[derive(Clone, Debug)]
pub struct TapEngine<K> {
    config: Config,
    quirks: Quirks,
    cross_frame: bool,
    engaged: bool,
    attachment: Attachment,
    state: GestureState<K>,
}

impl<K: Copy + Eq> TapEngine<K> {
    /// Create an engine for one surface, consulting the environment gate
    /// exactly once.
    pub fn attach(env: &Environment, config: Config) -> Self {
        Self {
            config,
            quirks: env.quirks,
            cross_frame: env.cross_frame,
            engaged: env.engine_needed(),
            attachment: Attachment::new(),
            state: GestureState::default(),
        }
    }

    /// Whether the environment gate let this engine engage.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Read access to the gesture state, for host-side diagnostics.
    pub fn state(&self) -> &GestureState<K> {
        &self.state
    }

    /// Register this surface's listener set through the host's registry.
    ///
    /// No-op when the gate kept the engine disengaged; idempotent otherwise.
    pub fn install<R: EventRegistry>(&mut self, registry: &mut R) {
        if !self.engaged {
            return;
        }
        self.attachment.install(registry, &self.quirks);
    }

    /// Remove every listener `install` registered. Idempotent; safe to call
    /// on a disengaged or never-installed engine.
    pub fn destroy<R: EventRegistry>(&mut self, registry: &mut R) {
        self.attachment.destroy(registry, &self.quirks);
    }

    /// Handle a touch-start. `touches` is the full set of contacts currently
    /// on the target; more than one means a pinch, which is left alone.
    pub fn on_touch_start<S: Surface<K>>(
        &mut self,
        surface: &mut S,
        raw_target: K,
        touches: &[TouchPoint],
        now: u64,
    ) -> Reaction {
        if !self.engaged {
            return Reaction::empty();
        }
        let [touch] = touches else {
            return Reaction::empty();
        };
        let target = normalize_target(surface, raw_target);

        if self.quirks.ios {
            // A tap while text is selected should adjust the selection, not
            // activate anything.
            if surface.has_active_selection() {
                return Reaction::empty();
            }
            if !self.quirks.ios4 {
                // Weird things happen on iOS when an alert or confirm dialog
                // is opened from a click handler: the browser replays the
                // touch-start with the identifier of the finished gesture.
                if touch.id.is_some() && touch.id == self.state.last_touch_id {
                    return Reaction::PREVENT_DEFAULT;
                }
                self.state.last_touch_id = touch.id;
                // Record where the nearest scrolling ancestor sits so the
                // touch-end handler can tell a tap from a fling-stop.
                self.state.scroll_parent = surface
                    .scroll_parent(target)
                    .map(|sp| (sp, surface.scroll_offset(sp)));
            }
        }

        self.state.tracking = true;
        self.state.track_start = now;
        self.state.target = Some(target);
        self.state.start = touch.page;

        if now.wrapping_sub(self.state.last_click_time) < self.config.tap_delay {
            Reaction::PREVENT_DEFAULT
        } else {
            Reaction::empty()
        }
    }

    /// Handle a touch-move. Drifting past the movement boundary on either
    /// axis, or moving onto a different element, cancels the gesture.
    pub fn on_touch_move<S: Surface<K>>(
        &mut self,
        surface: &mut S,
        raw_target: K,
        touch: &TouchPoint,
    ) -> Reaction {
        if !self.engaged || !self.state.tracking {
            return Reaction::empty();
        }
        let target = normalize_target(surface, raw_target);
        if self.state.target != Some(target) || self.has_moved(touch) {
            self.state.abandon();
        }
        Reaction::empty()
    }

    fn has_moved(&self, touch: &TouchPoint) -> bool {
        let delta = touch.page - self.state.start;
        delta.x.abs() > self.config.touch_boundary || delta.y.abs() > self.config.touch_boundary
    }

    /// Handle a touch-end: decide whether the gesture was a deliberate tap
    /// and, if so, dispatch the immediate synthetic activation.
    pub fn on_touch_end<S: Surface<K>>(
        &mut self,
        surface: &mut S,
        touch: &TouchPoint,
        now: u64,
    ) -> Reaction {
        if !self.engaged || !self.state.tracking {
            return Reaction::empty();
        }

        // A second tap inside the suppression window is the double-tap echo;
        // mark the upcoming native activation for the arbiter to drop.
        if now.wrapping_sub(self.state.last_click_time) < self.config.tap_delay {
            self.state.cancel_next_click = true;
            self.state.tracking = false;
            return Reaction::empty();
        }

        if now.wrapping_sub(self.state.track_start) > self.config.tap_timeout {
            self.state.abandon();
            return Reaction::empty();
        }

        self.state.cancel_next_click = false;
        self.state.last_click_time = now;
        let dwell = now.wrapping_sub(self.state.track_start);
        self.state.tracking = false;

        let Some(mut target) = self.state.target else {
            return Reaction::empty();
        };

        // On the affected iOS versions the element recorded at touch-start
        // can be stale after a scroll or transition; re-derive it from the
        // lift position. The recorded scroll-parent bookkeeping still applies.
        if self.quirks.ios_stale_touch_targets
            && let Some(fresh) = surface.element_from_point(touch.client)
        {
            target = fresh;
            self.state.target = Some(fresh);
        }

        let info = surface.element(target);
        if info.kind == ElementKind::Label {
            if let Some(control) = resolve_control(surface, target) {
                simulate_focus(surface, &self.quirks, control);
                if self.quirks.android {
                    return Reaction::empty();
                }
                target = control;
                self.state.target = Some(control);
            }
        } else if needs_focus(&info, &self.quirks) {
            let single_line_text = matches!(info.kind, ElementKind::Input(_));
            // Past the dwell threshold the native focus is already on its
            // way, and a text field inside an embedded iOS document cannot
            // take synthetic focus at all. Stand down either way.
            if dwell > self.config.focus_dwell
                || (self.quirks.ios && self.cross_frame && single_line_text)
            {
                self.state.target = None;
                return Reaction::empty();
            }

            simulate_focus(surface, &self.quirks, target);
            send_click(surface, &self.quirks, target, touch);

            // A select on iOS only opens its picker for the native
            // activation, so that one is left to go through.
            if self.quirks.ios && info.kind == ElementKind::Select {
                return Reaction::empty();
            }
            self.state.target = None;
            return Reaction::PREVENT_DEFAULT;
        }

        if self.quirks.ios
            && !self.quirks.ios4
            && let Some((parent, offset)) = self.state.scroll_parent
            && surface.scroll_offset(parent) != offset
        {
            // The contact stopped a fling; the lift is not a tap.
            return Reaction::empty();
        }

        if !needs_native_click(&surface.element(target), &self.quirks) {
            send_click(surface, &self.quirks, target, touch);
            return Reaction::PREVENT_DEFAULT;
        }
        Reaction::empty()
    }

    /// Handle a touch-cancel by abandoning the gesture.
    pub fn on_touch_cancel(&mut self) -> Reaction {
        self.state.abandon();
        Reaction::empty()
    }

    /// Arbitrate a mouse-family event (over, down, up) delivered ahead of a
    /// native activation. Returns [`Reaction::block`] for events the engine
    /// already accounted for.
    pub fn on_mouse<S: Surface<K>>(&mut self, surface: &S, event: &ClickEvent<K>) -> Reaction {
        if !self.engaged {
            return Reaction::empty();
        }
        let Some(target) = self.state.target else {
            return Reaction::empty();
        };
        if event.forwarded || !event.cancelable {
            return Reaction::empty();
        }
        if !needs_native_click(&surface.element(target), &self.quirks) || self.state.cancel_next_click
        {
            self.state.cancel_next_click = false;
            return Reaction::block();
        }
        Reaction::empty()
    }

    /// Arbitrate a native activation: block it when it duplicates a
    /// synthetic one, permit it when the target needs the real thing.
    pub fn on_click<S: Surface<K>>(&mut self, surface: &S, event: &ClickEvent<K>) -> Reaction {
        if !self.engaged {
            return Reaction::empty();
        }

        // An activation arriving while a gesture is still nominally tracked
        // means a dialog or alert interrupted the gesture; reset and permit.
        if self.state.tracking {
            self.state.abandon();
            return Reaction::empty();
        }

        // Some on-screen keyboards activate a submit control with an
        // activation count of zero; that is a genuine submission. Button
        // elements count too, their type defaults to submit.
        if event.detail == 0
            && matches!(
                surface.element(event.target).kind,
                ElementKind::Input(InputType::Submit) | ElementKind::Button
            )
        {
            return Reaction::empty();
        }

        let reaction = self.on_mouse(surface, event);
        if !reaction.is_empty() {
            self.state.target = None;
        }
        reaction
    }
}

/// Resolve a raw event target to an element: text nodes stand in for their
/// parent.
fn normalize_target<K, S>(surface: &S, raw: K) -> K
where
    K: Copy + Eq,
    S: Surface<K>,
{
    if surface.element(raw).kind == ElementKind::TextNode {
        surface.parent(raw).unwrap_or(raw)
    } else {
        raw
    }
}
