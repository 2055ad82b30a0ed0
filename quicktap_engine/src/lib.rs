// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quicktap Engine: touch-to-activation reconciliation for tap-delayed hosts.
//!
//! Browsers with double-tap zoom wait roughly 300 ms after a tap before
//! delivering the activation (click) event. This crate removes that wait: it
//! tracks raw touch signals per surface, decides whether they form a
//! deliberate tap, dispatches an immediate synthetic activation, and then
//! suppresses the browser's delayed duplicate so that exactly one activation
//! reaches the target per genuine tap.
//!
//! ## Design
//!
//! The engine is a pure state machine, generic over an element key `K` and
//! decoupled from any concrete DOM through the [`Surface`] trait. The host
//! delivers each event with a millisecond timestamp; handlers mutate the
//! surface's [`GestureState`] and return a [`Reaction`] bitset that the host
//! applies to the originating event (prevent default, stop propagation, stop
//! further same-type handlers).
//!
//! - [`TapEngine`] owns the per-surface state and the handler methods.
//! - [`quicktap_gate::Environment`] is consulted once at [`TapEngine::attach`];
//!   a gated-off engine installs no listeners and every handler is a no-op.
//! - [`quicktap_policy`] supplies the per-element exception tables.
//! - [`synth`] builds the synthetic activation and simulates focus.
//! - [`control`] resolves labels to their associated control.
//! - [`attachment`] is the listener registration contract.
//!
//! ## Minimal example
//!
//! A tap on a plain container produces one immediate synthetic activation and
//! asks the host to cancel the native one:
//!
//! ```
//! use kurbo::Point;
//! use quicktap_engine::{
//!     ClickEvent, Config, Reaction, Surface, SyntheticClick, TapEngine, TouchPoint,
//! };
//! use quicktap_gate::Environment;
//! use quicktap_policy::{ElementInfo, ElementKind};
//!
//! // A one-element host: everything is a generic container.
//! #[derive(Default)]
//! struct OneDiv {
//!     clicks: Vec<SyntheticClick>,
//! }
//!
//! impl Surface<u32> for OneDiv {
//!     fn element(&self, _: u32) -> ElementInfo {
//!         ElementInfo::of(ElementKind::Other)
//!     }
//!     fn parent(&self, _: u32) -> Option<u32> {
//!         None
//!     }
//!     fn focused(&self) -> Option<u32> {
//!         None
//!     }
//!     fn focus(&mut self, _: u32) {}
//!     fn blur(&mut self, _: u32) {}
//!     fn dispatch_click(&mut self, _: u32, click: SyntheticClick) {
//!         self.clicks.push(click);
//!     }
//! }
//!
//! let env = Environment {
//!     touch_supported: true,
//!     ..Environment::default()
//! };
//! let mut engine: TapEngine<u32> = TapEngine::attach(&env, Config::default());
//! let mut surface = OneDiv::default();
//!
//! // touch-start at (10, 10), touch-end at (11, 11) 50 ms later.
//! let down = TouchPoint::at(Point::new(10.0, 10.0));
//! engine.on_touch_start(&mut surface, 1, &[down], 1_000);
//! let up = TouchPoint::at(Point::new(11.0, 11.0));
//! let reaction = engine.on_touch_end(&mut surface, &up, 1_050);
//!
//! // One synthetic activation fired at the end coordinates, and the host is
//! // told to cancel the browser's delayed one.
//! assert_eq!(surface.clicks.len(), 1);
//! assert_eq!(surface.clicks[0].client, Point::new(11.0, 11.0));
//! assert!(reaction.contains(Reaction::PREVENT_DEFAULT));
//!
//! // The delayed native click still arrives later; the arbiter drops it.
//! let phantom = engine.on_click(&mut surface, &ClickEvent::native(1));
//! assert!(phantom.contains(Reaction::STOP_IMMEDIATE));
//! ```
//!
//! ## Timing
//!
//! All thresholds live in [`Config`]: the double-tap suppression window
//! (200 ms), the maximum tap duration (700 ms), the movement boundary
//! (10 device-independent pixels per axis), and the focus dwell threshold
//! (100 ms). The engine always uses the host-supplied per-event timestamp;
//! event-intrinsic timestamps are never consulted.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod attachment;
pub mod control;
mod engine;
mod host;
mod state;
pub mod synth;

pub use engine::TapEngine;
pub use host::{ClickEvent, PointerId, Reaction, Surface, TouchPoint};
pub use state::GestureState;
pub use synth::{ClickKind, SyntheticClick};

/// Timing and movement thresholds, fixed per attached surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Minimum time in milliseconds between two accepted taps; a completed
    /// gesture closer than this to the previous activation is treated as the
    /// double-tap echo and suppressed.
    pub tap_delay: u64,
    /// Maximum gesture duration in milliseconds; longer gestures are no
    /// longer taps.
    pub tap_timeout: u64,
    /// Movement boundary in device-independent pixels; drifting past it on
    /// either axis cancels the gesture as a scroll or drag.
    pub touch_boundary: f64,
    /// Dwell threshold in milliseconds for focus-needing elements; past it
    /// the native focus is imminent and the engine stands down.
    pub focus_dwell: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tap_delay: 200,
            tap_timeout: 700,
            touch_boundary: 10.0,
            focus_dwell: 100,
        }
    }
}
