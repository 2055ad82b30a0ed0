// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tap reconciliation against a simulated document.
//!
//! This example shows how to combine:
//! - `quicktap_gate` to decide from environment signals whether the engine
//!   should engage at all,
//! - `quicktap_engine` to turn raw touch events into immediate synthetic
//!   activations and suppress the delayed native duplicates,
//! - `quicktap_listener` to emulate immediate-stop for activation callbacks
//!   on hosts without that primitive.
//!
//! Run:
//! - `cargo run -p quicktap_examples --example tap_walkthrough`

use std::collections::HashMap;

use kurbo::Point;
use quicktap_engine::{
    ClickEvent, Config, Reaction, Surface, SyntheticClick, TapEngine, TouchPoint,
};
use quicktap_gate::Environment;
use quicktap_listener::{DispatchRegistry, Outcome};
use quicktap_policy::{ElementFlags, ElementInfo, ElementKind, InputType};

/// A flat simulated document: element handles map straight to descriptors.
#[derive(Default)]
struct Document {
    elements: HashMap<u32, ElementInfo>,
    focused: Option<u32>,
    synthesized: Vec<(u32, SyntheticClick)>,
}

impl Surface<u32> for Document {
    fn element(&self, target: u32) -> ElementInfo {
        self.elements
            .get(&target)
            .copied()
            .unwrap_or(ElementInfo::of(ElementKind::Other))
    }
    fn parent(&self, _: u32) -> Option<u32> {
        None
    }
    fn focused(&self) -> Option<u32> {
        self.focused
    }
    fn focus(&mut self, target: u32) {
        self.focused = Some(target);
    }
    fn blur(&mut self, target: u32) {
        if self.focused == Some(target) {
            self.focused = None;
        }
    }
    fn dispatch_click(&mut self, target: u32, click: SyntheticClick) {
        self.synthesized.push((target, click));
    }
}

const BUTTON: u32 = 1;
const MAP_PANE: u32 = 2;

fn main() {
    // A touch-capable environment with none of the opt-out signals set, so
    // the gate engages the engine. A desktop user agent here would leave it
    // inert and every handler below would be a pass-through.
    let env = Environment {
        touch_supported: true,
        ..Environment::from_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 7_0 like Mac OS X) \
             AppleWebKit/537.51.1 (KHTML, like Gecko) Version/7.0 Mobile/11A465 Safari/9537.53",
        )
    };
    let mut engine: TapEngine<u32> = TapEngine::attach(&env, Config::default());
    println!("engine engaged: {}", engine.is_engaged());

    let mut document = Document::default();
    document
        .elements
        .insert(BUTTON, ElementInfo::of(ElementKind::Input(InputType::Button)));
    document.elements.insert(
        MAP_PANE,
        ElementInfo {
            kind: ElementKind::Other,
            flags: ElementFlags::NEEDS_CLICK_CLASS,
        },
    );

    // Activation callbacks are routed through a dispatch registry, which is
    // how hosts without stopImmediatePropagation honor STOP_IMMEDIATE.
    let mut on_activate: DispatchRegistry<u32> = DispatchRegistry::new();
    on_activate.add(|target| {
        println!("  activation delivered to element {target}");
        Outcome::Continue
    });

    // --- A quick tap on a button ------------------------------------------
    println!("tap on the button:");
    let touch = TouchPoint::at(Point::new(40.0, 120.0)).with_id(1);
    engine.on_touch_start(&mut document, BUTTON, &[touch], 1_000);
    let reaction = engine.on_touch_end(&mut document, &touch, 1_060);
    for &(target, _) in &document.synthesized {
        let mut target = target;
        on_activate.dispatch(&mut target);
    }
    println!("  touch-end reaction: {reaction:?}");

    // ~300 ms later the browser delivers its own click for the same tap.
    let phantom = engine.on_click(&document, &ClickEvent::native(BUTTON));
    if phantom.contains(Reaction::STOP_IMMEDIATE) {
        println!("  delayed native click suppressed");
    } else {
        let mut target = BUTTON;
        on_activate.dispatch(&mut target);
    }

    // --- A tap on an opted-out element ------------------------------------
    // The map pane carries the needsclick class, so the engine stands back
    // and the native click is the one that activates it.
    println!("tap on the map pane:");
    let touch = TouchPoint::at(Point::new(200.0, 300.0)).with_id(2);
    engine.on_touch_start(&mut document, MAP_PANE, &[touch], 2_000);
    let reaction = engine.on_touch_end(&mut document, &touch, 2_050);
    println!("  touch-end reaction: {reaction:?} (native activation kept)");
    let native = engine.on_click(&document, &ClickEvent::native(MAP_PANE));
    if native.is_empty() {
        let mut target = MAP_PANE;
        on_activate.dispatch(&mut target);
    }

    println!(
        "synthetic activations dispatched: {}",
        document.synthesized.len()
    );
}
