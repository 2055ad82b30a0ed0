// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus simulation and label resolution against a simulated form.
//!
//! This example shows the focus-side flows:
//! - a quick tap on a text field takes synthetic focus plus an immediate
//!   activation,
//! - a slow press on the same field stands down and lets the native focus
//!   happen,
//! - a tap on a label lands on its associated checkbox, never the label.
//!
//! Run:
//! - `cargo run -p quicktap_examples --example focus_and_labels`

use std::collections::HashMap;

use kurbo::Point;
use quicktap_engine::{Config, Surface, SyntheticClick, TapEngine, TouchPoint};
use quicktap_gate::Environment;
use quicktap_policy::{ElementInfo, ElementKind, InputType};

const NAME_FIELD: u32 = 1;
const TERMS_LABEL: u32 = 2;
const TERMS_CHECKBOX: u32 = 3;

/// A simulated form with one label association.
#[derive(Default)]
struct Form {
    elements: HashMap<u32, ElementInfo>,
    label_for: HashMap<u32, u32>,
    focused: Option<u32>,
    synthesized: Vec<(u32, SyntheticClick)>,
}

impl Surface<u32> for Form {
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
        println!("  focus -> element {target}");
        self.focused = Some(target);
    }
    fn blur(&mut self, target: u32) {
        println!("  blur  -> element {target}");
        if self.focused == Some(target) {
            self.focused = None;
        }
    }
    fn control_for_attribute(&self, label: u32) -> Option<u32> {
        self.label_for.get(&label).copied()
    }
    fn dispatch_click(&mut self, target: u32, click: SyntheticClick) {
        println!("  synthetic {:?} -> element {target}", click.kind);
        self.synthesized.push((target, click));
    }
}

fn tap(engine: &mut TapEngine<u32>, form: &mut Form, target: u32, start: u64, end: u64) {
    let touch = TouchPoint::at(Point::new(50.0, 50.0));
    engine.on_touch_start(form, target, &[touch], start);
    engine.on_touch_end(form, &touch, end);
}

fn main() {
    let env = Environment {
        touch_supported: true,
        ..Environment::default()
    };
    let mut engine: TapEngine<u32> = TapEngine::attach(&env, Config::default());

    let mut form = Form::default();
    form.elements.insert(
        NAME_FIELD,
        ElementInfo::of(ElementKind::Input(InputType::Text)),
    );
    form.elements
        .insert(TERMS_LABEL, ElementInfo::of(ElementKind::Label));
    form.elements.insert(
        TERMS_CHECKBOX,
        ElementInfo::of(ElementKind::Input(InputType::Checkbox)),
    );
    form.label_for.insert(TERMS_LABEL, TERMS_CHECKBOX);

    println!("quick tap on the text field (60 ms dwell):");
    tap(&mut engine, &mut form, NAME_FIELD, 1_000, 1_060);

    println!("slow press on the text field (150 ms dwell, native focus wins):");
    tap(&mut engine, &mut form, NAME_FIELD, 2_000, 2_150);
    println!("  (nothing synthesized)");

    println!("tap on the terms label:");
    tap(&mut engine, &mut form, TERMS_LABEL, 3_000, 3_050);

    let targets: Vec<u32> = form.synthesized.iter().map(|&(t, _)| t).collect();
    println!("synthetic activation targets: {targets:?}");
    assert_eq!(targets, [NAME_FIELD, TERMS_CHECKBOX]);
}
