// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label-to-control resolution.
//!
//! A tap on a label should focus and activate the control the label is for,
//! never the label itself. Resolution is a small ordered fallback chain over
//! the host's lookups, first hit wins:
//!
//! 1. [`Surface::explicit_control`] — the host-level association, when the
//!    host tracks one directly.
//! 2. [`Surface::control_for_attribute`] — the element referenced by the
//!    label's `for` attribute.
//! 3. [`Surface::first_labellable_descendant`] — the first labellable
//!    element inside the label, by the host's fixed tag priority.
//!
//! `None` means the label has no control; end-of-gesture arbitration then
//! falls through to the generic path, where label elements keep their native
//! activation.

use crate::host::Surface;

/// Resolve the control associated with `label`, if any.
pub fn resolve_control<K, S>(surface: &S, label: K) -> Option<K>
where
    K: Copy + Eq,
    S: Surface<K>,
{
    surface
        .explicit_control(label)
        .or_else(|| surface.control_for_attribute(label))
        .or_else(|| surface.first_labellable_descendant(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::SyntheticClick;
    use quicktap_policy::{ElementInfo, ElementKind};

    /// A label host exercising one tier at a time.
    struct Tiers {
        explicit: Option<u32>,
        for_attr: Option<u32>,
        descendant: Option<u32>,
    }

    impl Surface<u32> for Tiers {
        fn element(&self, _: u32) -> ElementInfo {
            ElementInfo::of(ElementKind::Label)
        }
        fn parent(&self, _: u32) -> Option<u32> {
            None
        }
        fn focused(&self) -> Option<u32> {
            None
        }
        fn focus(&mut self, _: u32) {}
        fn blur(&mut self, _: u32) {}
        fn explicit_control(&self, _: u32) -> Option<u32> {
            self.explicit
        }
        fn control_for_attribute(&self, _: u32) -> Option<u32> {
            self.for_attr
        }
        fn first_labellable_descendant(&self, _: u32) -> Option<u32> {
            self.descendant
        }
        fn dispatch_click(&mut self, _: u32, _: SyntheticClick) {}
    }

    #[test]
    fn explicit_association_wins() {
        let surface = Tiers {
            explicit: Some(10),
            for_attr: Some(20),
            descendant: Some(30),
        };
        assert_eq!(resolve_control(&surface, 1), Some(10));
    }

    #[test]
    fn attribute_reference_is_second() {
        let surface = Tiers {
            explicit: None,
            for_attr: Some(20),
            descendant: Some(30),
        };
        assert_eq!(resolve_control(&surface, 1), Some(20));
    }

    #[test]
    fn descendant_is_last_resort() {
        let surface = Tiers {
            explicit: None,
            for_attr: None,
            descendant: Some(30),
        };
        assert_eq!(resolve_control(&surface, 1), Some(30));
    }

    #[test]
    fn unassociated_label_resolves_to_none() {
        let surface = Tiers {
            explicit: None,
            for_attr: None,
            descendant: None,
        };
        assert_eq!(resolve_control(&surface, 1), None);
    }
}
