// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener attachment contract.
//!
//! The engine does not register listeners itself; it tells the host *which*
//! listeners a surface needs through [`listener_set`] and tracks
//! installation state in [`Attachment`], which makes `install`/`destroy`
//! idempotent. The host supplies the actual registration mechanism behind
//! the [`EventRegistry`] trait. All listeners are non-capturing.

use smallvec::SmallVec;

use quicktap_platform::Quirks;

/// The event kinds a surface listens for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListenerKind {
    /// Native activation events.
    Click,
    /// Touch contact begins.
    TouchStart,
    /// Touch contact moves.
    TouchMove,
    /// Touch contact lifts.
    TouchEnd,
    /// Touch contact is cancelled by the host.
    TouchCancel,
    /// Pointer hover; fired ahead of activation on one family only.
    MouseOver,
    /// Pointer press; fired ahead of activation on one family only.
    MouseDown,
    /// Pointer release; fired ahead of activation on one family only.
    MouseUp,
}

/// Registration interface the host exposes for one surface.
///
/// Registrations are per-kind and non-capturing; `remove` of a kind that was
/// never added must be a no-op. A host that needs immediate-stop emulation
/// can compose `quicktap_listener`'s registry behind this interface.
pub trait EventRegistry {
    /// Register the surface's handler for `kind`.
    fn add(&mut self, kind: ListenerKind);
    /// Unregister the surface's handler for `kind`.
    fn remove(&mut self, kind: ListenerKind);
}

/// The listeners a surface needs on the given platform.
///
/// The mouse-family kinds appear only on the family that fires them ahead of
/// the native activation; everywhere else they would never see the redundant
/// stream they exist to filter.
pub fn listener_set(quirks: &Quirks) -> SmallVec<[ListenerKind; 8]> {
    let mut kinds: SmallVec<[ListenerKind; 8]> = SmallVec::new();
    kinds.extend([
        ListenerKind::Click,
        ListenerKind::TouchStart,
        ListenerKind::TouchMove,
        ListenerKind::TouchEnd,
        ListenerKind::TouchCancel,
    ]);
    if quirks.android {
        kinds.extend([
            ListenerKind::MouseOver,
            ListenerKind::MouseDown,
            ListenerKind::MouseUp,
        ]);
    }
    kinds
}

/// Installation state for one surface's listeners.
#[derive(Clone, Debug, Default)]
pub struct Attachment {
    installed: bool,
}

impl Attachment {
    /// A fresh, not-yet-installed attachment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether listeners are currently installed.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Register the surface's listener set; a second call changes nothing.
    pub fn install<R: EventRegistry>(&mut self, registry: &mut R, quirks: &Quirks) {
        if self.installed {
            return;
        }
        for kind in listener_set(quirks) {
            registry.add(kind);
        }
        self.installed = true;
    }

    /// Remove every installed listener; idempotent.
    pub fn destroy<R: EventRegistry>(&mut self, registry: &mut R, quirks: &Quirks) {
        if !self.installed {
            return;
        }
        for kind in listener_set(quirks) {
            registry.remove(kind);
        }
        self.installed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct CountingRegistry {
        adds: Vec<ListenerKind>,
        removes: Vec<ListenerKind>,
    }

    impl EventRegistry for CountingRegistry {
        fn add(&mut self, kind: ListenerKind) {
            self.adds.push(kind);
        }
        fn remove(&mut self, kind: ListenerKind) {
            self.removes.push(kind);
        }
    }

    #[test]
    fn base_set_has_no_mouse_kinds() {
        let kinds = listener_set(&Quirks::default());
        assert_eq!(kinds.len(), 5);
        assert!(!kinds.contains(&ListenerKind::MouseDown));
    }

    #[test]
    fn android_adds_mouse_family() {
        let quirks = Quirks {
            android: true,
            ..Quirks::default()
        };
        let kinds = listener_set(&quirks);
        assert_eq!(kinds.len(), 8);
        assert!(kinds.contains(&ListenerKind::MouseOver));
        assert!(kinds.contains(&ListenerKind::MouseDown));
        assert!(kinds.contains(&ListenerKind::MouseUp));
    }

    #[test]
    fn install_and_destroy_are_idempotent() {
        let quirks = Quirks::default();
        let mut registry = CountingRegistry::default();
        let mut attachment = Attachment::new();

        attachment.install(&mut registry, &quirks);
        attachment.install(&mut registry, &quirks);
        assert_eq!(registry.adds.len(), 5);
        assert!(attachment.is_installed());

        attachment.destroy(&mut registry, &quirks);
        attachment.destroy(&mut registry, &quirks);
        assert_eq!(registry.removes.len(), 5);
        assert!(!attachment.is_installed());
    }
}
