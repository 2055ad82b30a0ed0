// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An ordered registry of activation callbacks with immediate-stop emulation.
//!
//! Quicktap's activation arbiter sometimes needs to stop not just
//! propagation of a phantom activation but every remaining handler for it on
//! the same element ([`Reaction::STOP_IMMEDIATE`]). Old host event systems
//! lack that primitive. This crate provides the replacement the engine
//! assumes on such hosts: activation callbacks are routed through a
//! [`DispatchRegistry`] instead of being registered with the host directly,
//! and the registry short-circuits the remaining callbacks as soon as one of
//! them asks for a stop.
//!
//! Callbacks run in registration order. Registration hands back a
//! [`CallbackToken`] which is the only way to remove the callback again, so
//! the same closure can be registered twice and removed independently,
//! matching host event systems where listener identity is per registration.
//!
//! ```
//! use quicktap_listener::{DispatchRegistry, Outcome};
//!
//! let mut registry: DispatchRegistry<u32> = DispatchRegistry::new();
//! registry.add(|count| {
//!     *count += 1;
//!     Outcome::Stop
//! });
//! let unreached = registry.add(|count| {
//!     *count += 100;
//!     Outcome::Continue
//! });
//!
//! let mut count = 0;
//! assert_eq!(registry.dispatch(&mut count), Outcome::Stop);
//! assert_eq!(count, 1);
//!
//! registry.remove(unreached);
//! assert_eq!(registry.len(), 1);
//! ```
//!
//! [`Reaction::STOP_IMMEDIATE`]: https://docs.rs/quicktap_engine/latest/quicktap_engine/struct.Reaction.html
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;

/// Handle identifying one registered callback.
///
/// Tokens are unique per registry for its whole lifetime; a removed token is
/// never reissued.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallbackToken(u64);

/// What a callback decided about the rest of the dispatch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Let the remaining callbacks run.
    #[default]
    Continue,
    /// Skip every remaining callback for this event.
    Stop,
}

type Callback<E> = Box<dyn FnMut(&mut E) -> Outcome>;

/// Activation callbacks for one element, dispatched in registration order.
pub struct DispatchRegistry<E> {
    callbacks: HashMap<CallbackToken, Callback<E>>,
    order: Vec<CallbackToken>,
    next_token: u64,
}

impl<E> Default for DispatchRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> DispatchRegistry<E> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
            order: Vec::new(),
            next_token: 0,
        }
    }

    /// Register a callback behind all existing ones.
    pub fn add(&mut self, callback: impl FnMut(&mut E) -> Outcome + 'static) -> CallbackToken {
        let token = CallbackToken(self.next_token);
        self.next_token += 1;
        self.callbacks.insert(token, Box::new(callback));
        self.order.push(token);
        token
    }

    /// Remove a callback. Returns whether the token was registered; removing
    /// twice is a no-op, as is removing a token from another registry.
    pub fn remove(&mut self, token: CallbackToken) -> bool {
        if self.callbacks.remove(&token).is_none() {
            return false;
        }
        self.order.retain(|t| *t != token);
        true
    }

    /// Run the callbacks in registration order until one returns
    /// [`Outcome::Stop`] or they are exhausted.
    ///
    /// Returns [`Outcome::Stop`] when a callback cut the dispatch short.
    pub fn dispatch(&mut self, event: &mut E) -> Outcome {
        for i in 0..self.order.len() {
            let token = self.order[i];
            if let Some(callback) = self.callbacks.get_mut(&token)
                && callback(event) == Outcome::Stop
            {
                return Outcome::Stop;
            }
        }
        Outcome::Continue
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove every callback. Issued tokens stay invalid afterwards.
    pub fn clear(&mut self) {
        self.callbacks.clear();
        self.order.clear();
    }
}

impl<E> core::fmt::Debug for DispatchRegistry<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DispatchRegistry")
            .field("order", &self.order)
            .field("next_token", &self.next_token)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    #[test]
    fn callbacks_run_in_registration_order() {
        let mut registry: DispatchRegistry<Vec<u32>> = DispatchRegistry::new();
        registry.add(|log| {
            log.push(1);
            Outcome::Continue
        });
        registry.add(|log| {
            log.push(2);
            Outcome::Continue
        });
        registry.add(|log| {
            log.push(3);
            Outcome::Continue
        });

        let mut log = Vec::new();
        assert_eq!(registry.dispatch(&mut log), Outcome::Continue);
        assert_eq!(log, [1, 2, 3]);
    }

    #[test]
    fn stop_skips_remaining_callbacks() {
        let mut registry: DispatchRegistry<Vec<u32>> = DispatchRegistry::new();
        registry.add(|log| {
            log.push(1);
            Outcome::Continue
        });
        registry.add(|log| {
            log.push(2);
            Outcome::Stop
        });
        registry.add(|log| {
            log.push(3);
            Outcome::Continue
        });

        let mut log = Vec::new();
        assert_eq!(registry.dispatch(&mut log), Outcome::Stop);
        assert_eq!(log, [1, 2]);

        // The stop is per dispatch, not sticky.
        let mut log = Vec::new();
        registry.dispatch(&mut log);
        assert_eq!(log, [1, 2]);
    }

    #[test]
    fn removal_is_by_token_and_idempotent() {
        let mut registry: DispatchRegistry<u32> = DispatchRegistry::new();
        let first = registry.add(|n| {
            *n += 1;
            Outcome::Continue
        });
        registry.add(|n| {
            *n += 10;
            Outcome::Continue
        });

        assert!(registry.remove(first));
        assert!(!registry.remove(first));
        assert_eq!(registry.len(), 1);

        let mut n = 0;
        registry.dispatch(&mut n);
        assert_eq!(n, 10);
    }

    #[test]
    fn same_closure_registered_twice_runs_twice() {
        let count = Rc::new(RefCell::new(0));
        let mut registry: DispatchRegistry<()> = DispatchRegistry::new();
        for _ in 0..2 {
            let count = Rc::clone(&count);
            registry.add(move |()| {
                *count.borrow_mut() += 1;
                Outcome::Continue
            });
        }

        registry.dispatch(&mut ());
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn tokens_are_never_reissued() {
        let mut registry: DispatchRegistry<u32> = DispatchRegistry::new();
        let first = registry.add(|_| Outcome::Continue);
        registry.remove(first);
        let second = registry.add(|_| Outcome::Continue);
        assert_ne!(first, second);
        assert!(!registry.remove(first));
    }

    #[test]
    fn clear_empties_the_registry() {
        let mut registry: DispatchRegistry<u32> = DispatchRegistry::new();
        let token = registry.add(|_| Outcome::Continue);
        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.remove(token));
    }
}
