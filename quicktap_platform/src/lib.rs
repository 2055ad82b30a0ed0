// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quicktap Platform: browser/platform sniffing resolved into plain booleans.
//!
//! Tap-delay reconciliation needs a handful of per-platform exceptions: which
//! family reports stale touch-end targets after a scroll, which one repeats
//! touch identifiers across gestures, which one auto-focuses selection lists,
//! and so on. Rather than probing ambient global state at each decision point,
//! this crate parses a user-agent string **once** into a [`Quirks`] record
//! that the rest of the workspace treats as injected configuration.
//!
//! Keeping the sniffing behind a plain struct of booleans makes every
//! downstream decision deterministic and testable: a test can fabricate any
//! platform by constructing [`Quirks`] directly, with no string parsing
//! involved.
//!
//! ```
//! use quicktap_platform::Quirks;
//!
//! let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 6_1 like Mac OS X) \
//!           AppleWebKit/536.26 Mobile/10B142 Safari/8536.25";
//! let quirks = Quirks::from_user_agent(ua);
//! assert!(quirks.ios);
//! assert!(quirks.ios_stale_touch_targets);
//! assert!(!quirks.android);
//! ```
//!
//! The [`version`] module provides the browser-version extractors used by the
//! capability gate (`quicktap_gate`).

#![no_std]

pub mod version;

/// Per-platform exception flags, resolved once at construction.
///
/// Each flag names the behavior that requires an exception, not the marketing
/// name of a browser release; see the field docs for what each one gates.
/// [`Quirks::default`] yields a quirk-free platform, which is the correct
/// baseline for desktop-class hosts and test doubles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// Windows Phone 8.1 fakes its user agent to look like Android and
    /// iPhone; when set, both family flags below are forced off.
    pub windows_phone: bool,
    /// Android: selection lists auto-focus, their popup only opens on a
    /// press event, and the browser fires a mouse-family stream ahead of the
    /// native click.
    pub android: bool,
    /// iOS: repeated touch identifiers after dialog dismissal, fling-stop
    /// taps, the caret-positioning focus bug, and selects that need the
    /// native click to open their popup.
    pub ios: bool,
    /// iOS 4: duplicate-identifier suppression is unavailable (normal touches
    /// can legitimately repeat identifiers there) and selects keep the
    /// generic path.
    pub ios4: bool,
    /// iOS 6.0–7.x: the touch-end target is stale while the surface scrolls
    /// or transitions, so the final target must be re-derived by hit test.
    pub ios_stale_touch_targets: bool,
    /// BlackBerry 10: its newer minors remove the tap delay on their own when
    /// the viewport is locked down.
    pub blackberry10: bool,
}

impl Quirks {
    /// Resolve platform quirks from a user-agent string.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let windows_phone = user_agent.contains("Windows Phone");
        let android =
            user_agent.find("Android").is_some_and(|at| at > 0) && !windows_phone;
        let ios = (user_agent.contains("iPad")
            || user_agent.contains("iPhone")
            || user_agent.contains("iPod"))
            && !windows_phone;
        let ios4 = ios && version::ios_os_major_is(user_agent, 4);
        let ios_stale_touch_targets = ios
            && (version::ios_os_major_is(user_agent, 6)
                || version::ios_os_major_is(user_agent, 7));
        let blackberry10 = user_agent.find("BB10").is_some_and(|at| at > 0);
        Self {
            windows_phone,
            android,
            ios,
            ios4,
            ios_stale_touch_targets,
            blackberry10,
        }
    }
}
