// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quicktap Gate: the one-shot decision of whether the engine should run.
//!
//! Modern browsers remove the tap delay themselves under various conditions
//! (desktop builds, locked-down viewports, `touch-action` styles). Running
//! the reconciliation engine there would add risk for no benefit, so the
//! engine consults this gate exactly once, before any listener is installed.
//! When the gate says the engine is not needed, the attached instance stays
//! fully inert.
//!
//! All signals are gathered into an [`Environment`] value up front — nothing
//! here reads ambient global state — so tests can simulate any host:
//!
//! ```
//! use quicktap_gate::{Environment, ViewportHint};
//!
//! // Android Chrome 32 with a device-width viewport: the browser already
//! // suppresses the delay.
//! let mut env = Environment::from_user_agent(
//!     "Mozilla/5.0 (Linux; Android 4.4) AppleWebKit/537.36 \
//!      (KHTML, like Gecko) Chrome/32.0.1700 Mobile Safari/537.36",
//! );
//! env.touch_supported = true;
//! env.viewport = Some(ViewportHint {
//!     user_scalable_no: false,
//!     fits_viewport: true,
//! });
//! assert!(!env.engine_needed());
//!
//! // The same browser on a zoomable, wider-than-device page needs help.
//! env.viewport = None;
//! assert!(env.engine_needed());
//! ```
//!
//! The decision short-circuits on the first rule that proves the engine
//! unnecessary, and every missing optional signal makes its rule fail — the
//! gate prefers staying engaged over silently breaking genuine taps.

#![no_std]

use quicktap_platform::{Quirks, version};

/// Hints extracted from a viewport meta declaration, when one exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ViewportHint {
    /// The declaration disables user scaling (`user-scalable=no`), which by
    /// itself eliminates the double-tap-zoom delay on several families.
    pub user_scalable_no: bool,
    /// The rendered document is no wider than the visual viewport, so there
    /// is nothing to double-tap-zoom into.
    pub fits_viewport: bool,
}

/// Computed `touch-action` style of the surface, prefix-normalized.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TouchAction {
    /// Default behavior; double-tap zoom stays possible.
    Auto,
    /// `touch-action: none`.
    None,
    /// `touch-action: manipulation`.
    Manipulation,
    /// Any other value.
    Other,
}

impl TouchAction {
    /// Parse a computed style value. The host resolves prefixed property
    /// *names*; values are shared across prefixes.
    pub fn from_style(value: &str) -> Self {
        match value.trim() {
            "auto" => Self::Auto,
            "none" => Self::None,
            "manipulation" => Self::Manipulation,
            _ => Self::Other,
        }
    }
}

/// Static environment signals, gathered once before attach.
///
/// Absent optional signals (`None`) simply fail the rules that would consult
/// them; see the crate docs for the fail-open rationale.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    /// Whether the host reports touch input support at all.
    pub touch_supported: bool,
    /// Platform exception flags.
    pub quirks: Quirks,
    /// Chrome major version; `None` for other browsers.
    pub chrome_version: Option<u32>,
    /// Firefox major version; `None` for other browsers.
    pub firefox_version: Option<u32>,
    /// BlackBerry `(major, minor)`; `None` for other browsers.
    pub blackberry_version: Option<(u32, u32)>,
    /// Viewport meta hints; `None` when the document declares none.
    pub viewport: Option<ViewportHint>,
    /// The surface's computed `touch-action`; `None` when the style system
    /// exposes no such property.
    pub touch_action: Option<TouchAction>,
    /// Whether the surface's document is embedded in another (cross-frame).
    pub cross_frame: bool,
}

impl Environment {
    /// Resolve the user-agent-derived signals; all other fields start at
    /// their defaults and are filled in by the host.
    pub fn from_user_agent(user_agent: &str) -> Self {
        Self {
            quirks: Quirks::from_user_agent(user_agent),
            chrome_version: version::chrome_version(user_agent),
            firefox_version: version::firefox_version(user_agent),
            blackberry_version: version::blackberry_version(user_agent),
            ..Self::default()
        }
    }

    /// The gate decision: `true` when the reconciliation engine should
    /// engage for this environment.
    ///
    /// Evaluated once at attach time; a `false` result means the instance
    /// stays inert with no listeners installed.
    pub fn engine_needed(&self) -> bool {
        !self.not_needed()
    }

    /// Short-circuiting rule chain; first match proves the engine
    /// unnecessary.
    fn not_needed(&self) -> bool {
        // 1. Hosts without touch input have no touch delay.
        if !self.touch_supported {
            return true;
        }

        // 2. Chrome: desktop builds never delay; Android builds stop
        // delaying once the viewport rules zoom out.
        if let Some(chrome) = self.chrome_version {
            if !self.quirks.android {
                return true;
            }
            if let Some(viewport) = self.viewport {
                if viewport.user_scalable_no {
                    return true;
                }
                if chrome > 31 && viewport.fits_viewport {
                    return true;
                }
            }
        }

        // 3. BlackBerry 10.3+ with a locked-down viewport.
        if self.quirks.blackberry10
            && let Some((major, minor)) = self.blackberry_version
            && major >= 10
            && minor >= 3
            && let Some(viewport) = self.viewport
            && (viewport.user_scalable_no || viewport.fits_viewport)
        {
            return true;
        }

        // 4. A touch-action that disables double-tap zoom removes the delay
        // on the families that honor it.
        if matches!(
            self.touch_action,
            Some(TouchAction::None | TouchAction::Manipulation)
        ) {
            return true;
        }

        // 5. Firefox 27+ drops the delay when the content is not zoomable.
        if let Some(firefox) = self.firefox_version
            && firefox >= 27
            && let Some(viewport) = self.viewport
            && (viewport.user_scalable_no || viewport.fits_viewport)
        {
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_env() -> Environment {
        Environment {
            touch_supported: true,
            ..Environment::default()
        }
    }

    fn locked_viewport() -> ViewportHint {
        ViewportHint {
            user_scalable_no: true,
            fits_viewport: false,
        }
    }

    fn fitting_viewport() -> ViewportHint {
        ViewportHint {
            user_scalable_no: false,
            fits_viewport: true,
        }
    }

    #[test]
    fn no_touch_support_short_circuits_everything() {
        // Even an environment that would otherwise engage stays out.
        let env = Environment {
            touch_supported: false,
            ..Environment::default()
        };
        assert!(!env.engine_needed());
    }

    #[test]
    fn generic_touch_host_engages() {
        assert!(touch_env().engine_needed());
    }

    #[test]
    fn desktop_chrome_not_needed() {
        let env = Environment {
            chrome_version: Some(40),
            ..touch_env()
        };
        assert!(!env.engine_needed());
    }

    #[test]
    fn android_chrome_depends_on_viewport() {
        let quirks = Quirks {
            android: true,
            ..Quirks::default()
        };

        // No viewport meta: fail open, stay engaged.
        let env = Environment {
            chrome_version: Some(32),
            quirks,
            ..touch_env()
        };
        assert!(env.engine_needed());

        // user-scalable=no: any Chrome version disengages.
        let env = Environment {
            chrome_version: Some(25),
            quirks,
            viewport: Some(locked_viewport()),
            ..touch_env()
        };
        assert!(!env.engine_needed());

        // Fitting content disengages only above version 31.
        let env = Environment {
            chrome_version: Some(31),
            quirks,
            viewport: Some(fitting_viewport()),
            ..touch_env()
        };
        assert!(env.engine_needed());
        let env = Environment {
            chrome_version: Some(32),
            quirks,
            viewport: Some(fitting_viewport()),
            ..touch_env()
        };
        assert!(!env.engine_needed());
    }

    #[test]
    fn blackberry_10_3_with_viewport_hints() {
        let quirks = Quirks {
            blackberry10: true,
            ..Quirks::default()
        };

        let env = Environment {
            quirks,
            blackberry_version: Some((10, 3)),
            viewport: Some(fitting_viewport()),
            ..touch_env()
        };
        assert!(!env.engine_needed());

        // Older minor: still engaged even with the same viewport.
        let env = Environment {
            quirks,
            blackberry_version: Some((10, 2)),
            viewport: Some(fitting_viewport()),
            ..touch_env()
        };
        assert!(env.engine_needed());

        // 10.3 without viewport hints: fail open.
        let env = Environment {
            quirks,
            blackberry_version: Some((10, 3)),
            ..touch_env()
        };
        assert!(env.engine_needed());
    }

    #[test]
    fn touch_action_disables_engine() {
        for value in ["none", "manipulation"] {
            let env = Environment {
                touch_action: Some(TouchAction::from_style(value)),
                ..touch_env()
            };
            assert!(!env.engine_needed(), "touch-action: {value}");
        }
        let env = Environment {
            touch_action: Some(TouchAction::from_style("pan-y")),
            ..touch_env()
        };
        assert!(env.engine_needed());
    }

    #[test]
    fn firefox_27_with_viewport_hints() {
        let env = Environment {
            firefox_version: Some(27),
            viewport: Some(locked_viewport()),
            ..touch_env()
        };
        assert!(!env.engine_needed());

        let env = Environment {
            firefox_version: Some(26),
            viewport: Some(locked_viewport()),
            ..touch_env()
        };
        assert!(env.engine_needed());

        let env = Environment {
            firefox_version: Some(27),
            ..touch_env()
        };
        assert!(env.engine_needed());
    }

    #[test]
    fn from_user_agent_fills_versions() {
        let env = Environment::from_user_agent(
            "Mozilla/5.0 (Linux; Android 4.4) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/32.0.1700 Mobile Safari/537.36",
        );
        assert_eq!(env.chrome_version, Some(32));
        assert!(env.quirks.android);
        assert!(!env.touch_supported);
    }
}
