// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser-version extraction from user-agent strings.
//!
//! These helpers power the capability gate's version thresholds. Each
//! extractor is total: any user agent that does not carry the expected token
//! yields `None`, which the gate treats as "family not present".

/// Extract the decimal run immediately following `marker`, if any.
fn number_after(user_agent: &str, marker: &str) -> Option<u32> {
    let rest = &user_agent[user_agent.find(marker)? + marker.len()..];
    let digits = rest.split(|c: char| !c.is_ascii_digit()).next()?;
    digits.parse().ok()
}

/// Chrome major version, `None` for other browsers.
pub fn chrome_version(user_agent: &str) -> Option<u32> {
    number_after(user_agent, "Chrome/")
}

/// Firefox major version, `None` for other browsers.
pub fn firefox_version(user_agent: &str) -> Option<u32> {
    number_after(user_agent, "Firefox/")
}

/// BlackBerry `(major, minor)` from the `Version/x.y` token.
pub fn blackberry_version(user_agent: &str) -> Option<(u32, u32)> {
    let rest = &user_agent[user_agent.find("Version/")? + "Version/".len()..];
    let mut parts = rest.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts
        .next()?
        .split(|c: char| !c.is_ascii_digit())
        .next()?
        .parse()
        .ok()?;
    Some((major, minor))
}

/// Whether the user agent reports an iOS release of the given major version.
///
/// Matches the `OS <major>_<minor>` token that iOS user agents carry; the
/// trailing digit is required so that `OS 4` alone never matches.
pub(crate) fn ios_os_major_is(user_agent: &str, major: u32) -> bool {
    let mut haystack = user_agent;
    while let Some(at) = haystack.find("OS ") {
        let rest = &haystack[at + "OS ".len()..];
        let digits: &str = rest
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .unwrap_or("");
        if digits.parse() == Ok(major) {
            let tail = &rest[digits.len()..];
            if tail.starts_with('_')
                && tail[1..].starts_with(|c: char| c.is_ascii_digit())
            {
                return true;
            }
        }
        haystack = &haystack[at + "OS ".len()..];
    }
    false
}
