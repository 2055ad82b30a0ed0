// Copyright 2025 the Quicktap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quicktap Policy: per-element activation policy as pure predicates.
//!
//! Some elements must receive the browser's own delayed activation (a
//! synthetic one would not open a file picker or a frame), and some need a
//! focus call before a click has any effect. This crate captures those rules
//! as two total predicates over a small element descriptor:
//!
//! - [`needs_native_click`]: the element's native activation must be allowed
//!   through; the engine never synthesizes for it and never cancels its
//!   default.
//! - [`needs_focus`]: the element needs focus simulation before a synthetic
//!   activation takes effect.
//!
//! The descriptor ([`ElementInfo`]) is supplied by the host for a concrete
//! element **at each decision point** — element attributes change between
//! events, so decisions are always recomputed, never cached.
//!
//! ```
//! use quicktap_platform::Quirks;
//! use quicktap_policy::{needs_native_click, ElementFlags, ElementInfo, ElementKind, InputType};
//!
//! let quirks = Quirks::default();
//!
//! // A plain container only needs a native click when it opts in by class.
//! let div = ElementInfo::of(ElementKind::Other);
//! assert!(!needs_native_click(&div, &quirks));
//!
//! let opted_in = ElementInfo {
//!     flags: ElementFlags::from_class_list("btn needsclick primary"),
//!     ..div
//! };
//! assert!(needs_native_click(&opted_in, &quirks));
//!
//! // Disabled controls always keep their (inert) native activation.
//! let disabled = ElementInfo {
//!     kind: ElementKind::Input(InputType::Text),
//!     flags: ElementFlags::DISABLED,
//! };
//! assert!(needs_native_click(&disabled, &quirks));
//! ```

#![no_std]

use quicktap_platform::Quirks;

bitflags::bitflags! {
    /// Attribute and class-token state of an element, resolved by the host.
    ///
    /// The two `*_CLASS` flags correspond to the literal class tokens
    /// `needsclick` and `needsfocus`; [`ElementFlags::from_class_list`]
    /// resolves them from a space-separated class string.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct ElementFlags: u8 {
        /// The element carries the `disabled` attribute.
        const DISABLED = 1 << 0;
        /// The element carries the `readonly` attribute.
        const READ_ONLY = 1 << 1;
        /// The class list contains the literal token `needsclick`.
        const NEEDS_CLICK_CLASS = 1 << 2;
        /// The class list contains the literal token `needsfocus`.
        const NEEDS_FOCUS_CLASS = 1 << 3;
    }
}

impl ElementFlags {
    /// Resolve the class-token flags from a space-separated class list.
    ///
    /// Only whole tokens match; `needsclickish` does not opt an element in.
    pub fn from_class_list(classes: &str) -> Self {
        let mut flags = Self::empty();
        for token in classes.split_ascii_whitespace() {
            match token {
                "needsclick" => flags |= Self::NEEDS_CLICK_CLASS,
                "needsfocus" => flags |= Self::NEEDS_FOCUS_CLASS,
                _ => {}
            }
        }
        flags
    }
}

/// Subtype of a text-entry-family `input` element, from its `type` attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputType {
    /// `type="button"`.
    Button,
    /// `type="checkbox"`.
    Checkbox,
    /// `type="file"`.
    File,
    /// `type="image"`.
    Image,
    /// `type="radio"`.
    Radio,
    /// `type="submit"`.
    Submit,
    /// `type="date"`.
    Date,
    /// `type="datetime"`.
    DateTime,
    /// `type="datetime-local"`.
    DateTimeLocal,
    /// `type="month"`.
    Month,
    /// `type="time"`.
    Time,
    /// `type="week"`.
    Week,
    /// `type="text"`, also the default when the attribute is absent.
    Text,
    /// `type="search"`.
    Search,
    /// `type="password"`.
    Password,
    /// `type="email"`.
    Email,
    /// `type="number"`.
    Number,
    /// `type="tel"`.
    Tel,
    /// `type="url"`.
    Url,
    /// `type="hidden"`.
    Hidden,
    /// Any other (or unrecognized future) subtype.
    Other,
}

impl InputType {
    /// Parse a `type` attribute value; `None` (attribute absent) maps to
    /// [`InputType::Text`] per the element's default.
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr {
            None => Self::Text,
            Some(value) => match value {
                "button" => Self::Button,
                "checkbox" => Self::Checkbox,
                "file" => Self::File,
                "image" => Self::Image,
                "radio" => Self::Radio,
                "submit" => Self::Submit,
                "date" => Self::Date,
                "datetime" => Self::DateTime,
                "datetime-local" => Self::DateTimeLocal,
                "month" => Self::Month,
                "time" => Self::Time,
                "week" => Self::Week,
                "text" => Self::Text,
                "search" => Self::Search,
                "password" => Self::Password,
                "email" => Self::Email,
                "number" => Self::Number,
                "tel" => Self::Tel,
                "url" => Self::Url,
                "hidden" => Self::Hidden,
                _ => Self::Other,
            },
        }
    }

    /// Subtypes that activate rather than accept text; these never take the
    /// focus-simulation path.
    pub fn is_activation_only(self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Checkbox
                | Self::File
                | Self::Image
                | Self::Radio
                | Self::Submit
        )
    }

    /// Date/time subtypes whose selection-range queries throw on the
    /// caret-bug platform; caret placement must skip them.
    pub fn caret_query_throws(self) -> bool {
        matches!(
            self,
            Self::Date
                | Self::DateTime
                | Self::DateTimeLocal
                | Self::Month
                | Self::Time
                | Self::Week
        )
    }
}

/// Coarse element classification, from the host's tag introspection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// A `button` element.
    Button,
    /// A `select` element.
    Select,
    /// A `textarea` element.
    TextArea,
    /// An `input` element with its subtype.
    Input(InputType),
    /// A `label` element.
    Label,
    /// An embedded frame (`iframe`).
    Frame,
    /// A `video` element.
    Video,
    /// A text node; gesture targets normalize to its parent element.
    TextNode,
    /// Anything else.
    Other,
}

impl ElementKind {
    /// Whether the element exposes a selection range (the caret primitive).
    ///
    /// Text areas always do; inputs do unless they are of an
    /// activation-only or hidden subtype. Note that the date/time subtypes
    /// *do* expose the range — querying it is what throws, which is why
    /// [`InputType::caret_query_throws`] exists as a separate test.
    pub fn exposes_selection_range(self) -> bool {
        match self {
            Self::TextArea => true,
            Self::Input(t) => !t.is_activation_only() && t != InputType::Hidden,
            _ => false,
        }
    }
}

/// Snapshot of the policy-relevant state of one element.
///
/// Hosts build this from live element state on demand; it is a derived value
/// and must not be stored across events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ElementInfo {
    /// Tag-level classification.
    pub kind: ElementKind,
    /// Attribute and class-token flags.
    pub flags: ElementFlags,
}

impl ElementInfo {
    /// Descriptor for an element with no flags set.
    pub const fn of(kind: ElementKind) -> Self {
        Self {
            kind,
            flags: ElementFlags::empty(),
        }
    }

    fn disabled(&self) -> bool {
        self.flags.contains(ElementFlags::DISABLED)
    }

    fn read_only(&self) -> bool {
        self.flags.contains(ElementFlags::READ_ONLY)
    }
}

/// Whether the element requires the browser's own activation.
///
/// When this returns `true` the engine neither synthesizes an activation for
/// the element nor cancels the native one. The table is order-sensitive and
/// deliberately mirrors the behavior web content has come to depend on:
///
/// - disabled buttons, selects, and text areas;
/// - file inputs on the caret-bug platform (their picker ignores synthetic
///   clicks there), and any disabled input;
/// - labels, embedded frames, and video elements;
/// - anything whose class list carries the literal `needsclick` token.
pub fn needs_native_click(info: &ElementInfo, quirks: &Quirks) -> bool {
    match info.kind {
        ElementKind::Button | ElementKind::Select | ElementKind::TextArea => {
            if info.disabled() {
                return true;
            }
        }
        ElementKind::Input(subtype) => {
            if (quirks.ios && subtype == InputType::File) || info.disabled() {
                return true;
            }
        }
        ElementKind::Label | ElementKind::Frame | ElementKind::Video => return true,
        _ => {}
    }
    info.flags.contains(ElementFlags::NEEDS_CLICK_CLASS)
}

/// Whether the element needs focus simulation for a synthetic activation to
/// take effect.
///
/// - text areas always;
/// - selects, except on the platform family that auto-focuses them;
/// - inputs of a text-entry subtype that are neither disabled nor read-only;
/// - anything whose class list carries the literal `needsfocus` token.
pub fn needs_focus(info: &ElementInfo, quirks: &Quirks) -> bool {
    match info.kind {
        ElementKind::TextArea => true,
        ElementKind::Select => !quirks.android,
        ElementKind::Input(subtype) => {
            if subtype.is_activation_only() {
                return false;
            }
            !info.disabled() && !info.read_only()
        }
        _ => info.flags.contains(ElementFlags::NEEDS_FOCUS_CLASS),
    }
}
