// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: element ids, supported event types, phases, and handler keys.
//!
//! ## Property naming
//!
//! Handlers are keyed by the closed enumeration [`HandlerKey`]. The string form of a key follows
//! the element property convention: `"on"` + the capitalized native event name for the bubble
//! phase (`onClick`), with a `"Capture"` suffix for the capture phase (`onClickCapture`).
//! Matching is exact and case-sensitive.

/// Identifier for an element in an [`ElementTree`](crate::ElementTree).
///
/// Ids are dense and assigned in depth-first pre-order, so the root is always index 0 and a
/// parent's id is smaller than any of its descendants'.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "ElementId uses 32-bit indices by design."
    )]
    pub(crate) const fn at(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Position of the element in pre-order.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Event types the delegation engine knows how to route.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventType {
    /// `click`
    Click,
    /// `dblclick`
    DblClick,
    /// `mousedown`
    MouseDown,
    /// `mouseup`
    MouseUp,
    /// `keydown`
    KeyDown,
    /// `keyup`
    KeyUp,
    /// `input`
    Input,
}

impl EventType {
    /// Every supported event type, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Click,
        Self::DblClick,
        Self::MouseDown,
        Self::MouseUp,
        Self::KeyDown,
        Self::KeyUp,
        Self::Input,
    ];

    /// The native event name used when registering listeners with the host.
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Input => "input",
        }
    }

    /// Look up a supported event type by its native name.
    pub fn from_native_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.native_name() == name)
    }

    /// Property name of the bubble-phase handler.
    pub const fn bubble_prop(self) -> &'static str {
        match self {
            Self::Click => "onClick",
            Self::DblClick => "onDblclick",
            Self::MouseDown => "onMousedown",
            Self::MouseUp => "onMouseup",
            Self::KeyDown => "onKeydown",
            Self::KeyUp => "onKeyup",
            Self::Input => "onInput",
        }
    }

    /// Property name of the capture-phase handler.
    pub const fn capture_prop(self) -> &'static str {
        match self {
            Self::Click => "onClickCapture",
            Self::DblClick => "onDblclickCapture",
            Self::MouseDown => "onMousedownCapture",
            Self::MouseUp => "onMouseupCapture",
            Self::KeyDown => "onKeydownCapture",
            Self::KeyUp => "onKeyupCapture",
            Self::Input => "onInputCapture",
        }
    }

    /// The single-member [`EventTypes`] set for this type.
    pub const fn flag(self) -> EventTypes {
        match self {
            Self::Click => EventTypes::CLICK,
            Self::DblClick => EventTypes::DBL_CLICK,
            Self::MouseDown => EventTypes::MOUSE_DOWN,
            Self::MouseUp => EventTypes::MOUSE_UP,
            Self::KeyDown => EventTypes::KEY_DOWN,
            Self::KeyUp => EventTypes::KEY_UP,
            Self::Input => EventTypes::INPUT,
        }
    }
}

bitflags::bitflags! {
    /// A set of event types, used to configure which types a root delegates.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventTypes: u8 {
        /// `click`
        const CLICK      = 0b0000_0001;
        /// `dblclick`
        const DBL_CLICK  = 0b0000_0010;
        /// `mousedown`
        const MOUSE_DOWN = 0b0000_0100;
        /// `mouseup`
        const MOUSE_UP   = 0b0000_1000;
        /// `keydown`
        const KEY_DOWN   = 0b0001_0000;
        /// `keyup`
        const KEY_UP     = 0b0010_0000;
        /// `input`
        const INPUT      = 0b0100_0000;
    }
}

impl Default for EventTypes {
    fn default() -> Self {
        Self::CLICK
    }
}

impl EventTypes {
    /// Iterate the member event types in declaration order.
    pub fn types(self) -> impl Iterator<Item = EventType> {
        EventType::ALL
            .into_iter()
            .filter(move |t| self.contains(t.flag()))
    }
}

/// Propagation phase of a delegated pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Root-to-target traversal.
    Capture,
    /// Target-to-root traversal.
    Bubble,
}

/// Key under which a handler is registered: one event type in one phase.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HandlerKey {
    /// Event type handled.
    pub event: EventType,
    /// Phase handled.
    pub phase: Phase,
}

impl HandlerKey {
    /// Create a key.
    pub const fn new(event: EventType, phase: Phase) -> Self {
        Self { event, phase }
    }

    /// Bubble-phase key for `event`.
    pub const fn bubble(event: EventType) -> Self {
        Self::new(event, Phase::Bubble)
    }

    /// Capture-phase key for `event`.
    pub const fn capture(event: EventType) -> Self {
        Self::new(event, Phase::Capture)
    }

    /// The element property name for this key, e.g. `onClickCapture`.
    pub const fn prop_name(self) -> &'static str {
        match self.phase {
            Phase::Capture => self.event.capture_prop(),
            Phase::Bubble => self.event.bubble_prop(),
        }
    }

    /// Parse an element property name. Returns `None` unless `name` matches a supported key exactly.
    pub fn from_prop_name(name: &str) -> Option<Self> {
        EventType::ALL.into_iter().find_map(|event| {
            if name == event.bubble_prop() {
                Some(Self::bubble(event))
            } else if name == event.capture_prop() {
                Some(Self::capture(event))
            } else {
                None
            }
        })
    }
}
