// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host protocol: node primitives, listener registration, and the native event view.

use alloc::rc::Rc;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Point;

use crate::error::ListenerError;

/// Handle returned by [`Host::add_event_listener`], used to remove the listener again.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a host-assigned listener number.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-assigned listener number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A native event listener.
///
/// Listeners are shared so that a host can clone them out of its registry before invoking them.
/// Returning `Err` reports the failure to the host's uncaught-error channel.
pub type Listener<E> = Rc<dyn Fn(&mut E) -> Result<(), ListenerError>>;

/// Object-safe view of a platform event.
///
/// Synthetic wrappers hold a `&mut dyn NativeEvent` so they can forward cancelation without
/// knowing which host produced the event.
pub trait NativeEvent {
    /// Native event type name, e.g. `"click"`.
    fn event_type(&self) -> &str;
    /// Request that the host skip its default action.
    fn prevent_default(&mut self);
    /// Request that the host stop native propagation after the current node.
    fn stop_propagation(&mut self);
    /// Whether the default action has been prevented.
    fn default_prevented(&self) -> bool;
    /// Whether native propagation has been stopped.
    fn propagation_stopped(&self) -> bool;
    /// Pointer position in world coordinates, for pointer events.
    fn position(&self) -> Option<Point> {
        None
    }
    /// Host timestamp in milliseconds.
    fn time_stamp(&self) -> u64 {
        0
    }
}

/// Backing display primitives.
///
/// A renderer only ever calls these operations; it never redefines them. Errors are
/// host-specific and are surfaced unchanged by callers.
pub trait Host {
    /// Handle to a backing node.
    type Node: Copy + Eq + Hash + Debug + 'static;
    /// The native event type delivered to listeners.
    type Event: NativeEvent + 'static;
    /// Host failure type.
    type Error: core::error::Error + 'static;

    /// Create a detached node of the given kind.
    fn create_node(&mut self, kind: &str) -> Result<Self::Node, Self::Error>;

    /// Replace the text content of `node`.
    fn set_text_content(&mut self, node: Self::Node, text: &str) -> Result<(), Self::Error>;

    /// Set a plain attribute on `node`.
    ///
    /// Hosts without an attribute model may ignore this; the default does nothing.
    fn set_attribute(
        &mut self,
        _node: Self::Node,
        _name: &str,
        _value: &str,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> Result<(), Self::Error>;

    /// Register `listener` on `node` for `event_type`, in the capture phase if `capture` is set.
    fn add_event_listener(
        &mut self,
        node: Self::Node,
        event_type: &str,
        capture: bool,
        listener: Listener<Self::Event>,
    ) -> Result<ListenerId, Self::Error>;

    /// Remove a listener previously added to `node`. Returns whether it was found.
    fn remove_event_listener(&mut self, node: Self::Node, id: ListenerId) -> bool;

    /// The node an event was originally targeted at, if it has been dispatched.
    fn event_target(event: &Self::Event) -> Option<Self::Node>;
}
