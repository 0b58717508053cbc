// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the in-memory document: node identifiers and native events.

use alloc::string::String;

use kurbo::Point;

use crate::host::NativeEvent;

/// Identifier for a node in a [`Document`](crate::Document).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Native delivery stage of a [`DomEvent`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum EventPhase {
    /// Not being dispatched.
    #[default]
    None,
    /// Root-to-target traversal over the target's ancestors.
    Capturing,
    /// Listeners on the target itself.
    AtTarget,
    /// Target-to-root traversal over the target's ancestors.
    Bubbling,
}

/// A native event delivered by a [`Document`](crate::Document).
///
/// Build one with [`DomEvent::new`] and the `with_*` methods, then hand it to
/// [`Document::dispatch_event`](crate::Document::dispatch_event). The dispatched event is returned
/// so its final flags can be inspected.
#[derive(Clone, Debug, PartialEq)]
pub struct DomEvent {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    position: Option<Point>,
    time_stamp: u64,
    pub(crate) target: Option<NodeId>,
    pub(crate) current_target: Option<NodeId>,
    pub(crate) phase: EventPhase,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    /// A non-bubbling, non-cancelable event of the given type.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            bubbles: false,
            cancelable: false,
            position: None,
            time_stamp: 0,
            target: None,
            current_target: None,
            phase: EventPhase::None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Set whether the event bubbles back up to the root.
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Set whether `prevent_default` has any effect.
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Attach a pointer position.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach a timestamp in milliseconds.
    pub fn with_time_stamp(mut self, time_stamp: u64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    /// Whether the event bubbles.
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Whether the event is cancelable.
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// The node the event was dispatched at.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// The node whose listeners are currently running.
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    /// Current delivery stage.
    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Whether the default action was prevented.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether propagation was stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl NativeEvent for DomEvent {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    fn position(&self) -> Option<Point> {
        self.position
    }

    fn time_stamp(&self) -> u64 {
        self.time_stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prevent_default_requires_cancelable() {
        let mut ev = DomEvent::new("click");
        ev.prevent_default();
        assert!(!ev.is_default_prevented());

        let mut ev = DomEvent::new("click").with_cancelable(true);
        ev.prevent_default();
        ev.prevent_default();
        assert!(ev.is_default_prevented());
    }

    #[test]
    fn builder_fields_are_exposed_through_native_view() {
        let ev = DomEvent::new("mousedown")
            .with_bubbles(true)
            .with_position(Point::new(3.0, 4.0))
            .with_time_stamp(42);
        let native: &dyn NativeEvent = &ev;
        assert_eq!(native.event_type(), "mousedown");
        assert_eq!(native.position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(native.time_stamp(), 42);
        assert!(ev.bubbles());
        assert_eq!(ev.phase(), EventPhase::None);
        assert_eq!(ev.target(), None);
    }
}
