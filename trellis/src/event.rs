// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The synthetic event handed to element handlers.

use kurbo::Point;
use trellis_host::NativeEvent;

use crate::types::{ElementId, EventType, Phase};

/// A per-pass wrapper around one native event.
///
/// Each delegated pass (capture or bubble) creates its own `SyntheticEvent`, so stopping
/// propagation in one pass is never observed as already-stopped by the other. The cancelation
/// flags live on the wrapper and are mirrored onto the native event.
///
/// ```
/// use trellis::{ElementId, EventType, Phase, SyntheticEvent};
/// use trellis_host::{DomEvent, NativeEvent};
///
/// # fn target() -> ElementId { trellis::ElementTree::link(trellis::create_element("p", trellis::Props::new(), ())).root() }
/// let mut native = DomEvent::new("click").with_cancelable(true);
/// let mut event = SyntheticEvent::new(&mut native, EventType::Click, Phase::Bubble, target());
/// event.prevent_default();
/// event.stop_propagation();
/// assert!(event.is_default_prevented() && event.is_propagation_stopped());
/// assert!(native.default_prevented() && native.propagation_stopped());
/// ```
pub struct SyntheticEvent<'a> {
    native: &'a mut dyn NativeEvent,
    event_type: EventType,
    phase: Phase,
    target: ElementId,
    current_target: ElementId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl core::fmt::Debug for SyntheticEvent<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SyntheticEvent")
            .field("event_type", &self.event_type)
            .field("phase", &self.phase)
            .field("target", &self.target)
            .field("current_target", &self.current_target)
            .field("default_prevented", &self.default_prevented)
            .field("propagation_stopped", &self.propagation_stopped)
            .finish_non_exhaustive()
    }
}

impl<'a> SyntheticEvent<'a> {
    /// Wrap `native` for one pass targeted at `target`. Both flags start cleared.
    pub fn new(
        native: &'a mut dyn NativeEvent,
        event_type: EventType,
        phase: Phase,
        target: ElementId,
    ) -> Self {
        Self {
            native,
            event_type,
            phase,
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Mark the default action as prevented and forward to the native event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
        self.native.prevent_default();
    }

    /// Stop the current pass after this handler and forward to the native event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
        self.native.stop_propagation();
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called during this pass.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether [`stop_propagation`](Self::stop_propagation) was called during this pass.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// The event type being dispatched.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// The pass this event belongs to.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The element the native event originated from.
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// The element whose handler is running.
    pub fn current_target(&self) -> ElementId {
        self.current_target
    }

    /// Pointer position carried by the native event, if any.
    pub fn position(&self) -> Option<Point> {
        self.native.position()
    }

    /// Read access to the wrapped native event.
    pub fn native(&self) -> &dyn NativeEvent {
        &*self.native
    }

    pub(crate) fn set_current_target(&mut self, id: ElementId) {
        self.current_target = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_host::DomEvent;

    #[test]
    fn flags_start_cleared_and_current_target_is_target() {
        let mut native = DomEvent::new("click");
        let event = SyntheticEvent::new(&mut native, EventType::Click, Phase::Capture, ElementId(3));
        assert!(!event.is_default_prevented());
        assert!(!event.is_propagation_stopped());
        assert_eq!(event.current_target(), ElementId(3));
        assert_eq!(event.phase(), Phase::Capture);
        assert_eq!(event.native().event_type(), "click");
    }

    #[test]
    fn repeated_calls_match_a_single_call() {
        let mut once = DomEvent::new("click").with_cancelable(true);
        {
            let mut event =
                SyntheticEvent::new(&mut once, EventType::Click, Phase::Bubble, ElementId(0));
            event.prevent_default();
            event.stop_propagation();
        }

        let mut many = DomEvent::new("click").with_cancelable(true);
        let (prevented, stopped) = {
            let mut event =
                SyntheticEvent::new(&mut many, EventType::Click, Phase::Bubble, ElementId(0));
            for _ in 0..3 {
                event.prevent_default();
                event.stop_propagation();
            }
            (event.is_default_prevented(), event.is_propagation_stopped())
        };

        assert!(prevented && stopped);
        assert_eq!(once, many);
    }

    #[test]
    fn position_comes_from_native() {
        let mut native = DomEvent::new("click").with_position(Point::new(1.0, 2.0));
        let event = SyntheticEvent::new(&mut native, EventType::Click, Phase::Bubble, ElementId(0));
        assert_eq!(event.position(), Some(Point::new(1.0, 2.0)));
    }
}
