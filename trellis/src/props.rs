// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element properties: plain attributes and event handlers.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use trellis_host::ListenerError;

use crate::event::SyntheticEvent;
use crate::types::{EventType, HandlerKey};

/// Failure returned by a fallible [`Handler`].
pub type HandlerError = ListenerError;

type HandlerFn = dyn Fn(&mut SyntheticEvent<'_>) -> Result<(), HandlerError>;

/// A shared, callable event handler.
///
/// Cloning a handler is cheap and yields the same underlying callable.
#[derive(Clone)]
pub struct Handler(Rc<HandlerFn>);

impl core::fmt::Debug for Handler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Handler(..)")
    }
}

impl Handler {
    /// Wrap an infallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut SyntheticEvent<'_>) + 'static,
    {
        Self::fallible(move |event| {
            f(event);
            Ok(())
        })
    }

    /// Wrap a closure that may fail.
    ///
    /// An error aborts the remaining handlers of the current pass and is reported to the host.
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&mut SyntheticEvent<'_>) -> Result<(), HandlerError> + 'static,
    {
        Self(Rc::new(f))
    }

    /// Invoke the handler.
    pub fn call(&self, event: &mut SyntheticEvent<'_>) -> Result<(), HandlerError> {
        (self.0)(event)
    }

    /// Whether two handlers share the same callable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Properties of an element.
///
/// Plain attributes and handlers are kept apart: attributes are ordered string pairs handed to
/// the host at materialization; handlers are keyed by [`HandlerKey`] and only ever reached
/// through the delegation engine.
///
/// ```
/// use trellis::{EventType, Handler, HandlerKey, Props};
///
/// let props = Props::new()
///     .attr("id", "save")
///     .on_click(|_| {})
///     .handler_by_name("onClickCapture", Handler::new(|_| {}))
///     .handler_by_name("onclick", Handler::new(|_| {}));
///
/// assert_eq!(props.attr_value("id"), Some("save"));
/// assert!(props.handler(HandlerKey::bubble(EventType::Click)).is_some());
/// assert!(props.handler(HandlerKey::capture(EventType::Click)).is_some());
/// assert_eq!(props.handler_count(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Props {
    attrs: Vec<(String, String)>,
    handlers: HashMap<HandlerKey, Handler>,
}

impl core::fmt::Debug for Props {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Props")
            .field("attrs", &self.attrs)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Props {
    /// Empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain attribute, replacing an earlier value of the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
        self
    }

    /// Register `handler` under `key`, replacing an earlier handler for the same key.
    pub fn on(mut self, key: HandlerKey, handler: Handler) -> Self {
        self.handlers.insert(key, handler);
        self
    }

    /// Register a bubble-phase `click` handler (`onClick`).
    pub fn on_click(self, f: impl Fn(&mut SyntheticEvent<'_>) + 'static) -> Self {
        self.on(HandlerKey::bubble(EventType::Click), Handler::new(f))
    }

    /// Register a capture-phase `click` handler (`onClickCapture`).
    pub fn on_click_capture(self, f: impl Fn(&mut SyntheticEvent<'_>) + 'static) -> Self {
        self.on(HandlerKey::capture(EventType::Click), Handler::new(f))
    }

    /// Register `handler` under an element property name such as `onClick` or `onKeyupCapture`.
    ///
    /// Names that do not exactly match a supported key are ignored.
    pub fn handler_by_name(self, name: &str, handler: Handler) -> Self {
        match HandlerKey::from_prop_name(name) {
            Some(key) => self.on(key, handler),
            None => {
                log::debug!("ignoring handler under unrecognized property {name:?}");
                self
            }
        }
    }

    /// Handler registered under `key`.
    pub fn handler(&self, key: HandlerKey) -> Option<&Handler> {
        self.handlers.get(&key)
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Value of a plain attribute.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Plain attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ElementId, Phase};
    use alloc::vec;
    use core::cell::Cell;
    use trellis_host::DomEvent;

    #[test]
    fn attrs_keep_order_and_replace_in_place() {
        let props = Props::new()
            .attr("id", "a")
            .attr("class", "x")
            .attr("id", "b");
        let attrs: Vec<(&str, &str)> = props.attrs().collect();
        assert_eq!(attrs, vec![("id", "b"), ("class", "x")]);
    }

    #[test]
    fn later_handler_replaces_earlier_for_same_key() {
        let first = Handler::new(|_| {});
        let second = Handler::new(|_| {});
        let key = HandlerKey::bubble(EventType::Click);
        let props = Props::new().on(key, first.clone()).on(key, second.clone());
        assert_eq!(props.handler_count(), 1);
        assert!(props.handler(key).unwrap().ptr_eq(&second));
        assert!(!props.handler(key).unwrap().ptr_eq(&first));
    }

    #[test]
    fn unmatched_names_are_ignored() {
        let props = Props::new()
            .handler_by_name("onClickcapture", Handler::new(|_| {}))
            .handler_by_name("onScroll", Handler::new(|_| {}))
            .handler_by_name("click", Handler::new(|_| {}));
        assert_eq!(props.handler_count(), 0);
    }

    #[test]
    fn fallible_handler_reports_error() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let ok = Handler::new(move |_| seen.set(seen.get() + 1));
        let failing = Handler::fallible(|_| Err(HandlerError::new("nope")));

        let mut native = DomEvent::new("click");
        let mut event = SyntheticEvent::new(&mut native, EventType::Click, Phase::Bubble, ElementId(0));
        assert_eq!(ok.call(&mut event), Ok(()));
        assert_eq!(calls.get(), 1);
        assert_eq!(failing.call(&mut event), Err(HandlerError::new("nope")));
    }
}
