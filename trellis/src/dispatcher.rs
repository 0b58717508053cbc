// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: rebuild a propagation path from parent links and run one pass over it.
//!
//! A delegated listener sees a native event only once it has reached the render root, so the
//! element-level propagation has to be reconstructed in software. The dispatcher does this in
//! two steps:
//!
//! - [`collect`] walks from the target up through [`ElementTree::parent_of`] and keeps every
//!   element that registered a handler for the requested [`HandlerKey`]. The result is in
//!   target-to-root order.
//! - [`run`] invokes a collected path for one pass. Capture passes iterate it in reverse
//!   (root to target), bubble passes as collected (target to root).
//!
//! ## Semantics
//!
//! - A pass stops right after the handler that calls
//!   [`SyntheticEvent::stop_propagation`]. Remaining handlers of that pass are skipped.
//! - A handler returning `Err` also ends the pass; the error is returned to the caller.
//! - [`run`] returns the element it stopped at, or `None` if the path was completed.
//! - Each pass should get its own [`SyntheticEvent`]; the dispatcher never resets its flags.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use trellis::dispatcher;
//! use trellis::{ElementTree, EventType, HandlerKey, Phase, Props, SyntheticEvent, create_element};
//! use trellis_host::DomEvent;
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let tap = |name: &'static str| {
//!     let log = log.clone();
//!     move |_: &mut SyntheticEvent<'_>| log.borrow_mut().push(name)
//! };
//!
//! let tree = ElementTree::link(create_element(
//!     "div",
//!     Props::new().on_click_capture(tap("outer")),
//!     create_element("button", Props::new().on_click_capture(tap("inner")), "go"),
//! ));
//! let button = tree.children_of(tree.root())[0];
//!
//! let key = HandlerKey::capture(EventType::Click);
//! let path = dispatcher::collect(&tree, button, key);
//! let mut native = DomEvent::new("click");
//! let mut event = SyntheticEvent::new(&mut native, EventType::Click, Phase::Capture, button);
//! let stopped = dispatcher::run(&path, &mut event).unwrap();
//!
//! assert_eq!(stopped, None);
//! assert_eq!(*log.borrow(), ["outer", "inner"]);
//! ```

use smallvec::SmallVec;

use crate::event::SyntheticEvent;
use crate::props::{Handler, HandlerError};
use crate::tree::ElementTree;
use crate::types::{ElementId, HandlerKey, Phase};

/// Handlers along a propagation path, in target-to-root order.
pub type Path = SmallVec<[(ElementId, Handler); 8]>;

/// Collect the handlers registered under `key` from `target` up to the root.
///
/// Elements without a handler for `key` are skipped. Handlers are cloned out of the tree so the
/// caller can release any borrow of it before running them.
pub fn collect(tree: &ElementTree, target: ElementId, key: HandlerKey) -> Path {
    tree.ancestors(target)
        .filter_map(|id| tree.handler(id, key).map(|h| (id, h.clone())))
        .collect()
}

/// Run one pass over `path`.
///
/// The order follows `event.phase()`: reversed for [`Phase::Capture`], as collected for
/// [`Phase::Bubble`]. Before each handler the event's current target is set to the element that
/// owns it.
///
/// Returns `Ok(Some(id))` when the handler on `id` stopped propagation, `Ok(None)` when every
/// handler ran, and `Err` as soon as a handler fails.
pub fn run(path: &Path, event: &mut SyntheticEvent<'_>) -> Result<Option<ElementId>, HandlerError> {
    match event.phase() {
        Phase::Capture => run_ordered(path.iter().rev(), event),
        Phase::Bubble => run_ordered(path.iter(), event),
    }
}

fn run_ordered<'p>(
    entries: impl Iterator<Item = &'p (ElementId, Handler)>,
    event: &mut SyntheticEvent<'_>,
) -> Result<Option<ElementId>, HandlerError> {
    for (id, handler) in entries {
        event.set_current_target(*id);
        log::trace!("{:?} {:?} handler on {id:?}", event.event_type(), event.phase());
        handler.call(event)?;
        if event.is_propagation_stopped() {
            return Ok(Some(*id));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::create_element;
    use crate::props::Props;
    use crate::types::EventType;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use trellis_host::DomEvent;

    type Log = Rc<RefCell<Vec<(ElementId, Phase)>>>;

    fn record(log: &Log) -> Handler {
        let log = log.clone();
        Handler::new(move |e| log.borrow_mut().push((e.current_target(), e.phase())))
    }

    fn stopper(log: &Log) -> Handler {
        let log = log.clone();
        Handler::new(move |e| {
            log.borrow_mut().push((e.current_target(), e.phase()));
            e.stop_propagation();
        })
    }

    // div(0) > section(1) > button(2)
    fn chain(outer: Props, middle: Props, inner: Props) -> ElementTree {
        ElementTree::link(create_element(
            "div",
            outer,
            create_element("section", middle, create_element("button", inner, "go")),
        ))
    }

    fn pass(tree: &ElementTree, target: ElementId, phase: Phase) -> Result<Option<ElementId>, HandlerError> {
        let key = HandlerKey::new(EventType::Click, phase);
        let path = collect(tree, target, key);
        let mut native = DomEvent::new("click");
        let mut event = SyntheticEvent::new(&mut native, EventType::Click, phase, target);
        run(&path, &mut event)
    }

    #[test]
    fn collect_skips_elements_without_handlers() {
        let log = Log::default();
        let capture = HandlerKey::capture(EventType::Click);
        let tree = chain(
            Props::new().on(capture, record(&log)),
            Props::new(),
            Props::new().on(capture, record(&log)),
        );
        let path = collect(&tree, ElementId(2), capture);
        let ids: Vec<ElementId> = path.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![ElementId(2), ElementId(0)]);
        assert!(collect(&tree, ElementId(2), HandlerKey::bubble(EventType::Click)).is_empty());
    }

    #[test]
    fn capture_runs_root_first_and_bubble_target_first() {
        let log = Log::default();
        let both = |l: &Log| {
            Props::new()
                .on(HandlerKey::capture(EventType::Click), record(l))
                .on(HandlerKey::bubble(EventType::Click), record(l))
        };
        let tree = chain(both(&log), both(&log), both(&log));

        assert_eq!(pass(&tree, ElementId(2), Phase::Capture), Ok(None));
        assert_eq!(pass(&tree, ElementId(2), Phase::Bubble), Ok(None));
        assert_eq!(
            *log.borrow(),
            vec![
                (ElementId(0), Phase::Capture),
                (ElementId(1), Phase::Capture),
                (ElementId(2), Phase::Capture),
                (ElementId(2), Phase::Bubble),
                (ElementId(1), Phase::Bubble),
                (ElementId(0), Phase::Bubble),
            ]
        );
    }

    #[test]
    fn stop_ends_the_pass_after_the_stopping_handler() {
        let log = Log::default();
        let bubble = HandlerKey::bubble(EventType::Click);
        let tree = chain(
            Props::new().on(bubble, record(&log)),
            Props::new().on(bubble, stopper(&log)),
            Props::new().on(bubble, record(&log)),
        );
        assert_eq!(pass(&tree, ElementId(2), Phase::Bubble), Ok(Some(ElementId(1))));
        assert_eq!(
            *log.borrow(),
            vec![(ElementId(2), Phase::Bubble), (ElementId(1), Phase::Bubble)]
        );
    }

    #[test]
    fn capture_stop_near_root_skips_the_rest_of_the_path() {
        let log = Log::default();
        let capture = HandlerKey::capture(EventType::Click);
        let tree = chain(
            Props::new().on(capture, stopper(&log)),
            Props::new().on(capture, record(&log)),
            Props::new().on(capture, record(&log)),
        );
        assert_eq!(pass(&tree, ElementId(2), Phase::Capture), Ok(Some(ElementId(0))));
        assert_eq!(*log.borrow(), vec![(ElementId(0), Phase::Capture)]);
    }

    #[test]
    fn handler_error_ends_the_pass() {
        let log = Log::default();
        let bubble = HandlerKey::bubble(EventType::Click);
        let tree = chain(
            Props::new().on(bubble, record(&log)),
            Props::new().on(bubble, Handler::fallible(|_| Err(HandlerError::new("boom")))),
            Props::new().on(bubble, record(&log)),
        );
        assert_eq!(
            pass(&tree, ElementId(2), Phase::Bubble),
            Err(HandlerError::new("boom"))
        );
        assert_eq!(*log.borrow(), vec![(ElementId(2), Phase::Bubble)]);
    }

    #[test]
    fn target_without_handlers_is_a_no_op() {
        let tree = chain(Props::new(), Props::new(), Props::new());
        assert_eq!(pass(&tree, ElementId(2), Phase::Capture), Ok(None));
        assert_eq!(pass(&tree, ElementId(2), Phase::Bubble), Ok(None));
    }
}
