// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis: delegated synthetic events for a small element tree.
//!
//! ## Overview
//!
//! Trellis builds a tree of lightweight element descriptors, materializes it into backing nodes
//! through a [`Host`](trellis_host::Host), and routes events without attaching a single listener
//! to those nodes. Instead, each [`Root`] installs one capture listener and one bubble listener
//! per configured event type on its container and rebuilds element-level propagation in software.
//!
//! - [`create_element`] builds [`Element`] descriptors from a kind, [`Props`] and [`Children`].
//! - [`ElementTree`] is the linked form: an arena of elements with parent links.
//! - [`SyntheticEvent`] is the per-pass wrapper handlers receive.
//! - [`dispatcher`] collects handlers along the parent chain and runs one pass.
//! - [`Root`] ties it together: it mounts a tree once and owns the delegated listeners.
//!
//! ## Propagation
//!
//! For a native event targeted at element `T`, the capture listener runs every
//! `on<Event>Capture` handler from the root down to `T`, and the bubble listener runs every
//! `on<Event>` handler from `T` back up to the root. Calling
//! [`SyntheticEvent::stop_propagation`] ends the current pass after the calling handler and is
//! forwarded to the native event, so a host that honors native propagation also skips the
//! delegated bubble pass when a capture handler stops.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use trellis::{Props, SyntheticEvent, create_element, create_root};
//! use trellis_host::{Document, Host};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let tap = |label: &'static str, stop: bool| {
//!     let log = log.clone();
//!     move |event: &mut SyntheticEvent<'_>| {
//!         log.borrow_mut().push(label);
//!         if stop {
//!             event.stop_propagation();
//!         }
//!     }
//! };
//!
//! let mut doc = Document::new();
//! let container = doc.create_node("div").unwrap();
//! let mut root = create_root(&mut doc, container).unwrap();
//! root.render(
//!     &mut doc,
//!     create_element(
//!         "div",
//!         Props::new()
//!             .on_click_capture(tap("parent capture", false))
//!             .on_click(tap("parent bubble", false)),
//!         [
//!             create_element(
//!                 "div",
//!                 Props::new()
//!                     .on_click_capture(tap("first capture", false))
//!                     .on_click(tap("first bubble", true)),
//!                 "111",
//!             ),
//!             create_element("div", Props::new(), "222"),
//!         ],
//!     ),
//! )
//! .unwrap();
//!
//! let tree = root.tree().unwrap();
//! let first = root.node_of(tree.children_of(tree.root())[0]).unwrap();
//! drop(tree);
//!
//! doc.click(first).unwrap();
//! assert_eq!(*log.borrow(), ["parent capture", "first capture", "first bubble"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `trellis_host/std`.
//! - `libm`: `no_std` floating point support for geometry in the host.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
mod element;
mod error;
mod event;
mod materialize;
mod props;
mod root;
mod tree;
mod types;

pub use element::{Children, Element, create_element};
pub use error::RenderError;
pub use event::SyntheticEvent;
pub use props::{Handler, HandlerError, Props};
pub use root::{Root, RootConfig, create_root};
pub use tree::ElementTree;
pub use types::{ElementId, EventType, EventTypes, HandlerKey, Phase};
