// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Host: the backing display primitives a Trellis root renders into.
//!
//! ## Overview
//!
//! Trellis does not own a display tree. It consumes one through the [`Host`] trait, which exposes
//! exactly the primitives the renderer needs:
//!
//! - create a node of a given kind,
//! - set its text content (and, optionally, plain attributes),
//! - append a child node,
//! - add and remove event listeners with a capture flag.
//!
//! Native events are seen through the object-safe [`NativeEvent`] trait so that synthetic
//! wrappers can forward `preventDefault`/`stopPropagation` without knowing the host.
//!
//! ## In-memory document
//!
//! [`Document`] is a small in-memory implementation of [`Host`]. It keeps an arena of nodes with
//! parent links, a per-node listener store, and performs browser-style native delivery:
//! capture listeners from the root toward the target, capture then bubble listeners at the
//! target, and bubble listeners from the target back to the root.
//!
//! ```
//! use trellis_host::{Document, DomEvent, Host};
//!
//! let mut doc = Document::new();
//! let root = doc.create_node("div").unwrap();
//! let button = doc.create_node("button").unwrap();
//! doc.append_child(root, button).unwrap();
//!
//! let ev = doc.dispatch_event(button, DomEvent::new("click").with_bubbles(true)).unwrap();
//! assert_eq!(ev.target(), Some(button));
//! assert!(!ev.is_propagation_stopped());
//! ```
//!
//! Listener failures do not abort delivery. They are collected on the document's
//! uncaught-error channel, see [`Document::uncaught_errors`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod error;
mod host;
mod types;

pub use document::Document;
pub use error::{DocumentError, ListenerError};
pub use host::{Host, Listener, ListenerId, NativeEvent};
pub use types::{DomEvent, EventPhase, NodeId};
