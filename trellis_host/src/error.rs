// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the host layer.

use alloc::string::String;

use crate::types::NodeId;

/// Failures reported by [`Document`](crate::Document) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// The node kind cannot be created (empty, or not a valid tag name).
    #[error("invalid node kind {0:?}")]
    InvalidKind(String),
    /// The identifier does not belong to this document.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// Appending would make a node its own ancestor.
    #[error("cannot append {child:?} under {parent:?}: would create a cycle")]
    HierarchyRequest {
        /// The requested parent.
        parent: NodeId,
        /// The node that was to be appended.
        child: NodeId,
    },
}

/// A failure raised by an event listener.
///
/// Hosts report these on their uncaught-error channel instead of aborting native delivery.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Create an error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
