// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for rendering.

/// Failures from [`Root::render`](crate::Root::render).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError<E> {
    /// The host rejected a primitive operation.
    #[error(transparent)]
    Host(E),
    /// The root has already mounted a tree; roots are one-shot.
    #[error("root already holds a rendered tree")]
    AlreadyRendered,
}
