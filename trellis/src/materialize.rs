// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host node creation for a linked element tree.

use alloc::vec::Vec;

use trellis_host::Host;

use crate::tree::ElementTree;
use crate::types::ElementId;

/// Backing nodes produced for an [`ElementTree`], indexed by [`ElementId`].
#[derive(Debug)]
pub(crate) struct Materialized<N> {
    pub(crate) nodes: Vec<N>,
}

impl<N: Copy> Materialized<N> {
    pub(crate) fn root(&self) -> Option<N> {
        self.nodes.first().copied()
    }
}

/// Create one host node per element and assemble them into the same shape.
///
/// Ids are pre-order, so every parent's node exists by the time its children are visited and
/// children are appended in document order.
pub(crate) fn materialize<H: Host>(
    host: &mut H,
    tree: &ElementTree,
) -> Result<Materialized<H::Node>, H::Error> {
    let mut nodes: Vec<H::Node> = Vec::with_capacity(tree.len());
    for id in tree.ids() {
        let kind = tree.kind(id).unwrap_or_default();
        let node = host.create_node(kind)?;
        if let Some(props) = tree.props(id) {
            for (name, value) in props.attrs() {
                host.set_attribute(node, name, value)?;
            }
        }
        // Elements without child elements render as text, possibly empty.
        match tree.text(id) {
            Some(text) => host.set_text_content(node, text)?,
            None if tree.children_of(id).is_empty() => host.set_text_content(node, "")?,
            None => {}
        }
        if let Some(parent) = tree.parent_of(id).and_then(|p| node_at(&nodes, p)) {
            host.append_child(parent, node)?;
        }
        nodes.push(node);
    }
    Ok(Materialized { nodes })
}

fn node_at<N: Copy>(nodes: &[N], id: ElementId) -> Option<N> {
    nodes.get(id.index()).copied()
}
