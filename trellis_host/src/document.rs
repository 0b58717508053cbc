// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document: node arena, listener store, and native event delivery.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::error::{DocumentError, ListenerError};
use crate::host::{Host, Listener, ListenerId, NativeEvent};
use crate::types::{DomEvent, EventPhase, NodeId};

/// An in-memory display tree that implements [`Host`].
///
/// Nodes live in an arena addressed by [`NodeId`] and keep parent and child links. Each node
/// carries a listener store keyed by event type, where every listener is registered either for
/// the capture phase or for the bubble phase.
///
/// Native delivery follows the browser model:
///
/// 1. capture listeners on each ancestor, root → target;
/// 2. capture listeners, then bubble listeners, on the target;
/// 3. bubble listeners on each ancestor, target → root, if the event bubbles.
///
/// Once a listener stops propagation, the remaining listeners on the same node still run and
/// delivery ends after that node.
///
/// ## Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use trellis_host::{Document, DomEvent, Host, Listener};
///
/// let mut doc = Document::new();
/// let outer = doc.create_node("div").unwrap();
/// let inner = doc.create_node("span").unwrap();
/// doc.append_child(outer, inner).unwrap();
///
/// let hits = Rc::new(Cell::new(0));
/// let seen = hits.clone();
/// let listener: Listener<DomEvent> = Rc::new(move |_: &mut DomEvent| {
///     seen.set(seen.get() + 1);
///     Ok(())
/// });
/// doc.add_event_listener(outer, "click", false, listener).unwrap();
///
/// doc.click(inner).unwrap();
/// assert_eq!(hits.get(), 1);
/// ```
#[derive(Default)]
pub struct Document {
    nodes: Vec<DomNode>,
    next_listener: u64,
    uncaught: Vec<ListenerError>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let roots = self.nodes.iter().filter(|n| n.parent.is_none()).count();
        f.debug_struct("Document")
            .field("nodes_total", &self.nodes.len())
            .field("roots", &roots)
            .field("uncaught", &self.uncaught.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct DomNode {
    kind: String,
    text: String,
    attributes: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    bounds: Option<Rect>,
    listeners: HashMap<String, Vec<Registered>>,
}

impl DomNode {
    fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            text: String::new(),
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
            bounds: None,
            listeners: HashMap::new(),
        }
    }
}

#[derive(Clone)]
struct Registered {
    id: ListenerId,
    capture: bool,
    listener: Listener<DomEvent>,
}

impl core::fmt::Debug for Registered {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registered")
            .field("id", &self.id)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been created yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The kind a node was created with.
    pub fn kind(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.idx()).map(|n| n.kind.as_str())
    }

    /// Concatenated text of `id` and its descendants, in tree order.
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        self.nodes.get(id.idx())?;
        let mut out = String::new();
        let mut stack = Vec::from([id]);
        while let Some(cur) = stack.pop() {
            let node = &self.nodes[cur.idx()];
            out.push_str(&node.text);
            stack.extend(node.children.iter().rev().copied());
        }
        Some(out)
    }

    /// Value of a plain attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(id.idx())?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the parent of a node, or `None` for detached nodes and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.idx()).and_then(|n| n.parent)
    }

    /// Get the children of a node, or an empty slice for unknown ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.idx())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of listeners registered on `id`, across all event types and phases.
    pub fn listener_count(&self, id: NodeId) -> usize {
        self.nodes
            .get(id.idx())
            .map(|n| n.listeners.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Set world-space bounds used by [`Document::hit_test_point`].
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> Result<(), DocumentError> {
        self.node_mut(id)?.bounds = Some(bounds);
        Ok(())
    }

    /// World-space bounds of a node, if any were set.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id.idx()).and_then(|n| n.bounds)
    }

    /// Listener failures reported during dispatch, oldest first.
    pub fn uncaught_errors(&self) -> &[ListenerError] {
        &self.uncaught
    }

    /// Drain the uncaught-error channel.
    pub fn take_uncaught_errors(&mut self) -> Vec<ListenerError> {
        core::mem::take(&mut self.uncaught)
    }

    /// Deliver `event` to `target` and its ancestors, and return it with its final flags.
    ///
    /// The event's target, current target and phase are managed by the document; after
    /// dispatch the phase is back to [`EventPhase::None`].
    pub fn dispatch_event(
        &mut self,
        target: NodeId,
        mut event: DomEvent,
    ) -> Result<DomEvent, DocumentError> {
        self.node(target)?;

        let mut path: SmallVec<[NodeId; 16]> = SmallVec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.nodes[node.idx()].parent;
        }
        path.reverse();
        let ancestors = &path[..path.len() - 1];

        event.target = Some(target);
        'deliver: {
            event.phase = EventPhase::Capturing;
            for &node in ancestors {
                self.invoke(node, &mut event, true);
                if event.is_propagation_stopped() {
                    break 'deliver;
                }
            }

            event.phase = EventPhase::AtTarget;
            self.invoke(target, &mut event, true);
            if event.is_propagation_stopped() {
                break 'deliver;
            }
            self.invoke(target, &mut event, false);
            if event.is_propagation_stopped() || !event.bubbles() {
                break 'deliver;
            }

            event.phase = EventPhase::Bubbling;
            for &node in ancestors.iter().rev() {
                self.invoke(node, &mut event, false);
                if event.is_propagation_stopped() {
                    break 'deliver;
                }
            }
        }
        log::trace!(
            "dispatched {:?} at {target:?}, stopped={}, prevented={}",
            event.event_type(),
            event.is_propagation_stopped(),
            event.is_default_prevented()
        );
        event.phase = EventPhase::None;
        event.current_target = None;
        Ok(event)
    }

    /// Dispatch a bubbling, cancelable `click` at `target`.
    pub fn click(&mut self, target: NodeId) -> Result<DomEvent, DocumentError> {
        self.dispatch_event(
            target,
            DomEvent::new("click")
                .with_bubbles(true)
                .with_cancelable(true),
        )
    }

    /// Hit test a world-space point against node bounds.
    ///
    /// Nodes are considered in paint order (tree pre-order, roots in creation order) and the
    /// last node whose bounds contain `point` wins, so descendants beat their ancestors and later
    /// siblings beat earlier ones. Nodes without bounds are skipped but their children are not.
    pub fn hit_test_point(&self, point: Point) -> Option<NodeId> {
        let mut best = None;
        let mut stack: Vec<NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| node_id_at(i))
            .collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.idx()];
            if node.bounds.is_some_and(|b| b.contains(point)) {
                best = Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        best
    }

    /// Hit test `point` and dispatch a `click` carrying that position at the winning node.
    ///
    /// Returns `Ok(None)` when nothing is under the point.
    pub fn click_at(&mut self, point: Point) -> Result<Option<DomEvent>, DocumentError> {
        let Some(target) = self.hit_test_point(point) else {
            return Ok(None);
        };
        let event = DomEvent::new("click")
            .with_bubbles(true)
            .with_cancelable(true)
            .with_position(point);
        self.dispatch_event(target, event).map(Some)
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> Result<&DomNode, DocumentError> {
        self.nodes
            .get(id.idx())
            .ok_or(DocumentError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut DomNode, DocumentError> {
        self.nodes
            .get_mut(id.idx())
            .ok_or(DocumentError::UnknownNode(id))
    }

    /// Returns true if `ancestor` is `node` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(cur) = cursor {
            if cur == ancestor {
                return true;
            }
            cursor = self.nodes[cur.idx()].parent;
        }
        false
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.idx()].parent.take() {
            self.nodes[parent.idx()].children.retain(|c| *c != id);
        }
    }

    fn invoke(&mut self, node: NodeId, event: &mut DomEvent, capture: bool) {
        // Clone out first: a listener may register or remove listeners through shared state.
        let listeners: SmallVec<[Listener<DomEvent>; 4]> = self.nodes[node.idx()]
            .listeners
            .get(event.event_type())
            .map(|list| {
                list.iter()
                    .filter(|r| r.capture == capture)
                    .map(|r| r.listener.clone())
                    .collect()
            })
            .unwrap_or_default();
        event.current_target = Some(node);
        for listener in listeners {
            if let Err(err) = listener(event) {
                log::debug!("uncaught listener error at {node:?}: {err}");
                self.uncaught.push(err);
            }
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "NodeId uses 32-bit indices by design."
)]
fn node_id_at(idx: usize) -> NodeId {
    NodeId::new(idx as u32)
}

fn is_valid_kind(kind: &str) -> bool {
    let mut chars = kind.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl Host for Document {
    type Node = NodeId;
    type Event = DomEvent;
    type Error = DocumentError;

    fn create_node(&mut self, kind: &str) -> Result<NodeId, DocumentError> {
        if !is_valid_kind(kind) {
            return Err(DocumentError::InvalidKind(kind.to_string()));
        }
        let id = node_id_at(self.nodes.len());
        self.nodes.push(DomNode::new(kind));
        Ok(id)
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), DocumentError> {
        let children = core::mem::take(&mut self.node_mut(node)?.children);
        for child in children {
            self.nodes[child.idx()].parent = None;
        }
        self.nodes[node.idx()].text = text.to_string();
        Ok(())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DocumentError> {
        let attributes = &mut self.node_mut(node)?.attributes;
        if let Some(slot) = attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_string();
        } else {
            attributes.push((name.to_string(), value.to_string()));
        }
        Ok(())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DocumentError::HierarchyRequest { parent, child });
        }
        self.detach(child);
        self.nodes[child.idx()].parent = Some(parent);
        self.nodes[parent.idx()].children.push(child);
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        capture: bool,
        listener: Listener<DomEvent>,
    ) -> Result<ListenerId, DocumentError> {
        let id = ListenerId::new(self.next_listener);
        self.node_mut(node)?
            .listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Registered {
                id,
                capture,
                listener,
            });
        self.next_listener += 1;
        Ok(id)
    }

    fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Ok(node) = self.node_mut(node) else {
            return false;
        };
        let mut removed = false;
        for list in node.listeners.values_mut() {
            if let Some(pos) = list.iter().position(|r| r.id == id) {
                list.remove(pos);
                removed = true;
                break;
            }
        }
        node.listeners.retain(|_, list| !list.is_empty());
        removed
    }

    fn event_target(event: &DomEvent) -> Option<NodeId> {
        event.target()
    }
}
