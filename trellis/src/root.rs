// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render roots and the delegated listeners they install.
//!
//! A [`Root`] owns one host container. Creating it installs one capture listener and one bubble
//! listener per configured [`EventType`] on that container and nowhere else. Rendering links and
//! materializes an element tree, then publishes it to the state those listeners share. Every
//! native event that reaches the container is mapped back to the element it originated from and
//! replayed over the element tree by the [`dispatcher`](crate::dispatcher).
//!
//! The shared state is reference counted. Each installed listener keeps it alive, and
//! [`Root::unmount`] removes the listeners and marks it unmounted so any listener a host still
//! holds does nothing.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};

use hashbrown::HashMap;
use trellis_host::{Host, Listener, ListenerError, ListenerId};

use crate::dispatcher;
use crate::element::Element;
use crate::error::RenderError;
use crate::event::SyntheticEvent;
use crate::materialize::materialize;
use crate::tree::ElementTree;
use crate::types::{ElementId, EventType, EventTypes, HandlerKey, Phase};

/// Options fixed when a root is created.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RootConfig {
    events: EventTypes,
}

impl RootConfig {
    /// The default configuration: delegate `click` only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delegate exactly `events`.
    pub fn with_events(mut self, events: EventTypes) -> Self {
        self.events = events;
        self
    }

    /// Event types this root delegates.
    pub fn events(&self) -> EventTypes {
        self.events
    }
}

struct DispatchState<N> {
    tree: Option<ElementTree>,
    sources: HashMap<N, ElementId>,
    nodes: Vec<N>,
    unmounted: bool,
}

impl<N> Default for DispatchState<N> {
    fn default() -> Self {
        Self {
            tree: None,
            sources: HashMap::new(),
            nodes: Vec::new(),
            unmounted: false,
        }
    }
}

/// A render root bound to one host container.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use trellis::{Props, create_element, create_root};
/// use trellis_host::{Document, Host};
///
/// let mut doc = Document::new();
/// let container = doc.create_node("main").unwrap();
/// let mut root = create_root(&mut doc, container).unwrap();
///
/// let clicks = Rc::new(RefCell::new(0));
/// let seen = clicks.clone();
/// root.render(
///     &mut doc,
///     create_element("button", Props::new().on_click(move |_| *seen.borrow_mut() += 1), "Save"),
/// )
/// .unwrap();
///
/// let button = root.node_of(root.tree().unwrap().root()).unwrap();
/// doc.click(button).unwrap();
/// assert_eq!(*clicks.borrow(), 1);
///
/// assert_eq!(root.unmount(&mut doc), 2);
/// doc.click(button).unwrap();
/// assert_eq!(*clicks.borrow(), 1);
/// ```
pub struct Root<H: Host> {
    container: H::Node,
    config: RootConfig,
    state: Rc<RefCell<DispatchState<H::Node>>>,
    listeners: Vec<ListenerId>,
}

impl<H: Host> core::fmt::Debug for Root<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Root")
            .field("container", &self.container)
            .field("config", &self.config)
            .field("listeners", &self.listeners)
            .field("rendered", &state.tree.is_some())
            .field("unmounted", &state.unmounted)
            .finish_non_exhaustive()
    }
}

/// Create a root on `container` that delegates `click`.
///
/// Shorthand for [`Root::with_config`] with [`RootConfig::default`].
pub fn create_root<H: Host + 'static>(
    host: &mut H,
    container: H::Node,
) -> Result<Root<H>, H::Error> {
    Root::with_config(host, container, RootConfig::default())
}

impl<H: Host + 'static> Root<H> {
    /// Create a root on `container` and install its delegated listeners.
    ///
    /// If the host rejects a listener, the ones already installed are removed again before the
    /// error is returned.
    pub fn with_config(
        host: &mut H,
        container: H::Node,
        config: RootConfig,
    ) -> Result<Self, H::Error> {
        let state = Rc::new(RefCell::new(DispatchState::default()));
        let mut listeners = Vec::new();
        for event_type in config.events().types() {
            for phase in [Phase::Capture, Phase::Bubble] {
                let listener = delegated_listener::<H>(state.clone(), event_type, phase);
                let installed = host.add_event_listener(
                    container,
                    event_type.native_name(),
                    phase == Phase::Capture,
                    listener,
                );
                match installed {
                    Ok(id) => listeners.push(id),
                    Err(err) => {
                        for id in listeners {
                            host.remove_event_listener(container, id);
                        }
                        return Err(err);
                    }
                }
            }
        }
        log::debug!(
            "root on {container:?}: {} delegated listeners for {:?}",
            listeners.len(),
            config.events()
        );
        Ok(Self {
            container,
            config,
            state,
            listeners,
        })
    }

    /// Mount `element` into the container.
    ///
    /// The tree is linked, every backing node is created and attached, and only then does the
    /// tree become visible to the delegated listeners. Host failures are returned unchanged in
    /// [`RenderError::Host`]; a root mounts at most once.
    pub fn render(&mut self, host: &mut H, element: Element) -> Result<(), RenderError<H::Error>> {
        if self.state.borrow().tree.is_some() {
            return Err(RenderError::AlreadyRendered);
        }
        let tree = ElementTree::link(element);
        let materialized = materialize(host, &tree).map_err(RenderError::Host)?;
        if let Some(node) = materialized.root() {
            host.append_child(self.container, node)
                .map_err(RenderError::Host)?;
        }
        let nodes = materialized.nodes;
        let sources = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (*node, ElementId::at(idx)))
            .collect();

        log::debug!("rendered {} elements into {:?}", tree.len(), self.container);
        let mut state = self.state.borrow_mut();
        state.tree = Some(tree);
        state.sources = sources;
        state.nodes = nodes;
        Ok(())
    }

    /// Remove every listener this root installed and stop dispatching.
    ///
    /// Returns how many listeners the host actually removed. Rendered nodes stay in the host.
    pub fn unmount(self, host: &mut H) -> usize {
        let removed = self
            .listeners
            .iter()
            .filter(|id| host.remove_event_listener(self.container, **id))
            .count();
        self.state.borrow_mut().unmounted = true;
        log::debug!("unmounted root on {:?}: removed {removed} listeners", self.container);
        removed
    }
}

impl<H: Host> Root<H> {
    /// The container node.
    pub fn container(&self) -> H::Node {
        self.container
    }

    /// Configuration the root was created with.
    pub fn config(&self) -> RootConfig {
        self.config
    }

    /// Whether a tree has been mounted.
    pub fn is_rendered(&self) -> bool {
        self.state.borrow().tree.is_some()
    }

    /// The mounted element tree.
    pub fn tree(&self) -> Option<Ref<'_, ElementTree>> {
        Ref::filter_map(self.state.borrow(), |s| s.tree.as_ref()).ok()
    }

    /// Backing node of `id`.
    pub fn node_of(&self, id: ElementId) -> Option<H::Node> {
        self.state.borrow().nodes.get(id.index()).copied()
    }

    /// Element that `node` was materialized from, if it belongs to this root.
    pub fn element_of(&self, node: H::Node) -> Option<ElementId> {
        self.state.borrow().sources.get(&node).copied()
    }

    /// Listener handles installed on the container.
    pub fn listener_ids(&self) -> &[ListenerId] {
        &self.listeners
    }
}

fn delegated_listener<H: Host + 'static>(
    state: Rc<RefCell<DispatchState<H::Node>>>,
    event_type: EventType,
    phase: Phase,
) -> Listener<H::Event> {
    let key = HandlerKey::new(event_type, phase);
    Rc::new(move |native: &mut H::Event| -> Result<(), ListenerError> {
        // The borrow ends before any handler runs.
        let (target, path) = {
            let state = state.borrow();
            if state.unmounted {
                return Ok(());
            }
            let Some(tree) = state.tree.as_ref() else {
                return Ok(());
            };
            let Some(target) = H::event_target(native).and_then(|n| state.sources.get(&n).copied())
            else {
                log::trace!("{event_type:?} {phase:?}: target outside this root");
                return Ok(());
            };
            (target, dispatcher::collect(tree, target, key))
        };
        if path.is_empty() {
            return Ok(());
        }
        let mut event = SyntheticEvent::new(native, event_type, phase, target);
        match dispatcher::run(&path, &mut event)? {
            Some(at) => log::trace!("{event_type:?} {phase:?} stopped at {at:?}"),
            None => log::trace!("{event_type:?} {phase:?} ran {} handlers", path.len()),
        }
        Ok(())
    })
}
