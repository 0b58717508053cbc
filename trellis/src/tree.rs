// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The linked element tree: an arena of descriptors with parent links.

use alloc::string::String;
use alloc::vec::Vec;

use crate::element::{Children, Element};
use crate::props::{Handler, Props};
use crate::types::{ElementId, HandlerKey};

#[derive(Clone, Debug)]
enum Content {
    Text(String),
    Children(Vec<ElementId>),
}

#[derive(Clone, Debug)]
struct Entry {
    kind: String,
    props: Props,
    content: Content,
    parent: Option<ElementId>,
}

/// An element descriptor tree after linking.
///
/// Every element becomes one entry addressed by [`ElementId`], in depth-first pre-order. Each
/// entry knows its parent, which is what the delegation engine walks to rebuild a propagation
/// path. The tree is immutable once linked.
///
/// ```
/// use trellis::{ElementTree, Props, create_element};
///
/// let tree = ElementTree::link(create_element(
///     "div",
///     Props::new(),
///     [
///         create_element("p", Props::new(), "a"),
///         create_element("p", Props::new(), "b"),
///     ],
/// ));
/// let root = tree.root();
/// let kids = tree.children_of(root);
/// assert_eq!(kids.len(), 2);
/// assert_eq!(tree.parent_of(kids[1]), Some(root));
/// assert_eq!(tree.text(kids[1]), Some("b"));
/// assert_eq!(tree.parent_of(root), None);
/// ```
#[derive(Clone)]
pub struct ElementTree {
    entries: Vec<Entry>,
}

impl core::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementTree")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl ElementTree {
    /// Link a descriptor tree, assigning every element its parent.
    pub fn link(root: Element) -> Self {
        let mut entries: Vec<Entry> = Vec::new();
        let mut stack: Vec<(Element, Option<ElementId>)> = alloc::vec![(root, None)];
        while let Some((element, parent)) = stack.pop() {
            let id = ElementId::at(entries.len());
            if let Some(p) = parent
                && let Content::Children(kids) = &mut entries[p.index()].content
            {
                kids.push(id);
            }
            let (kind, props, children) = element.into_parts();
            let content = match children {
                Children::Empty => Content::Children(Vec::new()),
                Children::Text(text) => Content::Text(text),
                Children::Nodes(nodes) => {
                    // Reversed so the first child is linked next.
                    stack.extend(nodes.into_iter().rev().map(|n| (n, Some(id))));
                    Content::Children(Vec::new())
                }
            };
            entries.push(Entry {
                kind,
                props,
                content,
                parent,
            });
        }
        Self { entries }
    }

    /// The render root.
    pub fn root(&self) -> ElementId {
        ElementId::at(0)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a linked tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` belongs to this tree.
    pub fn contains(&self, id: ElementId) -> bool {
        id.index() < self.entries.len()
    }

    /// All element ids in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.entries.len()).map(ElementId::at)
    }

    /// Parent of `id`, or `None` for the root and unknown ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.entries.get(id.index()).and_then(|e| e.parent)
    }

    /// Children of `id` in order. Empty for text elements and unknown ids.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        match self.entries.get(id.index()).map(|e| &e.content) {
            Some(Content::Children(kids)) => kids,
            _ => &[],
        }
    }

    /// Kind of `id`.
    pub fn kind(&self, id: ElementId) -> Option<&str> {
        self.entries.get(id.index()).map(|e| e.kind.as_str())
    }

    /// Text payload of `id`, if it is a text element.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        match self.entries.get(id.index()).map(|e| &e.content) {
            Some(Content::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Props of `id`.
    pub fn props(&self, id: ElementId) -> Option<&Props> {
        self.entries.get(id.index()).map(|e| &e.props)
    }

    /// Handler registered on `id` under `key`.
    pub fn handler(&self, id: ElementId, key: HandlerKey) -> Option<&Handler> {
        self.props(id).and_then(|p| p.handler(key))
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let start = self.contains(id).then_some(id);
        core::iter::successors(start, move |&cur| self.parent_of(cur))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::create_element;
    use alloc::vec;

    fn sample() -> ElementTree {
        // div
        //   section
        //     p "one"
        //     p "two"
        //   span
        ElementTree::link(create_element(
            "div",
            Props::new(),
            vec![
                create_element(
                    "section",
                    Props::new(),
                    [
                        create_element("p", Props::new(), "one"),
                        create_element("p", Props::new(), "two"),
                    ],
                ),
                create_element("span", Props::new(), ()),
            ],
        ))
    }

    #[test]
    fn ids_are_pre_order() {
        let tree = sample();
        let kinds: Vec<&str> = tree.ids().map(|id| tree.kind(id).unwrap()).collect();
        assert_eq!(kinds, vec!["div", "section", "p", "p", "span"]);
        assert_eq!(tree.len(), 5);
        assert!(!tree.is_empty());
    }

    #[test]
    fn every_non_root_has_its_enclosing_parent() {
        let tree = sample();
        assert_eq!(tree.parent_of(tree.root()), None);
        for id in tree.ids() {
            for &child in tree.children_of(id) {
                assert_eq!(tree.parent_of(child), Some(id));
                assert!(child > id);
            }
        }
        assert_eq!(
            tree.children_of(ElementId(0)),
            &[ElementId(1), ElementId(4)]
        );
        assert_eq!(tree.children_of(ElementId(1)), &[ElementId(2), ElementId(3)]);
    }

    #[test]
    fn text_elements_have_no_children() {
        let tree = sample();
        assert_eq!(tree.text(ElementId(3)), Some("two"));
        assert!(tree.children_of(ElementId(3)).is_empty());
        assert_eq!(tree.text(ElementId(4)), None);
        assert!(tree.children_of(ElementId(4)).is_empty());
    }

    #[test]
    fn ancestors_walk_to_root() {
        let tree = sample();
        let path: Vec<ElementId> = tree.ancestors(ElementId(3)).collect();
        assert_eq!(path, vec![ElementId(3), ElementId(1), ElementId(0)]);
        assert_eq!(tree.ancestors(ElementId(99)).count(), 0);
    }

    #[test]
    fn handlers_are_reachable_by_key() {
        let tree = ElementTree::link(create_element(
            "div",
            Props::new(),
            create_element("button", Props::new().on_click(|_| {}), "go"),
        ));
        let button = tree.children_of(tree.root())[0];
        assert!(tree.handler(button, HandlerKey::bubble(crate::EventType::Click)).is_some());
        assert!(tree.handler(button, HandlerKey::capture(crate::EventType::Click)).is_none());
        assert!(tree.handler(tree.root(), HandlerKey::bubble(crate::EventType::Click)).is_none());
    }
}
