// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element descriptors.

use alloc::string::String;
use alloc::vec::Vec;

use crate::props::Props;

/// A lightweight description of one node to render.
///
/// Descriptors are inert values: building one validates nothing and touches no host.
#[derive(Clone, Debug)]
pub struct Element {
    kind: String,
    props: Props,
    children: Children,
}

impl Element {
    /// Tag or node type name.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Attributes and handlers.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Child content.
    pub fn children(&self) -> &Children {
        &self.children
    }

    pub(crate) fn into_parts(self) -> (String, Props, Children) {
        (self.kind, self.props, self.children)
    }
}

/// Content of an [`Element`]: nothing, one text payload, or an ordered sequence of elements.
#[derive(Clone, Debug, Default)]
pub enum Children {
    /// No content.
    #[default]
    Empty,
    /// A text payload.
    Text(String),
    /// Child elements in order.
    Nodes(Vec<Element>),
}

impl From<()> for Children {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Element> for Children {
    fn from(child: Element) -> Self {
        Self::Nodes(alloc::vec![child])
    }
}

impl From<Vec<Element>> for Children {
    fn from(children: Vec<Element>) -> Self {
        if children.is_empty() {
            Self::Empty
        } else {
            Self::Nodes(children)
        }
    }
}

impl<const N: usize> From<[Element; N]> for Children {
    fn from(children: [Element; N]) -> Self {
        Vec::from(children).into()
    }
}

/// Build an element descriptor.
///
/// ```
/// use trellis::{Children, Props, create_element};
///
/// let list = create_element(
///     "ul",
///     Props::new().attr("class", "menu"),
///     [
///         create_element("li", Props::new(), "first"),
///         create_element("li", Props::new(), "second"),
///     ],
/// );
/// assert_eq!(list.kind(), "ul");
/// assert!(matches!(list.children(), Children::Nodes(items) if items.len() == 2));
/// ```
pub fn create_element(
    kind: impl Into<String>,
    props: Props,
    children: impl Into<Children>,
) -> Element {
    Element {
        kind: kind.into(),
        props,
        children: children.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn children_conversions() {
        assert!(matches!(Children::from(()), Children::Empty));
        assert!(matches!(Children::from("hi"), Children::Text(t) if t == "hi"));
        assert!(matches!(Children::from(String::from("x")), Children::Text(t) if t == "x"));
        assert!(matches!(Children::from(Vec::<Element>::new()), Children::Empty));

        let one = create_element("span", Props::new(), ());
        assert!(matches!(Children::from(one), Children::Nodes(v) if v.len() == 1));

        let many = vec![
            create_element("a", Props::new(), ()),
            create_element("b", Props::new(), ()),
        ];
        match Children::from(many) {
            Children::Nodes(v) => {
                assert_eq!(v[0].kind(), "a");
                assert_eq!(v[1].kind(), "b");
            }
            other => panic!("expected nodes, got {other:?}"),
        }
    }

    #[test]
    fn create_element_keeps_props_untouched() {
        let el = create_element("button", Props::new().attr("id", "go").on_click(|_| {}), "Go");
        assert_eq!(el.props().attr_value("id"), Some("go"));
        assert_eq!(el.props().handler_count(), 1);
        assert!(matches!(el.children(), Children::Text(t) if t == "Go"));
    }
}
