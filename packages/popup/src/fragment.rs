//! A small typed markup tree.
//!
//! Formatting code builds [`Element`]s and text [`Node`]s; the tree is only
//! turned into an HTML string at the edge, by its [`Display`] impl. All text
//! and attribute values are escaped on output, so builders never need to
//! think about markup.
//!
//! [`Display`]: std::fmt::Display

use std::fmt;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "hr", "img", "input", "link", "meta"];

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// Literal text.
    Text(String),
}

impl Node {
    /// A text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The element, if this is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element(element) => element.children.iter().map(Self::text_content).collect(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(&escape(text, false)),
            Self::Element(element) => fmt::Display::fmt(element, f),
        }
    }
}

/// An element: tag name, ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// An empty element.
    #[must_use]
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Adds a `class` attribute.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Appends a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    /// The tag name.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// The value of the first attribute called `name`.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The child nodes.
    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {name}=\"{}\"", escape(value, true))?;
        }
        f.write_str(">")?;

        if VOID_ELEMENTS.contains(&self.tag) {
            return Ok(());
        }

        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

/// A sequence of sibling nodes with no wrapping element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(pub Vec<Node>);

impl Fragment {
    /// The top-level nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    /// Serializes the fragment to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.0 {
            fmt::Display::fmt(node, f)?;
        }
        Ok(())
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_elements() {
        let node = Node::from(
            Element::new("span")
                .class("road")
                .child(Element::new("b").text("SH 1")),
        );
        assert_eq!(node.to_string(), r#"<span class="road"><b>SH 1</b></span>"#);
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let img = Element::new("img").attr("src", "./icons/car.svg").text("ignored");
        assert_eq!(img.to_string(), r#"<img src="./icons/car.svg">"#);
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node = Node::from(
            Element::new("span")
                .attr("title", r#"Queen's "Birthday""#)
                .text("Fish & Chips <Ltd>"),
        );
        assert_eq!(
            node.to_string(),
            "<span title=\"Queen&#39;s &quot;Birthday&quot;\">Fish &amp; Chips &lt;Ltd&gt;</span>"
        );
    }

    #[test]
    fn text_content_flattens_children() {
        let node = Node::from(
            Element::new("p")
                .text("The ")
                .child(Element::new("b").text("second"))
                .text(" car"),
        );
        assert_eq!(node.text_content(), "The second car");
    }

    #[test]
    fn fragment_concatenates_siblings() {
        let fragment = Fragment(vec![Node::text("a"), Element::new("br").into(), Node::text("b")]);
        assert_eq!(fragment.to_html(), "a<br>b");
    }
}
