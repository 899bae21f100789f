//! Mutable document tree.
//!
//! A [`Document`] owns the `scraper` parse result and edits its tree in place,
//! so every node keeps its qualified name and namespace and serializes through
//! html5ever exactly as it was parsed. Detached nodes stay in the tree's
//! storage but are unreachable from the root and are not serialized.

use html5ever::{LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{Html, Node, StrTendril};

pub use ego_tree::NodeId;

/// Namespace of HTML elements.
const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Element queries the breadcrumb generator relies on.
pub trait ElementExt {
    /// Whether this is an HTML element with the given local name.
    ///
    /// Elements in other namespaces (an SVG `<a>`, for instance) never match.
    fn is_html(&self, tag: &str) -> bool;

    /// Value of a non-namespaced attribute, names compared ASCII
    /// case-insensitively.
    fn get_attr(&self, name: &str) -> Option<&str>;

    fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }
}

impl ElementExt for Element {
    fn is_html(&self, tag: &str) -> bool {
        &*self.name.ns == HTML_NS && (*self.name.local).eq_ignore_ascii_case(tag)
    }

    fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.ns.is_empty() && (*key.local).eq_ignore_ascii_case(name))
            .map(|(_, value)| &**value)
    }
}

fn set_element_attr(el: &mut Element, name: &str, value: &str) {
    let existing = el
        .attrs
        .iter_mut()
        .find(|(key, _)| key.ns.is_empty() && (*key.local).eq_ignore_ascii_case(name));
    match existing {
        Some((_, current)) => *current = StrTendril::from(value),
        None => {
            let key = QualName::new(
                None,
                Namespace::from(""),
                LocalName::from(name.to_ascii_lowercase()),
            );
            el.attrs.insert(key, StrTendril::from(value));
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A mutable HTML document or fragment.
pub struct Document {
    pub(crate) html: Html,
    root: NodeId,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("fragment", &self.is_fragment())
            .field("nodes", &self.html.tree.nodes().count())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with no children.
    pub fn new() -> Self {
        Self::from_html(Html::new_document())
    }

    pub(crate) fn from_html(html: Html) -> Self {
        // Fragments are wrapped in an `html` element by the parser; treat
        // that wrapper as the root so scopes and output match the input.
        let root = if html.tree.root().value().is_fragment() {
            html.root_element().id()
        } else {
            html.tree.root().id()
        };
        Self { html, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_fragment(&self) -> bool {
        self.html.tree.root().value().is_fragment()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.html.tree.get(id)?.value().as_element()
    }

    pub fn has_child_nodes(&self, id: NodeId) -> bool {
        self.html.tree.get(id).is_some_and(|node| node.has_children())
    }

    /// Attribute value of an element node; `None` for other nodes.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Set an attribute on an element node. No-op for other nodes.
    ///
    /// An existing attribute keeps its position; a new one is appended.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            if let Node::Element(el) = node.value() {
                set_element_attr(el, name, value);
            }
        }
    }

    /// Pre-order descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.html
            .tree
            .get(id)
            .into_iter()
            .flat_map(|node| node.descendants().skip(1))
            .map(|node| node.id())
    }

    /// First descendant element of `scope` (document order) matching `pred`.
    pub fn find_first(
        &self,
        scope: NodeId,
        mut pred: impl FnMut(&Element) -> bool,
    ) -> Option<NodeId> {
        self.descendants(scope)
            .find(|&id| self.element(id).is_some_and(&mut pred))
    }

    /// All descendant elements of `scope` matching `pred`, in document order.
    ///
    /// The result is a snapshot: later mutations do not affect it.
    pub fn find_all(&self, scope: NodeId, mut pred: impl FnMut(&Element) -> bool) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| self.element(id).is_some_and(&mut pred))
            .collect()
    }

    /// Concatenated text of all descendant text nodes (comments excluded).
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.html.tree.get(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|d| d.value().as_text().map(|text| &**text))
            .collect()
    }

    /// Replace all children with a single text node, or with nothing when
    /// `text` is empty.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return;
        };
        match node.value() {
            Node::Text(existing) => {
                existing.text = StrTendril::from(text);
                return;
            }
            Node::Element(_) | Node::Document | Node::Fragment => {}
            _ => return,
        }

        while let Some(mut child) = node.first_child() {
            child.detach();
        }
        if !text.is_empty() {
            node.append(Node::Text(Text {
                text: StrTendril::from(text),
            }));
        }
    }

    /// Detach a node (and its subtree) from its parent.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// The document title: text of the first HTML `<title>` element with
    /// ASCII whitespace collapsed and trimmed. Empty when there is no title.
    pub fn title(&self) -> String {
        self.find_first(self.html.tree.root().id(), |el| el.is_html("title"))
            .map(|id| {
                self.text_content(id)
                    .split_ascii_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_document, parse_fragment};

    const SAMPLE: &str = r##"<nav id="crumbs"><a href="#">Hello </a><!--note--><span>world</span></nav>"##;

    fn sample() -> (Document, NodeId, NodeId) {
        let doc = parse_fragment(SAMPLE);
        let nav = doc.find_first(doc.root(), |el| el.is_html("nav")).expect("nav");
        let link = doc.find_first(nav, |el| el.is_html("a")).expect("link");
        (doc, nav, link)
    }

    #[test]
    fn descendants_are_preorder() {
        let (doc, nav, link) = sample();
        let order: Vec<_> = doc.descendants(doc.root()).collect();
        assert_eq!(order[0], nav);
        assert_eq!(order[1], link);
        assert_eq!(order.len(), 6);
    }

    #[test]
    fn text_content_skips_comments() {
        let (doc, nav, _) = sample();
        assert_eq!(doc.text_content(nav), "Hello world");
    }

    #[test]
    fn set_text_content_replaces_children() {
        let (mut doc, nav, link) = sample();
        doc.set_text_content(nav, "Replaced");
        assert_eq!(doc.text_content(nav), "Replaced");
        assert!(doc.find_first(doc.root(), |el| el.is_html("a")).is_none());
        assert_eq!(doc.text_content(link), "Hello ");

        doc.set_text_content(nav, "");
        assert!(!doc.has_child_nodes(nav));
    }

    #[test]
    fn remove_detaches_subtree() {
        let (mut doc, nav, link) = sample();
        doc.remove(link);
        assert!(doc.descendants(doc.root()).all(|id| id != link));
        assert_eq!(doc.text_content(nav), "world");
    }

    #[test]
    fn attributes_are_case_insensitive() {
        let (mut doc, nav, link) = sample();
        assert_eq!(doc.attr(nav, "ID"), Some("crumbs"));
        doc.set_attr(link, "HREF", "/blog");
        assert_eq!(doc.attr(link, "href"), Some("/blog"));
        assert_eq!(doc.element(link).map(|el| el.attrs().count()), Some(1));
    }

    #[test]
    fn new_attributes_are_lowercase_and_appended() {
        let mut doc = parse_fragment(r#"<a title="t"></a>"#);
        let a = doc.find_first(doc.root(), |el| el.is_html("a")).expect("a");
        doc.set_attr(a, "HREF", "/x");
        assert_eq!(doc.to_html(), r#"<a title="t" href="/x"></a>"#);
        assert_eq!(doc.element(a).and_then(|el| el.attr("href")), Some("/x"));
    }

    #[test]
    fn find_helpers_respect_scope() {
        let (doc, nav, link) = sample();
        assert_eq!(doc.find_first(doc.root(), |el| el.is_html("A")), Some(link));
        assert_eq!(doc.find_first(link, |el| el.is_html("span")), None);
        assert_eq!(doc.find_all(nav, |_| true).len(), 2);
    }

    #[test]
    fn svg_elements_are_not_html() {
        let doc = parse_fragment("<svg><a></a><title>icon</title></svg>");
        assert!(doc.find_first(doc.root(), |el| el.is_html("a")).is_none());
        assert!(doc.find_first(doc.root(), |el| el.name() == "a").is_some());
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn title_collapses_whitespace() {
        let doc = parse_document("<title>\n  My   Page - Site \n</title>");
        assert_eq!(doc.title(), "My Page - Site");
        assert_eq!(Document::new().title(), "");
    }
}
