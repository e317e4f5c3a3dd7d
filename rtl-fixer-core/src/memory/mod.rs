//! In-memory synthetic document.
//!
//! An arena tree that implements [`DocumentTree`] so the scanner and the
//! toggle controller can be exercised without a browser. It also counts
//! child-list mutations inside `<body>`, which is what the page observer
//! reacts to.
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::hash::Hasher;
use thiserror::Error;
use twox_hash::XxHash64;

use crate::dom::DocumentTree;
use crate::selector::{SelectorError, SelectorList};

mod element_ref;

pub use element_ref::ElementRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("selector error: {0}")]
    Selector(#[from] SelectorError),
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    #[error("node {0:?} cannot be appended to itself or its descendants")]
    Cycle(NodeId),
}

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: SmallVec<[String; 4]>,
}

impl ElementData {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    body_mutations: u64,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty `<html><head></head><body></body></html>` document.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            body_mutations: 0,
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.link(doc.root, doc.head);
        doc.link(doc.root, doc.body);
        doc
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub const fn head(&self) -> NodeId {
        self.head
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Child-list mutations observed under `<body>` so far.
    #[must_use]
    pub const fn body_mutations(&self) -> u64 {
        self.body_mutations
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            ..ElementData::default()
        }))
    }

    /// Append a new element under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.attach(parent, id);
        id
    }

    /// Append a new text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.push(NodeKind::Text(text.to_string()));
        self.attach(parent, id);
        id
    }

    /// Append an element holding a single text child, returning the element.
    pub fn append_with_text(&mut self, parent: NodeId, tag: &str, text: &str) -> NodeId {
        let id = self.append_element(parent, tag);
        self.append_text(id, text);
        id
    }

    /// Builder-style attribute write that skips mutation bookkeeping.
    pub fn with_attribute(&mut self, node: NodeId, name: &str, value: &str) -> NodeId {
        if let Some(data) = self.element_mut(node) {
            if name == "class" {
                data.classes = value.split_whitespace().map(ToString::to_string).collect();
            } else {
                data.attributes.insert(name.to_string(), value.to_string());
            }
        }
        node
    }

    #[must_use]
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        let data = self.element(node)?;
        if name == "class" {
            return None;
        }
        data.attribute(name)
    }

    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.element(node)
            .map(|data| data.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn element_has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|data| data.has_class(class))
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map_or(&[][..], |n| n.children.as_slice())
    }

    #[must_use]
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Concatenated text of every descendant text node.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    /// Elements matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot be parsed.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, MemoryError> {
        let list = SelectorList::parse(selector)?;
        let mut out = Vec::new();
        self.collect_matches(self.root, &list, true, &mut out);
        Ok(out)
    }

    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root).into_iter().find(|node| {
            self.element(*node)
                .is_some_and(|data| data.attribute("id") == Some(id))
        })
    }

    /// Deterministic markup-like rendering of the whole tree.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, &mut out);
        out
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
            self.note_child_list_change(old);
        }
        self.link(parent, child);
        self.note_child_list_change(parent);
    }

    fn note_child_list_change(&mut self, parent: NodeId) {
        if self.is_inclusive_ancestor(self.body, parent) {
            self.body_mutations += 1;
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.parent_of(node) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    fn require_element_mut(&mut self, node: NodeId) -> Result<&mut ElementData, MemoryError> {
        self.element_mut(node).ok_or(MemoryError::NotAnElement(node))
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    fn collect_matches(
        &self,
        scope: NodeId,
        list: &SelectorList,
        include_scope: bool,
        out: &mut Vec<NodeId>,
    ) {
        let candidates = if include_scope {
            std::iter::once(scope)
                .chain(self.descendants(scope))
                .collect::<Vec<_>>()
        } else {
            self.descendants(scope)
        };
        out.extend(candidates.into_iter().filter(|node| {
            self.element(*node).is_some() && list.matches(&ElementRef::new(self, *node))
        }));
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.nodes.get(node.0) else {
            return;
        };
        match &n.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => {
                for child in &n.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    fn render_node(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.nodes.get(node.0) else {
            return;
        };
        match &n.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(data) => {
                let _ = write!(out, "<{}", data.tag);
                for (name, value) in &data.attributes {
                    let _ = write!(out, " {name}=\"{value}\"");
                }
                if !data.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", data.classes.join(" "));
                }
                out.push('>');
                for child in &n.children {
                    self.render_node(*child, out);
                }
                let _ = write!(out, "</{}>", data.tag);
            }
        }
    }
}

impl DocumentTree for MemoryDocument {
    type Node = NodeId;
    type Error = MemoryError;

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, MemoryError> {
        self.select(selector)
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Result<Vec<NodeId>, MemoryError> {
        let list = SelectorList::parse(selector)?;
        let mut out = Vec::new();
        self.collect_matches(*scope, &list, false, &mut out);
        Ok(out)
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.element(*node)
            .map(|data| data.tag.clone())
            .unwrap_or_default()
    }

    fn direct_text(&self, node: &NodeId) -> Vec<String> {
        self.children(*node)
            .iter()
            .filter_map(|child| match &self.nodes[child.0].kind {
                NodeKind::Text(text) => Some(text.clone()),
                NodeKind::Element(_) => None,
            })
            .collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.parent_of(*node)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.element_has_class(*node, class)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get_attribute(*node, name).map(ToString::to_string)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), MemoryError> {
        let data = self.require_element_mut(*node)?;
        data.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) -> Result<(), MemoryError> {
        let data = self.require_element_mut(*node)?;
        data.attributes.remove(name);
        Ok(())
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), MemoryError> {
        let data = self.require_element_mut(*node)?;
        if !data.has_class(class) {
            data.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> Result<(), MemoryError> {
        let data = self.require_element_mut(*node)?;
        data.classes.retain(|c| c != class);
        Ok(())
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<(), MemoryError> {
        self.require_element_mut(*node)?;
        let old = std::mem::take(&mut self.nodes[node.0].children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
        self.note_child_list_change(*node);
        let text_node = self.push(NodeKind::Text(text.to_string()));
        self.link(*node, text_node);
        Ok(())
    }

    fn create_button(&mut self, id: &str) -> Result<NodeId, MemoryError> {
        let button = self.create_element("button");
        let data = self.require_element_mut(button)?;
        data.attributes.insert("type".to_string(), "button".to_string());
        data.attributes.insert("id".to_string(), id.to_string());
        Ok(button)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
        self.require_element_mut(*parent)?;
        if self.is_inclusive_ancestor(*child, *parent) {
            return Err(MemoryError::Cycle(*child));
        }
        self.attach(*parent, *child);
        Ok(())
    }

    fn fingerprint(&self) -> Result<u64, MemoryError> {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(self.render().as_bytes());
        Ok(hasher.finish())
    }
}
