//! In-memory document tree.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Classes are stored in the `class` attribute and inline styles
//! in a separate property map, so both can be inspected without a renderer.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    #[error("cannot insert node {child:?} under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

impl Node {
    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag_name: String,
    pub attrs: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    /// Current form value for `input`, `textarea` and `select`.
    pub value: String,
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag_name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }

    pub fn classes(&self) -> Vec<&str> {
        self.attr("class")
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn add_class(&mut self, class_name: &str) {
        if self.has_class(class_name) {
            return;
        }
        let mut classes: Vec<String> = self.classes().into_iter().map(str::to_owned).collect();
        classes.push(class_name.to_string());
        self.set_classes(&classes);
    }

    pub fn remove_class(&mut self, class_name: &str) {
        let classes: Vec<String> = self
            .classes()
            .into_iter()
            .filter(|c| *c != class_name)
            .map(str::to_owned)
            .collect();
        self.set_classes(&classes);
    }

    fn set_classes(&mut self, classes: &[String]) {
        if classes.is_empty() {
            self.attrs.remove("class");
        } else {
            self.attrs.insert("class".to_string(), classes.join(" "));
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document with an `html` element holding `head` and `body`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                node_type: NodeType::Document,
            }],
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
        };
        let html = doc.push(NodeType::Element(Element::new("html")));
        let head = doc.push(NodeType::Element(Element::new("head")));
        let body = doc.push(NodeType::Element(Element::new("body")));
        doc.link(doc.root, html, None);
        doc.link(html, head, None);
        doc.link(html, body, None);
        doc.head = head;
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn push(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            node_type,
        });
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId, at: Option<usize>) {
        self.nodes[child.0].parent = Some(parent);
        let children = &mut self.nodes[parent.0].children;
        match at {
            Some(index) => children.insert(index, child),
            None => children.push(child),
        }
    }

    fn unlink(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != child);
        }
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(NodeType::Element(Element::new(tag_name)))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeType::Text(text.to_string()))
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn element(&self, id: NodeId) -> Result<&Element, DomError> {
        match &self.node(id)?.node_type {
            NodeType::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.node_type) {
            Some(NodeType::Element(element)) => Ok(element),
            Some(_) => Err(DomError::NotAnElement(id)),
            None => Err(DomError::UnknownNode(id)),
        }
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, DomError> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], DomError> {
        Ok(&self.node(id)?.children)
    }

    /// `id` followed by its ancestors, nearest first.
    pub fn ancestors_inclusive(&self, id: NodeId) -> Result<Vec<NodeId>, DomError> {
        let mut path = vec![id];
        let mut current = self.parent(id)?;
        while let Some(parent) = current {
            path.push(parent);
            current = self.parent(parent)?;
        }
        Ok(path)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> Result<bool, DomError> {
        Ok(self.ancestors_inclusive(node)?.contains(&ancestor))
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.node(child)?;
        if matches!(self.node(parent)?.node_type, NodeType::Text(_))
            || child == self.root
            || self.is_inclusive_ancestor(child, parent)?
        {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.unlink(child);
        self.link(parent, child, None);
        Ok(())
    }

    /// Inserts `new_node` right after `reference` under the same parent.
    pub fn insert_after(&mut self, reference: NodeId, new_node: NodeId) -> Result<(), DomError> {
        let parent = self
            .parent(reference)?
            .ok_or(DomError::HierarchyRequest {
                parent: reference,
                child: new_node,
            })?;
        self.check_insert(parent, new_node)?;
        self.unlink(new_node);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == reference)
            .map(|i| i + 1);
        self.link(parent, new_node, index);
        Ok(())
    }

    /// Detaches every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) -> Result<(), DomError> {
        let children = std::mem::take(&mut self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode(id))?.children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        Ok(())
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Result<Option<NodeId>, DomError> {
        let Some(parent) = self.parent(id)? else {
            return Ok(None);
        };
        let siblings = &self.nodes[parent.0].children;
        let after = siblings.iter().skip_while(|c| **c != id).skip(1);
        Ok(after
            .copied()
            .find(|c| matches!(self.nodes[c.0].node_type, NodeType::Element(_))))
    }

    /// Descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: NodeId) -> Result<Vec<NodeId>, DomError> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root)?.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Elements under `root` matching `predicate`, in document order.
    pub fn select_all(
        &self,
        root: NodeId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Result<Vec<NodeId>, DomError> {
        Ok(self
            .descendants(root)?
            .into_iter()
            .filter(|id| matches!(&self.nodes[id.0].node_type, NodeType::Element(e) if predicate(e)))
            .collect())
    }

    pub fn select_first(
        &self,
        root: NodeId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Result<Option<NodeId>, DomError> {
        Ok(self.select_all(root, predicate)?.into_iter().next())
    }

    /// First element in the whole document whose `id` attribute equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.select_first(self.root, |e| e.attr("id") == Some(id))
            .ok()
            .flatten()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Result<Option<&str>, DomError> {
        Ok(self.element(id)?.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.element_mut(id)?.attrs.remove(name))
    }

    pub fn has_class(&self, id: NodeId, class_name: &str) -> Result<bool, DomError> {
        Ok(self.element(id)?.has_class(class_name))
    }

    /// Adds each whitespace-separated class in `class_names`.
    pub fn add_class(&mut self, id: NodeId, class_names: &str) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        for class_name in class_names.split_whitespace() {
            element.add_class(class_name);
        }
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class_name: &str) -> Result<(), DomError> {
        self.element_mut(id)?.remove_class(class_name);
        Ok(())
    }

    pub fn toggle_class(&mut self, id: NodeId, class_name: &str, on: bool) -> Result<(), DomError> {
        if on {
            self.add_class(id, class_name)
        } else {
            self.remove_class(id, class_name)
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Result<Option<&str>, DomError> {
        Ok(self.element(id)?.style(property))
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    pub fn value(&self, id: NodeId) -> Result<&str, DomError> {
        Ok(&self.element(id)?.value)
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.value = value.to_string();
        Ok(())
    }

    /// Concatenated text of `id` and its descendants.
    pub fn text_content(&self, id: NodeId) -> Result<String, DomError> {
        if let NodeType::Text(text) = &self.node(id)?.node_type {
            return Ok(text.clone());
        }
        Ok(self
            .descendants(id)?
            .into_iter()
            .filter_map(|c| match &self.nodes[c.0].node_type {
                NodeType::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect())
    }

    /// Replaces every child of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        if let Some(NodeType::Text(existing)) = self.nodes.get_mut(id.0).map(|n| &mut n.node_type) {
            *existing = text.to_string();
            return Ok(());
        }
        self.clear_children(id)?;
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.link(id, text_node, None);
        }
        Ok(())
    }

    /// Creates an element with the given classes and appends it to `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        class_names: &str,
    ) -> Result<NodeId, DomError> {
        self.node(parent)?;
        let id = self.create_element(tag_name);
        if !class_names.is_empty() {
            self.add_class(id, class_names)?;
        }
        self.append_child(parent, id)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_head_and_body() {
        let doc = Document::new();
        assert!(doc.element(doc.head()).unwrap().is("head"));
        assert!(doc.element(doc.body()).unwrap().is("body"));
        assert_eq!(doc.parent(doc.head()).unwrap(), doc.parent(doc.body()).unwrap());
    }

    #[test]
    fn test_class_list_operations() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.body(), "div", "a b").unwrap();
        doc.add_class(div, "b c").unwrap();
        assert_eq!(doc.attr(div, "class").unwrap(), Some("a b c"));
        doc.remove_class(div, "a").unwrap();
        assert!(!doc.has_class(div, "a").unwrap());
        doc.remove_class(div, "b").unwrap();
        doc.remove_class(div, "c").unwrap();
        assert_eq!(doc.attr(div, "class").unwrap(), None);
    }

    #[test]
    fn test_insert_after_and_sibling_lookup() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.append_element(body, "textarea", "").unwrap();
        let last = doc.append_element(body, "p", "").unwrap();
        let counter = doc.create_element("div");
        doc.insert_after(first, counter).unwrap();
        assert_eq!(doc.children(body).unwrap(), &[first, counter, last]);
        assert_eq!(doc.next_element_sibling(first).unwrap(), Some(counter));
        assert_eq!(doc.next_element_sibling(last).unwrap(), None);
    }

    #[test]
    fn test_next_element_sibling_skips_text() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.append_element(body, "span", "").unwrap();
        let text = doc.create_text(" ");
        doc.append_child(body, text).unwrap();
        let second = doc.append_element(body, "span", "").unwrap();
        assert_eq!(doc.next_element_sibling(first).unwrap(), Some(second));
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut doc = Document::new();
        let outer = doc.append_element(doc.body(), "div", "").unwrap();
        let inner = doc.append_element(outer, "div", "").unwrap();
        assert_eq!(
            doc.append_child(inner, outer),
            Err(DomError::HierarchyRequest { parent: inner, child: outer })
        );
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append_element(body, "div", "").unwrap();
        let a1 = doc.append_element(a, "span", "").unwrap();
        let b = doc.append_element(body, "div", "").unwrap();
        assert_eq!(doc.descendants(body).unwrap(), vec![a, a1, b]);
        let divs = doc.select_all(body, |e| e.is("div")).unwrap();
        assert_eq!(divs, vec![a, b]);
    }

    #[test]
    fn test_text_content_round_trip() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.body(), "p", "").unwrap();
        let em = doc.append_element(p, "em", "").unwrap();
        doc.set_text_content(em, "old").unwrap();
        doc.set_text_content(p, "new text").unwrap();
        assert_eq!(doc.text_content(p).unwrap(), "new text");
        assert_eq!(doc.parent(em).unwrap(), None);
    }

    #[test]
    fn test_unknown_and_non_element_nodes() {
        let mut doc = Document::new();
        let text = doc.create_text("x");
        assert_eq!(doc.element(text), Err(DomError::NotAnElement(text)));
        assert_eq!(doc.element(NodeId(999)), Err(DomError::UnknownNode(NodeId(999))));
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new();
        let section = doc.append_element(doc.body(), "section", "").unwrap();
        doc.set_attr(section, "id", "about").unwrap();
        assert_eq!(doc.get_element_by_id("about"), Some(section));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }
}
