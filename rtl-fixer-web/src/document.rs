//! [`DocumentTree`] over the live page DOM
use rtl_fixer_core::DocumentTree;
use std::hash::Hasher;
use twox_hash::XxHash64;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node, NodeList};

use crate::error::WebError;

#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl DocumentTree for WebDocument {
    type Node = Element;
    type Error = WebError;

    fn query_all(&self, selector: &str) -> Result<Vec<Element>, WebError> {
        Ok(elements(&self.document.query_selector_all(selector)?))
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Result<Vec<Element>, WebError> {
        Ok(elements(&scope.query_selector_all(selector)?))
    }

    fn query_first(&self, selector: &str) -> Result<Option<Element>, WebError> {
        Ok(self.document.query_selector(selector)?)
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn direct_text(&self, node: &Element) -> Vec<String> {
        let children = node.child_nodes();
        (0..children.length())
            .filter_map(|i| children.get(i))
            .filter(|child| child.node_type() == Node::TEXT_NODE)
            .filter_map(|child| child.text_content())
            .collect()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), WebError> {
        node.set_attribute(name, value)?;
        Ok(())
    }

    fn remove_attribute(&mut self, node: &Element, name: &str) -> Result<(), WebError> {
        node.remove_attribute(name)?;
        Ok(())
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), WebError> {
        node.class_list().add_1(class)?;
        Ok(())
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> Result<(), WebError> {
        node.class_list().remove_1(class)?;
        Ok(())
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<(), WebError> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn create_button(&mut self, id: &str) -> Result<Element, WebError> {
        let button = self.document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_id(id);
        Ok(button)
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), WebError> {
        parent.append_child(child)?;
        Ok(())
    }

    fn fingerprint(&self) -> Result<u64, WebError> {
        let markup = self
            .document
            .document_element()
            .map(|root| root.outer_html())
            .unwrap_or_default();
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(markup.as_bytes());
        Ok(hasher.finish())
    }
}
