//! `selectors::Element` over [`MemoryDocument`] nodes.
use std::fmt;

use selectors::OpaqueElement;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::MatchingContext;
use selectors::matching::ElementSelectorFlags;

use super::{ElementData, MemoryDocument, NodeId, NodeKind};
use crate::selector::{CssIdent, FixerSelectors, PseudoClass, PseudoElement};

/// An element of a [`MemoryDocument`], as seen by selector matching.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a MemoryDocument,
    id: NodeId,
}

impl<'a> ElementRef<'a> {
    #[must_use]
    pub const fn new(doc: &'a MemoryDocument, id: NodeId) -> Self {
        Self { doc, id }
    }

    fn data(&self) -> Option<&'a ElementData> {
        self.doc.element(self.id)
    }

    fn element_at(&self, id: NodeId) -> Option<Self> {
        self.doc.element(id).map(|_| Self::new(self.doc, id))
    }

    fn siblings(&self) -> &'a [NodeId] {
        self.doc
            .parent_of(self.id)
            .map_or(&[][..], |parent| self.doc.children(parent))
    }

    fn position(&self) -> Option<usize> {
        self.siblings().iter().position(|sibling| *sibling == self.id)
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("tag", &self.data().map(|data| data.tag.as_str()))
            .finish()
    }
}

impl selectors::Element for ElementRef<'_> {
    type Impl = FixerSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(&self.doc.nodes[self.id.0])
    }

    fn parent_element(&self) -> Option<Self> {
        self.doc
            .parent_of(self.id)
            .and_then(|parent| self.element_at(parent))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let siblings = self.siblings();
        let position = self.position()?;
        siblings[..position]
            .iter()
            .rev()
            .find_map(|sibling| self.element_at(*sibling))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        let siblings = self.siblings();
        let position = self.position()?;
        siblings[position + 1..]
            .iter()
            .find_map(|sibling| self.element_at(*sibling))
    }

    fn first_element_child(&self) -> Option<Self> {
        self.doc
            .children(self.id)
            .iter()
            .find_map(|child| self.element_at(*child))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, name: &CssIdent) -> bool {
        self.data().is_some_and(|data| data.tag == name.0)
    }

    fn has_namespace(&self, ns: &CssIdent) -> bool {
        ns.0.is_empty() || ns.0 == "http://www.w3.org/1999/xhtml"
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.data().map(|data| &data.tag) == other.data().map(|data| &data.tag)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssIdent>,
        local_name: &CssIdent,
        operation: &AttrSelectorOperation<&CssIdent>,
    ) -> bool {
        if let NamespaceConstraint::Specific(ns) = ns
            && !ns.0.is_empty()
        {
            return false;
        }
        let Some(data) = self.data() else {
            return false;
        };
        if local_name.0 == "class" {
            return !data.classes.is_empty() && operation.eval_str(&data.classes.join(" "));
        }
        data.attribute(&local_name.0)
            .is_some_and(|value| operation.eval_str(value))
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &PseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pe {}
    }

    fn is_link(&self) -> bool {
        self.data()
            .is_some_and(|data| data.tag == "a" && data.attribute("href").is_some())
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssIdent, case_sensitivity: CaseSensitivity) -> bool {
        self.data()
            .and_then(|data| data.attribute("id"))
            .is_some_and(|own| case_sensitivity.eq(own.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &CssIdent, case_sensitivity: CaseSensitivity) -> bool {
        self.data().is_some_and(|data| {
            data.classes
                .iter()
                .any(|class| case_sensitivity.eq(class.as_bytes(), name.0.as_bytes()))
        })
    }

    fn imported_part(&self, _name: &CssIdent) -> Option<CssIdent> {
        None
    }

    fn is_part(&self, _name: &CssIdent) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.doc.children(self.id).iter().all(|child| {
            matches!(&self.doc.nodes[child.0].kind, NodeKind::Text(text) if text.is_empty())
        })
    }

    fn is_root(&self) -> bool {
        self.id == self.doc.root
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        false
    }

    fn has_custom_state(&self, _name: &CssIdent) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::memory::MemoryDocument;
    use crate::selector::SelectorList;

    fn page() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        let article = doc.append_element(doc.body(), "article");
        doc.with_attribute(article, "class", "postArticle-content");
        let header = doc.append_element(article, "header");
        let avatar = doc.append_element(header, "img");
        doc.with_attribute(avatar, "class", "avatar");
        doc.append_with_text(article, "p", "first");
        doc.append_with_text(article, "p", "second");
        let outside = doc.append_with_text(doc.body(), "p", "outside");
        doc.with_attribute(outside, "id", "footer-note");
        doc
    }

    fn texts(doc: &MemoryDocument, selector: &str) -> Vec<String> {
        doc.select(selector)
            .unwrap()
            .into_iter()
            .map(|node| doc.text_content(node))
            .collect()
    }

    #[test]
    fn descendant_combinator_scopes_matches() {
        let doc = page();
        assert_eq!(texts(&doc, ".postArticle-content p"), vec!["first", "second"]);
        assert_eq!(texts(&doc, "body > p"), vec!["outside"]);
    }

    #[test]
    fn sibling_structure_is_visible_to_selectors() {
        let doc = page();
        assert_eq!(texts(&doc, "header + p"), vec!["first"]);
        assert_eq!(texts(&doc, "article p:last-child"), vec!["second"]);
        assert_eq!(texts(&doc, "p:first-of-type"), vec!["first", "outside"]);
    }

    #[test]
    fn ids_classes_and_attributes_match() {
        let doc = page();
        assert_eq!(texts(&doc, "#footer-note"), vec!["outside"]);
        assert_eq!(doc.select("header .avatar").unwrap().len(), 1);
        assert_eq!(doc.select(r#"[class~="avatar"]"#).unwrap().len(), 1);
        assert_eq!(doc.select(r#"p[id^="footer"]"#).unwrap().len(), 1);
    }

    #[test]
    fn root_and_empty_pseudo_classes() {
        let doc = page();
        assert_eq!(doc.select(":root").unwrap(), vec![doc.root()]);
        let empty = doc.select("img:empty").unwrap();
        assert_eq!(empty.len(), 1);
        assert!(SelectorList::parse("img:empty").is_ok());
    }
}
