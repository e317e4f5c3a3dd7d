//! Document abstraction the fixer runs against.
//!
//! The browser build implements this on top of `web-sys`; tests and the
//! tester CLI use [`crate::memory::MemoryDocument`].

/// The operations the scanner and toggle controller need from a document.
///
/// Selector arguments are CSS selector lists. Implementations must return
/// matches in document order.
pub trait DocumentTree {
    type Node: Clone;
    type Error: std::error::Error + 'static;

    /// All elements in the document matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is rejected by the implementation.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>, Self::Error>;

    /// Elements under `scope` (excluding `scope` itself) matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is rejected by the implementation.
    fn query_within(
        &self,
        scope: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, Self::Error>;

    /// First element in the document matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is rejected by the implementation.
    fn query_first(&self, selector: &str) -> Result<Option<Self::Node>, Self::Error> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// Lower-case tag name of an element.
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Text of the element's direct text-node children, in order.
    fn direct_text(&self, node: &Self::Node) -> Vec<String>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the underlying document refuses the write.
    fn set_attribute(
        &mut self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the underlying document refuses the write.
    fn remove_attribute(&mut self, node: &Self::Node, name: &str) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the underlying document refuses the write.
    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the underlying document refuses the write.
    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<(), Self::Error>;

    /// Replace every child of `node` with a single text node.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying document refuses the write.
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), Self::Error>;

    /// Create a detached `<button type="button">` carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be created.
    fn create_button(&mut self, id: &str) -> Result<Self::Node, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the child cannot be inserted.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

    /// Stable digest of the current document state.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    fn fingerprint(&self) -> Result<u64, Self::Error>;

    /// Add or remove `class` on `node`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying document refuses the write.
    fn toggle_class(
        &mut self,
        node: &Self::Node,
        class: &str,
        present: bool,
    ) -> Result<(), Self::Error> {
        if present {
            self.add_class(node, class)
        } else {
            self.remove_class(node, class)
        }
    }
}
