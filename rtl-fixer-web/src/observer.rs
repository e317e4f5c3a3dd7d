//! `MutationObserver`-backed change notifier
use rtl_fixer_core::ChangeNotifier;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{MutationObserver, MutationObserverInit, Node};

use crate::error::WebError;

/// Reports child-list changes anywhere under `target`.
pub struct MutationNotifier {
    target: Node,
}

impl MutationNotifier {
    #[must_use]
    pub const fn new(target: Node) -> Self {
        Self { target }
    }
}

impl ChangeNotifier for MutationNotifier {
    type Error = WebError;

    fn subscribe(&mut self, mut handler: Box<dyn FnMut()>) -> Result<(), WebError> {
        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_records: js_sys::Array, _observer: MutationObserver| handler(),
        );
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(&self.target, &options)?;
        // The observed target keeps the observer alive for the page's lifetime.
        callback.forget();
        Ok(())
    }
}
