//! One-time stylesheet and webfont injection into `<head>`
use rtl_fixer_core::{FixerConfig, stylesheet};
use web_sys::Document;

use crate::error::WebError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Injected {
    pub style: bool,
    pub font: bool,
}

/// Append the fixer stylesheet and font link unless a previous run already did.
///
/// # Errors
///
/// Returns an error if the document has no `<head>` or an element cannot be created.
pub fn inject_styles(document: &Document, config: &FixerConfig) -> Result<Injected, WebError> {
    let head = document.head().ok_or(WebError::MissingHead)?;
    let mut injected = Injected::default();

    if document.get_element_by_id(&config.ids.style).is_none() {
        let style = document.create_element("style")?;
        style.set_id(&config.ids.style);
        style.set_text_content(Some(&stylesheet(config)));
        head.append_child(&style)?;
        injected.style = true;
    }

    if !config.font_url.is_empty() && document.get_element_by_id(&config.ids.font_link).is_none() {
        let link = document.create_element("link")?;
        link.set_id(&config.ids.font_link);
        link.set_attribute("rel", "stylesheet")?;
        link.set_attribute("href", &config.font_url)?;
        head.append_child(&link)?;
        injected.font = true;
    }

    log::debug!("styles injected: {injected:?}");
    Ok(injected)
}
