//! Click handling for the toggle button
use rtl_fixer_core::SharedSession;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event};

use crate::document::WebDocument;
use crate::dom;
use crate::error::WebError;

/// Listen for clicks on the toggle button.
///
/// The listener sits on the document so it keeps working when the host page
/// re-renders the toolbar and the button is injected again.
///
/// # Errors
///
/// Returns an error if the listener cannot be registered.
pub fn listen_for_clicks(
    document: &Document,
    session: &SharedSession<WebDocument>,
) -> Result<(), WebError> {
    let selector = format!("#{}", session.borrow().config().ids.button);
    let session = Rc::clone(session);
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let on_button = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|target| target.closest(&selector).ok().flatten())
            .is_some();
        if !on_button {
            return;
        }
        event.prevent_default();
        handle_click(&session);
    });
    document.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Advance the mode and schedule the end of the click animation.
pub fn handle_click(session: &SharedSession<WebDocument>) {
    let Ok(mut active) = session.try_borrow_mut() else {
        log::warn!("toggle clicked while a pass is running, ignored");
        return;
    };
    let animation_ms = active.config().animation_ms;
    let transition = active.click();
    drop(active);

    match transition {
        Ok(transition) if transition.animate => schedule_animation_end(session, animation_ms),
        Ok(_) => {}
        Err(err) => log::error!("toggle failed: {err}"),
    }
}

fn schedule_animation_end(session: &SharedSession<WebDocument>, animation_ms: u32) {
    let session = Rc::clone(session);
    let scheduled = dom::set_timeout(dom::timeout_ms(animation_ms), move || {
        let Ok(mut active) = session.try_borrow_mut() else {
            return;
        };
        if let Err(err) = active.finish_animation() {
            log::error!("could not clear toggle animation: {err}");
        }
    });
    if let Err(err) = scheduled {
        log::error!(
            "could not schedule toggle animation end: {}",
            dom::js_error_message(&err)
        );
    }
}
