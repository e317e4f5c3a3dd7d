use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the page's document, if running in a browser.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Run `callback` once after `delay_ms` milliseconds.
///
/// # Errors
/// Returns an error if no browser `window` is available or the timer cannot be scheduled.
pub fn set_timeout<F>(delay_ms: i32, callback: F) -> Result<i32, JsValue>
where
    F: FnOnce() + 'static,
{
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let closure = Closure::once(callback);
    let handle = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    )?;
    closure.forget();
    Ok(handle)
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: i32) -> Result<(), JsValue> {
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    set_timeout(duration_ms, move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    })?;

    JsFuture::from(promise).await?;
    Ok(())
}

/// Clamp a configured millisecond value to what `setTimeout` accepts.
#[must_use]
pub fn timeout_ms(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
