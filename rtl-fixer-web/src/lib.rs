#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use rtl_fixer_core::{FixerConfig, Session, SharedSession};

pub mod controls;
pub mod document;
pub mod dom;
pub mod error;
pub mod inject;
pub mod logger;
pub mod observer;

pub use document::WebDocument;
pub use error::WebError;
pub use observer::MutationNotifier;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let config = FixerConfig::shared().clone();
    logger::init(&config.log_level);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = launch(config).await {
            log::error!("RTL fixer failed to start: {err}");
        }
    });
}

/// Inject styles, wait for the host page to render, then run the fixer
/// on every change under `<body>`.
///
/// # Errors
///
/// Returns an error if the page lacks a document, head or body, or a browser
/// API call fails while wiring the fixer up.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn launch(config: FixerConfig) -> Result<SharedSession<WebDocument>, WebError> {
    let document = dom::document().ok_or(WebError::MissingWindow)?;
    inject::inject_styles(&document, &config)?;

    dom::sleep_ms(dom::timeout_ms(config.initial_delay_ms)).await?;

    let body = document.body().ok_or(WebError::MissingBody)?;
    let session = Session::new(WebDocument::new(document.clone()), config).into_shared();
    controls::listen_for_clicks(&document, &session)?;

    let mut notifier = MutationNotifier::new(body.into());
    rtl_fixer_core::start(&session, &mut notifier)?;
    log::info!("RTL fixer running (mode {})", session.borrow().mode());
    Ok(session)
}
