#![cfg(target_arch = "wasm32")]

use rtl_fixer_core::{DocumentTree, FixerConfig, InjectOutcome, Mode, Session, scan};
use rtl_fixer_web::{WebDocument, controls, dom, inject};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn fixture(id: &str, markup: &str) -> Element {
    let doc = dom::document().expect("document");
    if let Some(old) = doc.get_element_by_id(id) {
        old.remove();
    }
    let root = doc.create_element("div").expect("create fixture root");
    root.set_id(id);
    root.set_inner_html(markup);
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append fixture");
    root
}

fn fixture_config(scope: &str) -> FixerConfig {
    FixerConfig {
        content_selectors: vec![format!("#{scope} p"), format!("#{scope} li")],
        toolbar_anchor_selector: format!("#{scope} [aria-label=\"responses\"]"),
        ..FixerConfig::default()
    }
}

#[wasm_bindgen_test]
fn dom_helpers_resolve_in_browser() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}

#[wasm_bindgen_test]
fn scan_styles_live_paragraph_through_modes() {
    let root = fixture("scan-fixture", "<p>Hello مرحبا world</p><p>Plain</p>");
    let mut doc = WebDocument::new(dom::document().expect("document"));
    let config = fixture_config("scan-fixture");
    let p = root.query_selector("p").unwrap().expect("paragraph");
    let plain = root.query_selector("p:nth-child(2)").unwrap().expect("plain");

    let report = scan(&mut doc, &config, Mode::RightAlign).unwrap();
    assert_eq!(report.styled, 1);
    assert_eq!(p.get_attribute("dir").as_deref(), Some("auto"));
    assert!(p.class_list().contains("rtl-fixed-text"));
    assert!(p.class_list().contains("rtl-align-right"));
    assert!(!plain.has_attribute("dir"));

    scan(&mut doc, &config, Mode::Justify).unwrap();
    assert!(p.class_list().contains("rtl-align-justify"));
    assert!(!p.class_list().contains("rtl-align-right"));

    scan(&mut doc, &config, Mode::Off).unwrap();
    assert!(!p.has_attribute("dir"));
    assert_eq!(p.class_list().length(), 0);
}

#[wasm_bindgen_test]
fn host_direction_is_restored_after_off() {
    let root = fixture(
        "host-dir-fixture",
        "<p dir=\"ltr\">Hello world</p><p dir=\"ltr\">مرحبا</p>",
    );
    let mut doc = WebDocument::new(dom::document().expect("document"));
    let config = fixture_config("host-dir-fixture");
    let latin = root.query_selector("p").unwrap().expect("latin paragraph");
    let arabic = root
        .query_selector("p:nth-child(2)")
        .unwrap()
        .expect("arabic paragraph");

    scan(&mut doc, &config, Mode::RightAlign).unwrap();
    assert_eq!(latin.get_attribute("dir").as_deref(), Some("ltr"));
    assert_eq!(arabic.get_attribute("dir").as_deref(), Some("auto"));

    scan(&mut doc, &config, Mode::Off).unwrap();
    assert_eq!(latin.get_attribute("dir").as_deref(), Some("ltr"));
    assert_eq!(arabic.get_attribute("dir").as_deref(), Some("ltr"));
    assert!(!arabic.has_attribute(rtl_fixer_core::HOST_DIR_ATTRIBUTE));
}

#[wasm_bindgen_test]
fn direct_text_ignores_wrapped_arabic() {
    let root = fixture("direct-fixture", "<p>Intro <strong>مرحبا</strong></p>");
    let doc = WebDocument::new(dom::document().expect("document"));
    let p = root.query_selector("p").unwrap().expect("paragraph");
    assert_eq!(doc.direct_text(&p), vec!["Intro ".to_string()]);
}

#[wasm_bindgen_test]
fn style_injection_is_idempotent() {
    let document = dom::document().expect("document");
    let config = FixerConfig {
        font_url: "data:text/css,".to_string(),
        ..FixerConfig::default()
    };
    inject::inject_styles(&document, &config).unwrap();
    let second = inject::inject_styles(&document, &config).unwrap();
    assert!(!second.style);
    assert!(!second.font);
    let styles = document
        .query_selector_all(&format!("#{}", config.ids.style))
        .unwrap();
    assert_eq!(styles.length(), 1);
}

#[wasm_bindgen_test]
fn button_click_cycles_mode() {
    let root = fixture(
        "toolbar-fixture",
        "<div class=\"bar\"><button aria-label=\"responses\">3</button></div><p>سلام</p>",
    );
    let document = dom::document().expect("document");
    let config = FixerConfig {
        ids: rtl_fixer_core::ElementIds {
            button: "toolbar-fixture-toggle".to_string(),
            ..rtl_fixer_core::ElementIds::default()
        },
        ..fixture_config("toolbar-fixture")
    };
    let session = Session::new(WebDocument::new(document.clone()), config).into_shared();
    controls::listen_for_clicks(&document, &session).unwrap();

    let report = session.borrow_mut().run_pass().unwrap();
    assert!(matches!(report.button, InjectOutcome::Injected(_)));
    let again = session.borrow_mut().run_pass().unwrap();
    assert_eq!(again.button, InjectOutcome::AlreadyPresent);

    let button: HtmlElement = document
        .get_element_by_id("toolbar-fixture-toggle")
        .expect("toggle injected")
        .dyn_into()
        .expect("html element");
    let bar = root.query_selector(".bar").unwrap().expect("toolbar");
    assert_eq!(button.parent_element(), Some(bar));

    button.click();
    assert_eq!(session.borrow().mode(), Mode::Justify);
    let p = root.query_selector("p").unwrap().expect("paragraph");
    assert!(p.class_list().contains("rtl-align-justify"));

    button.click();
    assert_eq!(session.borrow().mode(), Mode::Off);
    assert!(!p.has_attribute("dir"));

    button.click();
    assert_eq!(session.borrow().mode(), Mode::RightAlign);
    assert!(button.class_list().contains("rtl-toggle-pulse"));
}
