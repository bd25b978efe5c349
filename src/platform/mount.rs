use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event};

use super::dom::DomView;
use super::{BrowserClipboard, GlooTimer};
use crate::api::HttpBackend;
use crate::config::UiConfig;
use crate::controller::Controller;
use crate::view::ids;

/// Build the controller for the current page and attach every click
/// handler. Listeners live for the page's lifetime.
pub fn mount(config: UiConfig) -> Result<Rc<Controller>, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    for id in ids::REQUIRED {
        if document.get_element_by_id(id).is_none() {
            log::warn!("[mount] page is missing #{id}");
        }
    }

    log::info!("[mount] API base: {}", config.api_base);
    let controller = Rc::new(
        Controller::new(
            Box::new(HttpBackend::new(config.api_base.clone())),
            Box::new(DomView::new(document.clone())),
            Box::new(BrowserClipboard),
            Box::new(GlooTimer),
        )
        .with_copy_feedback(config.copy_feedback),
    );

    let c = controller.clone();
    on_click(&document, ids::PROCESS_ARTICLE_BTN, move |_| {
        let c = c.clone();
        spawn_local(async move { c.condense().await });
    });

    let c = controller.clone();
    on_click(&document, ids::COPY_ARTICLE_BTN, move |_| {
        let c = c.clone();
        spawn_local(async move { c.copy_condensed().await });
    });

    let c = controller.clone();
    on_click(&document, ids::PARSE_TABLES_BTN, move |_| {
        let c = c.clone();
        spawn_local(async move { c.parse_tables().await });
    });

    // Blocks are rebuilt on every parse, so copy clicks are delegated.
    let c = controller.clone();
    on_click(&document, ids::TABLES_OUTPUT, move |event| {
        let Some(index) = copy_index(&event) else { return };
        let c = c.clone();
        spawn_local(async move { c.copy_table_json(index).await });
    });

    let c = controller.clone();
    if !on_click(&document, ids::CLEAR_ARTICLE_BTN, move |_| c.clear_article()) {
        log::debug!("[mount] no #{} on page", ids::CLEAR_ARTICLE_BTN);
    }

    let c = controller.clone();
    if !on_click(&document, ids::CLEAR_TABLES_BTN, move |_| c.clear_tables()) {
        log::debug!("[mount] no #{} on page", ids::CLEAR_TABLES_BTN);
    }

    Ok(controller)
}

/// Attach a click listener to `#id`. Returns false if the element is absent.
fn on_click<F>(document: &Document, id: &str, handler: F) -> bool
where
    F: FnMut(Event) + 'static,
{
    let Some(el) = document.get_element_by_id(id) else {
        return false;
    };
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
        log::error!("[mount] failed to listen on #{id}: {e:?}");
    }
    closure.forget();
    true
}

/// Block index of the copy button a click landed on, if any.
fn copy_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let button = target.closest("button[data-index]").ok()??;
    button.get_attribute("data-index")?.parse().ok()
}
