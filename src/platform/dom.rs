//! `View` over the live document, plus `render::Node` to DOM conversion.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlInputElement, HtmlTextAreaElement};

use crate::render::Node;
use crate::view::View;

pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<web_sys::Element> {
        let el = self.document.get_element_by_id(id);
        if el.is_none() {
            log::warn!("[dom] no element #{id}");
        }
        el
    }

    /// Build a detached DOM subtree for `node`.
    pub fn materialize(&self, node: &Node) -> Result<web_sys::Node, JsValue> {
        match node {
            Node::Text(s) => Ok(self.document.create_text_node(s).into()),
            Node::Element(element) => {
                let el = self.document.create_element(element.tag)?;
                for (name, value) in &element.attrs {
                    el.set_attribute(name, value)?;
                }
                for child in &element.children {
                    el.append_child(&self.materialize(child)?)?;
                }
                if let Some(value) = &element.value {
                    set_control_value(&el, value);
                }
                Ok(el.into())
            }
        }
    }
}

/// Value of a form control, falling back to text content.
fn control_value(el: &web_sys::Element) -> String {
    if let Some(ta) = el.dyn_ref::<HtmlTextAreaElement>() {
        ta.value()
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else {
        el.text_content().unwrap_or_default()
    }
}

fn set_control_value(el: &web_sys::Element, value: &str) {
    if let Some(ta) = el.dyn_ref::<HtmlTextAreaElement>() {
        ta.set_value(value);
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else {
        el.set_text_content(Some(value));
    }
}

impl View for DomView {
    fn value(&self, id: &str) -> String {
        self.element(id)
            .map(|el| control_value(&el))
            .unwrap_or_default()
    }

    fn set_value(&self, id: &str, value: &str) {
        if let Some(el) = self.element(id) {
            set_control_value(&el, value);
        }
    }

    fn text(&self, id: &str) -> String {
        self.element(id)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        let Some(el) = self.element(id) else { return };
        if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = el.set_attribute("disabled", "");
        } else {
            let _ = el.remove_attribute("disabled");
        }
    }

    fn replace_children(&self, id: &str, nodes: &[Node]) {
        let Some(el) = self.element(id) else { return };
        el.set_inner_html("");
        for node in nodes {
            match self.materialize(node) {
                Ok(child) => {
                    if let Err(e) = el.append_child(&child) {
                        log::error!("[dom] append into #{id} failed: {e:?}");
                    }
                }
                Err(e) => log::error!("[dom] failed to build node for #{id}: {e:?}"),
            }
        }
    }
}
