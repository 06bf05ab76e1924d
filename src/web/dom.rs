use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, FormData, HtmlButtonElement, HtmlDocument, HtmlFormElement,
    HtmlInputElement, HtmlTextAreaElement, Window,
};

use crate::errors::{UiError, UiResult};
use crate::view::{ButtonState, View};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap, js_name = Modal)]
    type BootstrapModal;

    #[wasm_bindgen(catch, constructor, js_namespace = bootstrap, js_class = "Modal")]
    fn new(element: &Element) -> Result<BootstrapModal, JsValue>;

    #[wasm_bindgen(method)]
    fn show(this: &BootstrapModal);
}

fn js_error(value: JsValue) -> UiError {
    UiError::Js(js_message(value))
}

fn js_message(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Raw `document.cookie`, empty when unavailable.
pub fn document_cookie() -> String {
    web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.dyn_into::<HtmlDocument>().ok())
        .and_then(|html| html.cookie().ok())
        .unwrap_or_default()
}

#[derive(Clone)]
pub struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn element(&self, id: &str) -> UiResult<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| UiError::MissingElement(id.to_string()))
    }

    fn form(&self, id: &str) -> UiResult<HtmlFormElement> {
        self.element(id)?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| UiError::MissingElement(format!("form#{id}")))
    }
}

pub fn submit_button(form: &Element) -> Option<HtmlButtonElement> {
    form.query_selector(r#"button[type="submit"]"#)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
}

impl View for DomView {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn read_fields(&self, form_id: &str) -> UiResult<Vec<(String, String)>> {
        let form = self.form(form_id)?;
        let data = FormData::new_with_form(&form)
            .map_err(js_error)?;
        let entries = js_sys::try_iter(&data)
            .map_err(js_error)?
            .ok_or_else(|| UiError::Js(format!("form#{form_id} data is not iterable")))?;

        let mut fields = Vec::new();
        for entry in entries {
            let pair = js_sys::Array::from(&entry.map_err(js_error)?);
            // File inputs yield Blob values; those are skipped.
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                fields.push((name, value));
            }
        }
        Ok(fields)
    }

    fn form_action(&self, form_id: &str) -> UiResult<String> {
        Ok(self.form(form_id)?.action())
    }

    fn set_form_action(&self, form_id: &str, action: &str) -> UiResult<()> {
        self.form(form_id)?
            .set_attribute("action", action)
            .map_err(js_error)
    }

    fn set_field(&self, id: &str, value: &str) -> UiResult<()> {
        let element = self.element(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
            return Ok(());
        }
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
            return Ok(());
        }
        Err(UiError::MissingElement(format!("input#{id}")))
    }

    fn card_text(&self, card: &str, part: &str) -> UiResult<String> {
        let missing = || UiError::MissingElement(format!("{card} {part}"));
        let card_el = self
            .document
            .query_selector(card)
            .map_err(js_error)?
            .ok_or_else(missing)?;
        let part_el = card_el
            .query_selector(part)
            .map_err(js_error)?
            .ok_or_else(missing)?;
        Ok(part_el.text_content().unwrap_or_default())
    }

    fn set_submit_state(&self, form_id: &str, state: &ButtonState) -> UiResult<()> {
        let form = self.element(form_id)?;
        let button = submit_button(&form)
            .ok_or_else(|| UiError::MissingElement(format!("#{form_id} submit button")))?;
        button.set_disabled(state.is_busy());
        button.set_inner_html(&state.markup());
        Ok(())
    }

    fn show_modal(&self, modal_id: &str) -> UiResult<()> {
        let element = self.element(modal_id)?;
        let modal = BootstrapModal::new(&element)
            .map_err(|e| UiError::Js(format!("bootstrap.Modal: {}", js_message(e))))?;
        modal.show();
        Ok(())
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn reload(&self) {
        let _ = self.window.location().reload();
    }

    fn navigate(&self, url: &str) {
        let _ = self.window.location().set_href(url);
    }
}
