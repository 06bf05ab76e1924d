//! Browser entry point: binds the controllers to the rendered course pages.

mod dom;
mod effects;
mod fetch;

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Event;

use crate::api::{parse_entity_id, EntityId, Transport};
use crate::config::UiConfig;
use crate::controller::{modal, Completion, DeleteTarget, DeletionTrigger, FormController, FormRole};
use crate::cookies::{CookieJar, TokenSource};
use crate::errors::{UiError, UiResult};
use crate::logging;

pub use dom::DomView;
pub use fetch::FetchTransport;

type DocumentTokens = CookieJar<fn() -> String>;

const CONFIG_ELEMENT: &str = "learntrack-config";

struct Page {
    view: DomView,
    deletes: DeletionTrigger<FetchTransport, DocumentTokens>,
}

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

fn current_page() -> Result<Rc<Page>, JsValue> {
    PAGE.with(|page| page.borrow().clone())
        .ok_or_else(|| JsValue::from_str("page bindings are not ready yet"))
}

fn to_js(err: UiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Ids arrive from inline handlers either as numbers or as quoted strings.
fn entity_id(value: &JsValue) -> UiResult<EntityId> {
    match (value.as_f64(), value.as_string()) {
        (Some(number), _) => parse_entity_id(&number.to_string()),
        (None, Some(text)) => parse_entity_id(&text),
        (None, None) => Err(UiError::InvalidId(format!("{value:?}"))),
    }
}

fn load_config(view: &DomView) -> UiConfig {
    let raw = view
        .document()
        .get_element_by_id(CONFIG_ELEMENT)
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    UiConfig::from_json(&raw).unwrap_or_else(|err| {
        web_sys::console::warn_1(&format!("{err}; using defaults").into());
        UiConfig::default()
    })
}

fn spawn_reported<F>(label: &'static str, task: F)
where
    F: Future<Output = UiResult<Completion>> + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        match task.await {
            Ok(done) => debug!(?done, "{label} finished"),
            Err(err) => debug!(error = %err, "{label} failed"),
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = wire_page() {
                web_sys::console::error_1(&err);
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        Ok(())
    } else {
        wire_page()
    }
}

fn wire_page() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let view = DomView::new(window, document);
    let config = load_config(&view);
    logging::init(&config.log_level);

    let tokens: DocumentTokens = CookieJar::new(
        config.token_cookie.clone(),
        dom::document_cookie as fn() -> String,
    );

    effects::watch_cards(&view, &config)?;
    effects::fade_modals(&view, &config)?;
    effects::pulse_submit_buttons(&view, &config)?;

    for role in FormRole::ALL {
        if let Some(controller) =
            FormController::install(&view, role, FetchTransport, tokens.clone(), &config)
        {
            bind_form(&view, Rc::new(controller))?;
        }
    }

    let page = Page {
        view,
        deletes: DeletionTrigger::new(FetchTransport, tokens, &config),
    };
    PAGE.with(|slot| *slot.borrow_mut() = Some(Rc::new(page)));
    info!("course page bindings ready");
    Ok(())
}

/// Routes the form's `submit` event to `controller`. The browser's own
/// submission is always cancelled; the controller decides what to send.
pub fn bind_form<T, S>(view: &DomView, controller: Rc<FormController<T, S>>) -> Result<(), JsValue>
where
    T: Transport + 'static,
    S: TokenSource + 'static,
{
    let form_id = controller.role().form_id();
    let form = view
        .document()
        .get_element_by_id(form_id)
        .ok_or_else(|| JsValue::from_str(form_id))?;
    let view = view.clone();
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let controller = controller.clone();
        let view = view.clone();
        spawn_reported("form submission", async move { controller.submit(&view).await });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

fn run_delete(target: DeleteTarget) -> Result<(), JsValue> {
    let page = current_page()?;
    spawn_reported("delete", async move { page.deletes.trigger(&page.view, target).await });
    Ok(())
}

fn populated(result: UiResult<()>) -> Result<(), JsValue> {
    result.map_err(|err| {
        warn!(error = %err, "edit modal not opened");
        to_js(err)
    })
}

#[wasm_bindgen(js_name = editCourse)]
pub fn edit_course(_course_id: JsValue, name: String, description: String) -> Result<(), JsValue> {
    let page = current_page()?;
    populated(modal::edit_course(&page.view, &name, &description))
}

#[wasm_bindgen(js_name = editLesson)]
pub fn edit_lesson(course_id: JsValue, lesson_id: JsValue) -> Result<(), JsValue> {
    let page = current_page()?;
    let course_id = entity_id(&course_id).map_err(to_js)?;
    let lesson_id = entity_id(&lesson_id).map_err(to_js)?;
    populated(modal::edit_lesson(&page.view, course_id, lesson_id))
}

#[wasm_bindgen(js_name = editReview)]
pub fn edit_review(course_id: JsValue, lesson_id: JsValue, review_id: JsValue) -> Result<(), JsValue> {
    let page = current_page()?;
    let course_id = entity_id(&course_id).map_err(to_js)?;
    let lesson_id = entity_id(&lesson_id).map_err(to_js)?;
    let review_id = entity_id(&review_id).map_err(to_js)?;
    populated(modal::edit_review(&page.view, course_id, lesson_id, review_id))
}

#[wasm_bindgen(js_name = deleteCourse)]
pub fn delete_course(course_id: JsValue) -> Result<(), JsValue> {
    run_delete(DeleteTarget::Course {
        course_id: entity_id(&course_id).map_err(to_js)?,
    })
}

#[wasm_bindgen(js_name = deleteLesson)]
pub fn delete_lesson(course_id: JsValue, lesson_id: JsValue) -> Result<(), JsValue> {
    run_delete(DeleteTarget::Lesson {
        course_id: entity_id(&course_id).map_err(to_js)?,
        lesson_id: entity_id(&lesson_id).map_err(to_js)?,
    })
}

#[wasm_bindgen(js_name = deleteReview)]
pub fn delete_review(course_id: JsValue, lesson_id: JsValue, review_id: JsValue) -> Result<(), JsValue> {
    run_delete(DeleteTarget::Review {
        course_id: entity_id(&course_id).map_err(to_js)?,
        lesson_id: entity_id(&lesson_id).map_err(to_js)?,
        review_id: entity_id(&review_id).map_err(to_js)?,
    })
}
