use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, IntersectionObserver, IntersectionObserverEntry, NodeList};

use crate::animator::VisibilityAnimator;
use crate::config::UiConfig;
use crate::web::dom::{submit_button, DomView};

const REVEAL_KEY: &str = "data-reveal-key";

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn select_all(view: &DomView, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(view.document().query_selector_all(selector)?))
}

/// Watches every card and adds the reveal class the first time it scrolls
/// into view.
pub fn watch_cards(view: &DomView, config: &UiConfig) -> Result<(), JsValue> {
    let cards = select_all(view, &config.card_selector)?;
    if cards.is_empty() {
        return Ok(());
    }

    let animator = Rc::new(RefCell::new(VisibilityAnimator::<usize>::new()));
    let reveal_class = config.reveal_class.clone();
    let tracked = animator.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let reports: Vec<(usize, bool, Element)> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let target = entry.target();
                    let key = target.get_attribute(REVEAL_KEY)?.parse::<usize>().ok()?;
                    Some((key, entry.is_intersecting(), target))
                })
                .collect();
            let revealed = tracked
                .borrow_mut()
                .observe(reports.iter().map(|(key, visible, _)| (*key, *visible)));
            for (key, _, target) in &reports {
                if revealed.contains(key) {
                    let _ = target.class_list().add_1(&reveal_class);
                    observer.unobserve(target);
                }
            }
        },
    );
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    callback.forget();

    for (key, card) in cards.iter().enumerate() {
        card.set_attribute(REVEAL_KEY, &key.to_string())?;
        animator.borrow_mut().register(key);
        observer.observe(card);
    }
    info!(cards = cards.len(), "watching cards for first appearance");
    Ok(())
}

/// Fades modals in when the UI toolkit announces them.
pub fn fade_modals(view: &DomView, config: &UiConfig) -> Result<(), JsValue> {
    for modal in select_all(view, &config.modal_selector)? {
        let target = modal.clone();
        let class = config.reveal_class.clone();
        let on_show = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let _ = target.class_list().add_1(&class);
        });
        modal.add_event_listener_with_callback("show.bs.modal", on_show.as_ref().unchecked_ref())?;
        on_show.forget();
    }
    Ok(())
}

/// Pulses the submit button of every form on submit, then clears the pulse
/// after `pulse_ms`.
pub fn pulse_submit_buttons(view: &DomView, config: &UiConfig) -> Result<(), JsValue> {
    for form in select_all(view, "form")? {
        let window = view.window().clone();
        let target = form.clone();
        let classes = config.pulse_classes.clone();
        let pulse_ms = i32::try_from(config.pulse_ms).unwrap_or(i32::MAX);
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let Some(button) = submit_button(&target) else {
                return;
            };
            for class in &classes {
                let _ = button.class_list().add_1(class);
            }
            let clear_classes = classes.clone();
            let clear = Closure::once_into_js(move || {
                for class in &clear_classes {
                    let _ = button.class_list().remove_1(class);
                }
            });
            if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                clear.unchecked_ref(),
                pulse_ms,
            ) {
                debug!(error = ?err, "could not schedule pulse reset");
            }
        });
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();
    }
    Ok(())
}
