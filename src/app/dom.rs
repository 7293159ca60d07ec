//! Small DOM helpers shared by the screen modules.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::{AppError, AppResult};

pub fn window() -> AppResult<Window> {
    web_sys::window().ok_or(AppError::NoWindow)
}

pub fn document() -> AppResult<Document> {
    window()?.document().ok_or(AppError::NoDocument)
}

pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Element by id, cast to the requested type.
pub fn typed<T: JsCast>(id: &str, expected: &'static str) -> AppResult<T> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| AppError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| AppError::WrongElement {
            id: id.to_string(),
            expected,
        })
}

pub fn element(id: &str) -> AppResult<HtmlElement> {
    typed::<HtmlElement>(id, "HtmlElement")
}

pub fn set_hidden(id: &str, hidden: bool) -> AppResult<()> {
    element(id)?.set_hidden(hidden);
    Ok(())
}

pub fn set_display(el: &HtmlElement, value: &str) {
    let _ = el.style().set_property("display", value);
}

pub fn set_display_by_id(id: &str, value: &str) -> AppResult<()> {
    set_display(&element(id)?, value);
    Ok(())
}

/// `hidden` plus an explicit `display`, for controls whose stylesheet
/// display would otherwise override the attribute.
pub fn set_shown(id: &str, shown: bool, display: &str) -> AppResult<()> {
    let el = element(id)?;
    el.set_hidden(!shown);
    set_display(&el, if shown { display } else { "none" });
    Ok(())
}

pub fn create(doc: &Document, tag: &str, class: &str) -> AppResult<HtmlElement> {
    let el: HtmlElement = doc.create_element(tag)?.dyn_into().map_err(|_| AppError::WrongElement {
        id: tag.to_string(),
        expected: "HtmlElement",
    })?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Remove every child of the element with this id and return it.
pub fn cleared(id: &str) -> AppResult<HtmlElement> {
    let el = element(id)?;
    el.set_inner_html("");
    Ok(el)
}

/// Attach a listener for the lifetime of the page.
pub fn on<E>(target: &EventTarget, event: &str, mut handler: impl FnMut(E) + 'static) -> AppResult<()>
where
    E: JsCast + 'static,
{
    let closure = Closure::wrap(Box::new(move |evt: Event| {
        if let Ok(evt) = evt.dyn_into::<E>() {
            handler(evt);
        }
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_id<E>(id: &str, event: &str, handler: impl FnMut(E) + 'static) -> AppResult<()>
where
    E: JsCast + 'static,
{
    let el = element(id)?;
    on(&el, event, handler)
}

pub fn closest(target: Option<EventTarget>, selector: &str) -> Option<Element> {
    let start: Element = target?.dyn_into().ok()?;
    start.closest(selector).ok()?
}

/// For delegated listeners: the nearest element at or above the event
/// target carrying `data-<attr>`, with the attribute's value.
pub fn closest_data(target: Option<EventTarget>, attr: &str) -> Option<(Element, String)> {
    let name = format!("data-{attr}");
    let el = closest(target, &format!("[{name}]"))?;
    let value = el.get_attribute(&name)?;
    Some((el, value))
}

/// Run `f` once after `delay_ms`.
pub fn after(delay_ms: i32, f: impl FnOnce() + 'static) -> AppResult<()> {
    let cb = Closure::once_into_js(f);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms)?;
    Ok(())
}

/// Log glue failures from event handlers; there is nobody to return them to.
pub fn report(result: AppResult<()>) {
    if let Err(e) = result {
        log::warn!("{e}");
    }
}
