use anyhow::{Context, Result, anyhow};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

/// `JsValue` errors carry no `std::error::Error` impl; render them for anyhow.
pub fn js_err(value: JsValue) -> anyhow::Error {
    anyhow!("{value:?}")
}

pub fn window() -> Result<Window> {
    web_sys::window().context("no global window")
}

pub fn document(window: &Window) -> Result<Document> {
    window.document().context("window has no document")
}

pub fn by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

/// All elements under `root` matching `selector`, in document order.
pub fn query_all<T: JsCast>(root: &Element, selector: &str) -> Result<Vec<T>> {
    let list = root
        .query_selector_all(selector)
        .map_err(js_err)
        .with_context(|| format!("bad selector {selector:?}"))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

pub fn query<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(e) = el.class_list().toggle_with_force(class, on) {
        tracing::warn!("class {class:?}: {}", js_err(e));
    }
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        tracing::warn!("style {property}: {}", js_err(e));
    }
}

/// `localStorage`, or `None` when the browser denies access.
pub fn local_storage(window: &Window) -> Option<web_sys::Storage> {
    window.local_storage().ok().flatten()
}
