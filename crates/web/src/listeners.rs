//! DOM listeners that translate browser events into core actions.

use std::rc::{Rc, Weak};

use anyhow::Result;
use folio_core::actions::CLICK_BINDINGS;
use folio_core::{Action, Event, FieldInput, click_action, click_selector};
use gloo_events::{EventListener, EventListenerOptions};
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::attrs;
use crate::dom;
use crate::runtime::Runtime;

/// Install every listener. The returned handles must be kept alive.
pub fn install(rt: &Rc<Runtime>, document: &Document) -> Result<Vec<EventListener>> {
    let mut listeners = vec![
        on_click(rt, document),
        on_window(rt, "popstate", |rt| Action::HistoryPopped {
            fragment: rt.window.location().hash().unwrap_or_default(),
        }),
        on_window(rt, "scroll", |rt| Action::Scrolled {
            y: rt.window.scroll_y().unwrap_or(0.0),
        }),
    ];
    if let Some(form) = &rt.dom.form {
        for control in dom::query_all::<Element>(&form.form, attrs::FORM_CONTROL_SELECTOR)? {
            if control.get_attribute("name").is_none() {
                continue;
            }
            listeners.push(on_field(rt, &control, "blur", Action::FieldBlurred));
            listeners.push(on_field(rt, &control, "input", Action::FieldEdited));
        }
        let weak = Rc::downgrade(rt);
        listeners.push(EventListener::new_with_options(
            &form.form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let Some(rt) = weak.upgrade() else { return };
                let fields = rt
                    .dom
                    .form
                    .as_ref()
                    .map(|f| read_fields(&f.form))
                    .unwrap_or_default();
                rt.dispatch(Action::SubmitForm(fields).into());
            },
        ));
    }
    Ok(listeners)
}

fn on_click(rt: &Rc<Runtime>, document: &Document) -> EventListener {
    let weak = Rc::downgrade(rt);
    let selector = click_selector();
    EventListener::new_with_options(
        document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(rt) = weak.upgrade() else { return };
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if let Some(action) = clicked_action(&target, &selector) {
                if matches!(action, Action::Navigate { .. }) {
                    event.prevent_default();
                }
                rt.dispatch(action.into());
            }
            if !matches!(target.closest(attrs::NAV_SELECTOR), Ok(Some(_))) {
                rt.dispatch(Action::ClickOutsideNav.into());
            }
        },
    )
}

/// Walk up from the click target to the nearest element the click table
/// knows, then resolve the first binding whose selector it matches.
fn clicked_action(target: &Element, selector: &str) -> Option<Action> {
    let el = target.closest(selector).ok().flatten()?;
    CLICK_BINDINGS.iter().find_map(|binding| {
        if !el.matches(&binding.selector()).unwrap_or(false) {
            return None;
        }
        let value = el.get_attribute(binding.attribute)?;
        trace!(attribute = binding.attribute, %value, "click");
        click_action(binding.attribute, &value)
    })
}

fn on_window(
    rt: &Rc<Runtime>,
    event_type: &'static str,
    read: fn(&Runtime) -> Action,
) -> EventListener {
    let weak: Weak<Runtime> = Rc::downgrade(rt);
    EventListener::new(&rt.window, event_type, move |_| {
        if let Some(rt) = weak.upgrade() {
            rt.dispatch(Event::Action(read(&rt)));
        }
    })
}

fn on_field(
    rt: &Rc<Runtime>,
    control: &Element,
    event_type: &'static str,
    action: fn(FieldInput) -> Action,
) -> EventListener {
    let weak = Rc::downgrade(rt);
    let target = control.clone();
    EventListener::new(control, event_type, move |_| {
        let Some(rt) = weak.upgrade() else { return };
        if let Some(field) = read_field(&target) {
            rt.dispatch(action(field).into());
        }
    })
}

fn read_fields(form: &Element) -> Vec<FieldInput> {
    dom::query_all::<Element>(form, attrs::FORM_CONTROL_SELECTOR)
        .unwrap_or_default()
        .iter()
        .filter_map(read_field)
        .collect()
}

fn read_field(el: &Element) -> Option<FieldInput> {
    let name = el.get_attribute("name")?;
    let value = if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        return None;
    };
    Some(FieldInput::new(name, value, el.has_attribute("required")))
}
