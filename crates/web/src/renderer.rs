use std::rc::Rc;

use folio_core::Event;
use folio_protocol::{DomCommand, FieldState, Theme};
use tracing::{debug, warn};
use wasm_bindgen::JsValue;
use web_sys::{Element, ScrollBehavior, ScrollToOptions};

use crate::attrs;
use crate::dom::{self, js_err};
use crate::emailjs;
use crate::runtime::Runtime;

/// Apply one command to the document.
pub fn render(rt: &Rc<Runtime>, command: DomCommand) {
    let index = &rt.dom;
    match command {
        DomCommand::SetPageVisible { page, visible } => {
            if let Some(el) = index.pages.get(&page) {
                dom::set_class(el, attrs::ACTIVE_CLASS, visible);
            }
        }
        DomCommand::SetNavActive { page, active } => {
            for (_, link) in index.nav_links.iter().filter(|(k, _)| *k == page) {
                dom::set_class(link, attrs::ACTIVE_CLASS, active);
            }
        }
        DomCommand::ScrollToTop { smooth } => {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(if smooth {
                ScrollBehavior::Smooth
            } else {
                ScrollBehavior::Auto
            });
            rt.window.scroll_to_with_scroll_to_options(&options);
        }
        DomCommand::PushHistory { page } => {
            let pushed = rt.window.history().and_then(|h| {
                h.push_state_with_url(&JsValue::NULL, "", Some(&page.fragment()))
            });
            if let Err(e) = pushed {
                warn!("pushState {page}: {}", js_err(e));
            }
        }
        DomCommand::SetMenuOpen { open } => {
            for el in [&index.nav_menu, &index.hamburger].into_iter().flatten() {
                dom::set_class(el, attrs::OPEN_CLASS, open);
            }
        }
        DomCommand::SetNavScrolled { scrolled } => {
            if let Some(nav) = &index.nav {
                dom::set_class(nav, attrs::SCROLLED_CLASS, scrolled);
            }
        }
        DomCommand::Observe { element, kind } => {
            if let (Some(el), Some(observer)) = (index.element(element), rt.observer(kind)) {
                observer.observe(el);
            }
        }
        DomCommand::Unobserve { element, kind } => {
            if let (Some(el), Some(observer)) = (index.element(element), rt.observer(kind)) {
                observer.unobserve(el);
            }
        }
        DomCommand::Reveal { element } => {
            if let Some(el) = index.element(element) {
                dom::set_class(el, attrs::VISIBLE_CLASS, true);
            }
        }
        DomCommand::SetCounterText { element, text } => {
            if let Some(el) = index.element(element) {
                el.set_text_content(Some(&text));
            }
        }
        DomCommand::RequestFrame { element } => rt.request_frame(element),
        DomCommand::SetSkillWidth { element, width } => {
            if let Some(el) = index.element(element) {
                dom::set_style(el, "width", &width);
            }
        }
        DomCommand::SetTypedText { text } => {
            if let Some(el) = &index.typed_text {
                el.set_text_content(Some(&text));
            }
        }
        DomCommand::ScheduleTimer { timer, delay_ms } => rt.schedule(timer, delay_ms),
        DomCommand::CancelTimer { timer } => rt.cancel(timer),
        DomCommand::ApplyTheme { theme } => {
            dom::set_class(&index.body, Theme::LIGHT_CLASS, theme == Theme::Light);
            if let Some(label) = &index.theme_label {
                label.set_text_content(Some(theme.label()));
            }
        }
        DomCommand::PersistTheme { key, theme } => match dom::local_storage(&rt.window) {
            Some(storage) => {
                if let Err(e) = storage.set_item(&key, theme.as_str()) {
                    warn!("saving theme: {}", js_err(e));
                }
            }
            None => debug!("no localStorage; theme not saved"),
        },
        DomCommand::SetFieldState { field, state } => set_field_state(rt, &field, &state),
        DomCommand::ResetForm => {
            if let Some(form) = &index.form {
                form.form.reset();
            }
        }
        DomCommand::SetSubmitBusy { busy } => {
            let Some(form) = &index.form else { return };
            if let Some(button) = &form.submit {
                button.set_disabled(busy);
                button.set_inner_html(if busy { attrs::SENDING_HTML } else { &form.idle_label });
            }
        }
        DomCommand::SendMessage { payload } => {
            let rt = Rc::clone(rt);
            wasm_bindgen_futures::spawn_local(async move {
                let contact = &rt.config.contact;
                let result = emailjs::send(&contact.service_id, &contact.template_id, &payload)
                    .await
                    .map_err(|e| format!("{e:#}"));
                rt.dispatch(Event::DispatchFinished(result));
            });
        }
        DomCommand::ShowToast { message, kind } => {
            if let Some(toast) = &index.toast {
                toast.root.set_class_name(&format!("toast {}", kind.class()));
                if let Some(icon) = &toast.icon {
                    icon.set_text_content(Some(kind.icon()));
                }
                if let Some(msg) = &toast.message {
                    msg.set_text_content(Some(&message));
                }
                dom::set_class(&toast.root, attrs::SHOW_CLASS, true);
            }
        }
        DomCommand::HideToast => {
            if let Some(toast) = &index.toast {
                dom::set_class(&toast.root, attrs::SHOW_CLASS, false);
            }
        }
    }
}

fn set_field_state(rt: &Runtime, field: &str, state: &FieldState) {
    let Some(form) = &rt.dom.form else { return };
    let Some(control) = dom::query::<Element>(&form.form, &attrs::control_selector(field)) else {
        warn!("no form control named {field:?}");
        return;
    };
    let Ok(Some(group)) = control.closest(attrs::FORM_GROUP_SELECTOR) else {
        return;
    };
    dom::set_class(&group, attrs::ERROR_CLASS, state.is_error());
    dom::set_class(&group, attrs::SUCCESS_CLASS, *state == FieldState::Success);
    if let Some(slot) = dom::query::<Element>(&group, attrs::FIELD_ERROR_SELECTOR) {
        let text = match state {
            FieldState::Error(message) => message.as_str(),
            _ => "",
        };
        slot.set_text_content(Some(text));
    }
}
