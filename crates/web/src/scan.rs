//! One pass over the document: assigns ids to animatable elements and
//! builds the [`SiteLayout`] the core runs against.

use std::collections::HashMap;

use anyhow::{Context, Result};
use folio_core::model::{CounterSpec, RevealSpec, SkillBarSpec};
use folio_core::{PageSpec, SiteLayout};
use folio_protocol::{ElementId, PageKey};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement};

use crate::attrs;
use crate::dom::{self, js_err};

pub struct ToastDom {
    pub root: Element,
    pub icon: Option<Element>,
    pub message: Option<Element>,
}

pub struct FormDom {
    pub form: HtmlFormElement,
    pub submit: Option<HtmlButtonElement>,
    /// Button markup restored when a send finishes.
    pub idle_label: String,
}

/// Handles to every element the renderer touches.
pub struct DomIndex {
    pub body: HtmlElement,
    pub pages: HashMap<PageKey, Element>,
    pub nav_links: Vec<(PageKey, Element)>,
    pub elements: HashMap<ElementId, HtmlElement>,
    pub nav: Option<Element>,
    pub nav_menu: Option<Element>,
    pub hamburger: Option<Element>,
    pub typed_text: Option<Element>,
    pub toast: Option<ToastDom>,
    pub theme_label: Option<Element>,
    pub form: Option<FormDom>,
}

impl DomIndex {
    pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        let el = self.elements.get(&id);
        if el.is_none() {
            warn!("no element registered as {id}");
        }
        el
    }
}

struct Ids(u32);

impl Ids {
    /// One id per DOM element: an element matched by several selectors
    /// keeps the id it was given first.
    fn assign(&mut self, el: &Element) -> Result<ElementId> {
        if let Some(id) = el
            .get_attribute(attrs::ELEMENT_ID_ATTR)
            .as_deref()
            .and_then(attrs::parse_element_id)
        {
            return Ok(id);
        }
        self.0 += 1;
        let id = ElementId(self.0);
        el.set_attribute(attrs::ELEMENT_ID_ATTR, &id.0.to_string())
            .map_err(js_err)?;
        Ok(id)
    }
}

pub fn scan(document: &Document) -> Result<(SiteLayout, DomIndex)> {
    let root = document
        .document_element()
        .context("document has no root element")?;
    let body = document.body().context("document has no body")?;

    let mut ids = Ids(0);
    let mut elements = HashMap::new();
    let mut pages = HashMap::new();
    let mut specs = Vec::new();

    for page in dom::query_all::<Element>(&root, attrs::PAGE_SELECTOR)? {
        let key = page.id();
        if key.is_empty() {
            warn!("skipping page section without an id");
            continue;
        }
        let key = PageKey::new(key);
        let mut spec = PageSpec::new(key.clone());

        for el in dom::query_all::<HtmlElement>(&page, attrs::REVEAL_SELECTOR)? {
            let id = ids.assign(&el)?;
            let delay_ms = attrs::parse_delay(el.get_attribute("data-delay").as_deref());
            spec.reveals.push(RevealSpec { id, delay_ms });
            elements.insert(id, el);
        }
        for el in dom::query_all::<HtmlElement>(&page, attrs::COUNTER_SELECTOR)? {
            let raw = el.get_attribute("data-count").unwrap_or_default();
            let Some(target) = attrs::parse_count(&raw) else {
                warn!(page = %key, "data-count {raw:?} is not a number");
                continue;
            };
            let id = ids.assign(&el)?;
            let suffix = el.get_attribute("data-suffix").unwrap_or_default();
            spec.counters.push(CounterSpec { id, target, suffix });
            elements.insert(id, el);
        }
        for el in dom::query_all::<HtmlElement>(&page, attrs::SKILL_FILL_SELECTOR)? {
            let id = ids.assign(&el)?;
            let width = attrs::skill_width(el.get_attribute("data-width").as_deref());
            spec.skill_bars.push(SkillBarSpec { id, width });
            elements.insert(id, el);
        }

        debug!(
            page = %key,
            reveals = spec.reveals.len(),
            counters = spec.counters.len(),
            skill_bars = spec.skill_bars.len(),
            "scanned page"
        );
        specs.push(spec);
        pages.insert(key, page);
    }

    let nav_links: Vec<(PageKey, Element)> =
        dom::query_all::<Element>(&root, attrs::NAV_LINK_SELECTOR)?
            .into_iter()
            .filter_map(|a| Some((PageKey::new(a.get_attribute("data-page")?), a)))
            .collect();

    let hamburger = dom::query::<Element>(&root, attrs::HAMBURGER_SELECTOR);
    let theme_toggle = dom::by_id(document, attrs::THEME_TOGGLE_ID);
    // Plain markup controls join the shared click table.
    for (el, action) in [(&hamburger, "toggle-menu"), (&theme_toggle, "toggle-theme")] {
        if let Some(el) = el
            && !el.has_attribute("data-action")
        {
            el.set_attribute("data-action", action).map_err(js_err)?;
        }
    }

    let typed_text = dom::by_id(document, attrs::TYPED_TEXT_ID);
    let layout = SiteLayout {
        pages: specs,
        nav_links: nav_links.iter().map(|(k, _)| k.clone()).collect(),
        has_typing_target: typed_text.is_some(),
    };

    let toast = dom::by_id(document, attrs::TOAST_ID).map(|root| ToastDom {
        root,
        icon: dom::by_id(document, attrs::TOAST_ICON_ID),
        message: dom::by_id(document, attrs::TOAST_MESSAGE_ID),
    });

    let form = dom::by_id(document, attrs::CONTACT_FORM_ID)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        .map(|form| {
            let submit = dom::query::<HtmlButtonElement>(&form, attrs::SUBMIT_SELECTOR);
            let idle_label = submit.as_ref().map(|b| b.inner_html()).unwrap_or_default();
            FormDom {
                form,
                submit,
                idle_label,
            }
        });

    let index = DomIndex {
        body,
        pages,
        nav_links,
        elements,
        nav: dom::query::<Element>(&root, attrs::NAV_SELECTOR),
        nav_menu: dom::query::<Element>(&root, attrs::NAV_MENU_SELECTOR),
        hamburger,
        typed_text,
        toast,
        theme_label: dom::by_id(document, attrs::THEME_LABEL_ID),
        form,
    };
    Ok((layout, index))
}
