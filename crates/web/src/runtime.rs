use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use anyhow::{Context, Result};
use folio_core::{App, Event, SiteConfig};
use folio_protocol::{ObserverKind, TimerId};
use gloo_events::EventListener;
use js_sys::Array;
use tracing::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::attrs;
use crate::dom::{self, js_err};
use crate::listeners;
use crate::renderer;
use crate::scan::{self, DomIndex};

/// Browser-side state: the core app plus every handle its commands need.
pub struct Runtime {
    pub window: Window,
    pub dom: DomIndex,
    pub config: SiteConfig,
    app: RefCell<App>,
    timers: RefCell<HashMap<TimerId, i32>>,
    observers: RefCell<HashMap<ObserverKind, IntersectionObserver>>,
    listeners: RefCell<Vec<EventListener>>,
}

pub fn boot() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    install_spin_keyframes(&document)?;

    let config = load_config(&document);
    let (layout, index) = scan::scan(&document)?;
    let app = App::new(config.clone(), layout).context("page layout is inconsistent")?;

    let rt = Rc::new(Runtime {
        window,
        dom: index,
        config,
        app: RefCell::new(app),
        timers: RefCell::new(HashMap::new()),
        observers: RefCell::new(HashMap::new()),
        listeners: RefCell::new(Vec::new()),
    });
    rt.install_observers()?;
    let installed = listeners::install(&rt, &document)?;
    rt.listeners.borrow_mut().extend(installed);

    let fragment = rt.window.location().hash().unwrap_or_default();
    let saved_theme = dom::local_storage(&rt.window)
        .and_then(|s| s.get_item(&rt.config.theme_storage_key).ok().flatten());
    info!(fragment = %fragment, "folio started");
    rt.dispatch(Event::Boot {
        fragment,
        saved_theme,
    });
    Ok(())
}

/// Defaults, overridden by a JSON block in `<script id="folio-config">`.
fn load_config(document: &Document) -> SiteConfig {
    let Some(json) = dom::by_id(document, attrs::CONFIG_ID).and_then(|el| el.text_content()) else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            error!("ignoring #{}: {e}", attrs::CONFIG_ID);
            SiteConfig::default()
        }
    }
}

fn install_spin_keyframes(document: &Document) -> Result<()> {
    let style = document.create_element("style").map_err(js_err)?;
    style.set_text_content(Some(attrs::SPIN_KEYFRAMES));
    let head = document.head().context("document has no head")?;
    head.append_child(&style).map_err(js_err)?;
    Ok(())
}

impl Runtime {
    /// Feed one event through the app and render what it asks for.
    pub fn dispatch(self: &Rc<Self>, event: Event) {
        let commands = self.app.borrow_mut().handle(event);
        for command in commands {
            renderer::render(self, command);
        }
    }

    pub fn now(&self) -> f64 {
        self.window.performance().map_or(0.0, |p| p.now())
    }

    pub fn schedule(self: &Rc<Self>, timer: TimerId, delay_ms: u32) {
        let weak = Rc::downgrade(self);
        let callback = Closure::once_into_js(move || {
            if let Some(rt) = weak.upgrade() {
                rt.timers.borrow_mut().remove(&timer);
                rt.dispatch(Event::TimerFired(timer));
            }
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => {
                self.timers.borrow_mut().insert(timer, handle);
            }
            Err(e) => error!("setTimeout failed for {timer:?}: {}", js_err(e)),
        }
    }

    pub fn cancel(&self, timer: TimerId) {
        if let Some(handle) = self.timers.borrow_mut().remove(&timer) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    pub fn request_frame(self: &Rc<Self>, element: folio_protocol::ElementId) {
        let weak = Rc::downgrade(self);
        let callback = Closure::once_into_js(move |now: f64| {
            if let Some(rt) = weak.upgrade() {
                rt.dispatch(Event::AnimationFrame {
                    element,
                    now_ms: now,
                });
            }
        });
        if let Err(e) = self.window.request_animation_frame(callback.unchecked_ref()) {
            error!("requestAnimationFrame failed: {}", js_err(e));
        }
    }

    pub fn observer(&self, kind: ObserverKind) -> Option<IntersectionObserver> {
        self.observers.borrow().get(&kind).cloned()
    }

    fn install_observers(self: &Rc<Self>) -> Result<()> {
        for kind in ObserverKind::ALL {
            let options = self.config.observers.options(kind);
            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(options.threshold));
            init.set_root_margin(&options.root_margin);

            let weak: Weak<Self> = Rc::downgrade(self);
            let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, _observer: IntersectionObserver| {
                    let Some(rt) = weak.upgrade() else { return };
                    for entry in entries.iter() {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let raw = entry.target().get_attribute(attrs::ELEMENT_ID_ATTR);
                        let Some(element) = raw.as_deref().and_then(attrs::parse_element_id) else {
                            warn!("{kind:?} observer saw an unregistered element");
                            continue;
                        };
                        rt.dispatch(Event::Intersected {
                            element,
                            kind,
                            now_ms: rt.now(),
                        });
                    }
                },
            );
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                    .map_err(js_err)
                    .with_context(|| format!("creating {kind:?} observer"))?;
            // Observers live as long as the page.
            callback.forget();
            debug!(?kind, threshold = options.threshold, "observer installed");
            self.observers.borrow_mut().insert(kind, observer);
        }
        Ok(())
    }
}
