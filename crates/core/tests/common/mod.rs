//! A fake browser that applies `DomCommand`s to an in-memory document and
//! drives timers and animation frames from a virtual clock.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};

use folio_core::{App, Event, PageSpec, SiteConfig, SiteLayout};
use folio_protocol::{
    DomCommand, ElementId, FieldState, MessagePayload, ObserverKind, PageKey, Theme, TimerId,
    ToastKind,
};

/// Frame interval of the simulated display.
pub const FRAME_MS: f64 = 16.0;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Four pages. Ids: reveals 1..=5, counters 10/11 on home, skill bars 20/21
/// on skills.
pub fn sample_layout() -> SiteLayout {
    SiteLayout {
        pages: vec![
            PageSpec::new("home")
                .reveal(1, 0)
                .reveal(2, 150)
                .counter(10, 100, "")
                .counter(11, 50, "+"),
            PageSpec::new("about").reveal(3, 0),
            PageSpec::new("skills")
                .reveal(4, 0)
                .skill_bar(20, "90%")
                .skill_bar(21, "75%"),
            PageSpec::new("contact").reveal(5, 0),
        ],
        nav_links: ["home", "about", "skills", "contact"]
            .into_iter()
            .map(PageKey::from)
            .collect(),
        has_typing_target: true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<T> {
    pub at: f64,
    pub value: T,
}

pub struct Browser {
    pub app: App,
    config: SiteConfig,
    layout: SiteLayout,
    pub now: f64,
    timers: Vec<(f64, TimerId)>,
    frames: Vec<ElementId>,
    pub observed: HashSet<(ElementId, ObserverKind)>,
    pub observe_calls: usize,
    pub pages: BTreeMap<PageKey, bool>,
    pub nav_active: BTreeMap<PageKey, bool>,
    pub history: Vec<PageKey>,
    pub scrolls_to_top: usize,
    pub menu_open: bool,
    pub nav_scrolled: bool,
    pub revealed: HashMap<ElementId, usize>,
    pub counter_text: HashMap<ElementId, Vec<Stamped<String>>>,
    pub skill_width: HashMap<ElementId, Vec<String>>,
    pub typed: Vec<Stamped<String>>,
    pub body_light: bool,
    pub theme_label: String,
    pub storage: HashMap<String, String>,
    pub fields: HashMap<String, FieldState>,
    pub form_resets: usize,
    pub submit_busy: bool,
    pub sent: Vec<MessagePayload>,
    pub toasts: Vec<(String, ToastKind)>,
    pub toast_visible: bool,
}

impl Browser {
    pub fn new(config: SiteConfig, layout: SiteLayout) -> Self {
        Self::with_storage(config, layout, HashMap::new())
    }

    pub fn with_storage(
        config: SiteConfig,
        layout: SiteLayout,
        storage: HashMap<String, String>,
    ) -> Self {
        init_tracing();
        let app = App::new(config.clone(), layout.clone()).expect("valid layout");
        Self {
            app,
            config,
            layout,
            now: 0.0,
            timers: Vec::new(),
            frames: Vec::new(),
            observed: HashSet::new(),
            observe_calls: 0,
            pages: BTreeMap::new(),
            nav_active: BTreeMap::new(),
            history: Vec::new(),
            scrolls_to_top: 0,
            menu_open: false,
            nav_scrolled: false,
            revealed: HashMap::new(),
            counter_text: HashMap::new(),
            skill_width: HashMap::new(),
            typed: Vec::new(),
            body_light: false,
            theme_label: "Dark".into(),
            storage,
            fields: HashMap::new(),
            form_resets: 0,
            submit_busy: false,
            sent: Vec::new(),
            toasts: Vec::new(),
            toast_visible: false,
        }
    }

    pub fn sample() -> Self {
        Self::new(SiteConfig::default(), sample_layout())
    }

    pub fn boot(&mut self, fragment: &str) {
        let saved_theme = self.storage.get(&self.config.theme_storage_key).cloned();
        self.send(Event::Boot {
            fragment: fragment.into(),
            saved_theme,
        });
    }

    /// Throw the app away and boot a fresh one that sees the same storage.
    pub fn reload(self, fragment: &str) -> Self {
        let mut fresh = Self::with_storage(self.config, self.layout, self.storage);
        fresh.boot(fragment);
        fresh
    }

    pub fn send(&mut self, event: Event) {
        let commands = self.app.handle(event);
        for command in commands {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: DomCommand) {
        match command {
            DomCommand::SetPageVisible { page, visible } => {
                self.pages.insert(page, visible);
            }
            DomCommand::SetNavActive { page, active } => {
                self.nav_active.insert(page, active);
            }
            DomCommand::ScrollToTop { .. } => self.scrolls_to_top += 1,
            DomCommand::PushHistory { page } => self.history.push(page),
            DomCommand::SetMenuOpen { open } => self.menu_open = open,
            DomCommand::SetNavScrolled { scrolled } => self.nav_scrolled = scrolled,
            DomCommand::Observe { element, kind } => {
                self.observe_calls += 1;
                self.observed.insert((element, kind));
            }
            DomCommand::Unobserve { element, kind } => {
                self.observed.remove(&(element, kind));
            }
            DomCommand::Reveal { element } => {
                *self.revealed.entry(element).or_default() += 1;
            }
            DomCommand::SetCounterText { element, text } => {
                self.counter_text.entry(element).or_default().push(Stamped {
                    at: self.now,
                    value: text,
                });
            }
            DomCommand::RequestFrame { element } => self.frames.push(element),
            DomCommand::SetSkillWidth { element, width } => {
                self.skill_width.entry(element).or_default().push(width);
            }
            DomCommand::SetTypedText { text } => self.typed.push(Stamped {
                at: self.now,
                value: text,
            }),
            DomCommand::ScheduleTimer { timer, delay_ms } => {
                self.timers.push((self.now + f64::from(delay_ms), timer));
            }
            DomCommand::CancelTimer { timer } => self.timers.retain(|(_, t)| *t != timer),
            DomCommand::ApplyTheme { theme } => {
                self.body_light = theme == Theme::Light;
                self.theme_label = theme.label().into();
            }
            DomCommand::PersistTheme { key, theme } => {
                self.storage.insert(key, theme.as_str().into());
            }
            DomCommand::SetFieldState { field, state } => {
                self.fields.insert(field, state);
            }
            DomCommand::ResetForm => self.form_resets += 1,
            DomCommand::SetSubmitBusy { busy } => self.submit_busy = busy,
            DomCommand::SendMessage { payload } => self.sent.push(payload),
            DomCommand::ShowToast { message, kind } => {
                self.toasts.push((message, kind));
                self.toast_visible = true;
            }
            DomCommand::HideToast => self.toast_visible = false,
        }
    }

    /// Move the clock forward, firing due timers in order and delivering
    /// animation frames every `FRAME_MS`.
    pub fn advance(&mut self, ms: f64) {
        let target = self.now + ms;
        while self.now < target {
            self.now = (self.now + FRAME_MS).min(target);
            self.fire_due_timers();
            let frames = std::mem::take(&mut self.frames);
            for element in frames {
                self.send(Event::AnimationFrame {
                    element,
                    now_ms: self.now,
                });
            }
        }
    }

    fn fire_due_timers(&mut self) {
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, (due, _))| *due <= self.now)
                .min_by(|a, b| a.1.0.total_cmp(&b.1.0).then(a.1.1.cmp(&b.1.1)))
                .map(|(i, _)| i);
            let Some(i) = next else {
                break;
            };
            let (_, timer) = self.timers.remove(i);
            self.send(Event::TimerFired(timer));
        }
    }

    /// Report an element as visible to every observer watching it.
    /// Elements that are not observed produce nothing.
    pub fn scroll_into_view(&mut self, id: u32) {
        for kind in ObserverKind::ALL {
            if self.is_observed(id, kind) {
                self.intersect(id, kind);
            }
        }
    }

    /// Deliver one observer's callback even if the element was unobserved,
    /// as a late queued entry would.
    pub fn intersect(&mut self, id: u32, kind: ObserverKind) {
        self.send(Event::Intersected {
            element: ElementId(id),
            kind,
            now_ms: self.now,
        });
    }

    pub fn is_observed(&self, id: u32, kind: ObserverKind) -> bool {
        self.observed.contains(&(ElementId(id), kind))
    }

    /// Observed by any observer.
    pub fn observing(&self, id: u32) -> bool {
        ObserverKind::ALL.into_iter().any(|k| self.is_observed(id, k))
    }

    pub fn visible_pages(&self) -> Vec<&str> {
        self.pages
            .iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn active_links(&self) -> Vec<&str> {
        self.nav_active
            .iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn last_counter_text(&self, id: u32) -> Option<&str> {
        self.counter_text
            .get(&ElementId(id))
            .and_then(|v| v.last())
            .map(|s| s.value.as_str())
    }

    pub fn last_toast(&self) -> Option<&(String, ToastKind)> {
        self.toasts.last()
    }

    pub fn armed_timers(&self) -> HashSet<TimerId> {
        self.timers.iter().map(|(_, t)| *t).collect()
    }
}
