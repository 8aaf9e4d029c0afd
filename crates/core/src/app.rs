use folio_protocol::{DomCommand, ElementId, ObserverKind, PageKey, Theme};
use tracing::{debug, warn};

use crate::actions::Action;
use crate::animate::{CounterAnimator, RevealAnimator, SkillBarAnimator, TypingLooper};
use crate::config::SiteConfig;
use crate::effects::{Effects, TimerTask};
use crate::form::ContactForm;
use crate::model::{LayoutError, SiteLayout};
use crate::router::{NavBar, NavSource, Router};
use crate::theme::ThemeController;
use crate::toast::Toaster;

/// Everything the shell reports to the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Document loaded. Carries the location fragment and the stored theme.
    Boot {
        fragment: String,
        saved_theme: Option<String>,
    },
    Action(Action),
    TimerFired(folio_protocol::TimerId),
    /// An element crossed the threshold of the observer of `kind`.
    Intersected {
        element: ElementId,
        kind: ObserverKind,
        now_ms: f64,
    },
    AnimationFrame { element: ElementId, now_ms: f64 },
    /// Outcome of the last `SendMessage`.
    DispatchFinished(Result<(), String>),
}

impl From<Action> for Event {
    fn from(action: Action) -> Self {
        Event::Action(action)
    }
}

/// Application state. One instance per page load; the shell feeds it events
/// and applies the commands it returns.
#[derive(Debug)]
pub struct App {
    router: Router,
    nav: NavBar,
    reveal: RevealAnimator,
    counters: CounterAnimator,
    skill_bars: SkillBarAnimator,
    typing: TypingLooper,
    form: ContactForm,
    toaster: Toaster,
    theme: ThemeController,
    fx: Effects,
    booted: bool,
}

impl App {
    pub fn new(config: SiteConfig, layout: SiteLayout) -> Result<Self, LayoutError> {
        layout.validate(&config.home_page)?;
        let timings = config.timings;

        let reveal = RevealAnimator::new(
            layout
                .pages
                .iter()
                .map(|p| (&p.key, p.reveals.as_slice())),
        );
        let counters = CounterAnimator::new(
            layout
                .pages
                .iter()
                .map(|p| (&p.key, p.counters.as_slice())),
            timings.counter_ms,
        );
        let skill_bars = SkillBarAnimator::new(
            layout
                .pages
                .iter()
                .map(|p| (&p.key, p.skill_bars.as_slice())),
            timings.skill_bar_ms,
        );
        let router = Router::new(
            layout.pages.iter().map(|p| p.key.clone()).collect(),
            layout.nav_links,
            config.home_page,
            config.skills_page,
            timings.settle_ms,
        );

        Ok(Self {
            router,
            nav: NavBar::new(config.nav_scroll_threshold),
            reveal,
            counters,
            skill_bars,
            toaster: Toaster::new(timings.toast_ms),
            typing: TypingLooper::new(config.roles, timings, layout.has_typing_target),
            form: ContactForm::new(config.contact),
            theme: ThemeController::new(config.theme_storage_key),
            fx: Effects::new(),
            booted: false,
        })
    }

    /// Run one event to completion and return the commands it produced.
    pub fn handle(&mut self, event: Event) -> Vec<DomCommand> {
        match event {
            Event::Boot {
                fragment,
                saved_theme,
            } => self.boot(&fragment, saved_theme.as_deref()),
            Event::Action(action) => self.dispatch(action),
            Event::TimerFired(timer) => match self.fx.take_timer(timer) {
                Some(task) => self.run_task(timer, task),
                None => debug!(?timer, "stale timer"),
            },
            Event::Intersected {
                element,
                kind,
                now_ms,
            } => self.intersected(element, kind, now_ms),
            Event::AnimationFrame { element, now_ms } => {
                self.counters.frame(element, now_ms, &mut self.fx);
            }
            Event::DispatchFinished(result) => {
                self.form.finished(result, &mut self.toaster, &mut self.fx);
            }
        }
        self.fx.drain()
    }

    fn boot(&mut self, fragment: &str, saved_theme: Option<&str>) {
        if self.booted {
            warn!("duplicate boot ignored");
            return;
        }
        self.booted = true;
        self.theme.restore(saved_theme, &mut self.fx);
        self.router.restore(fragment, &mut self.fx);
    }

    fn dispatch(&mut self, action: Action) {
        let fx = &mut self.fx;
        match action {
            Action::Navigate { page, source } => {
                self.router.navigate(&page, fx);
                if source == NavSource::NavLink {
                    self.nav.close_menu(fx);
                }
            }
            Action::HistoryPopped { fragment } => self.router.restore(&fragment, fx),
            Action::ToggleMenu => self.nav.toggle_menu(fx),
            Action::ClickOutsideNav => self.nav.close_menu(fx),
            Action::Scrolled { y } => self.nav.scrolled(y, fx),
            Action::ToggleTheme => self.theme.toggle(fx),
            Action::FieldBlurred(field) => {
                self.form.blurred(&field, fx);
            }
            Action::FieldEdited(field) => self.form.edited(&field, fx),
            Action::SubmitForm(fields) => {
                self.form.submit(&fields, &mut self.toaster, fx);
            }
        }
    }

    fn run_task(&mut self, timer: folio_protocol::TimerId, task: TimerTask) {
        let fx = &mut self.fx;
        match task {
            TimerTask::Settle { page } => self.settle(&page),
            TimerTask::Reveal { element } => self.reveal.delay_elapsed(element, fx),
            TimerTask::FillSkillBar { element } => self.skill_bars.fill(element, fx),
            TimerTask::TypingStep => self.typing.timer_fired(timer, fx),
            TimerTask::DismissToast => self.toaster.timer_fired(timer, fx),
        }
    }

    /// Re-arm animations for whatever page is active now. Which animators
    /// run depends on the page that was navigated to.
    fn settle(&mut self, page: &PageKey) {
        let Some(active) = self.router.active().cloned() else {
            return;
        };
        let plan = self.router.settle_plan(page);
        let fx = &mut self.fx;
        if plan.reveal {
            self.reveal.init(&active, fx);
        }
        if plan.skill_bars {
            self.skill_bars.animate(&active, fx);
        }
        if plan.home {
            self.counters.init(&active, fx);
            self.typing.start(fx);
        }
    }

    /// An element may be registered with several observers; each kind
    /// drives only its own animator.
    fn intersected(&mut self, element: ElementId, kind: ObserverKind, now_ms: f64) {
        let fx = &mut self.fx;
        let known = match kind {
            ObserverKind::Reveal => self.reveal.contains(element),
            ObserverKind::Counter => self.counters.contains(element),
            ObserverKind::SkillBar => self.skill_bars.contains(element),
        };
        if !known {
            warn!(%element, ?kind, "intersection for unregistered element");
            return;
        }
        match kind {
            ObserverKind::Reveal => self.reveal.intersected(element, fx),
            ObserverKind::Counter => self.counters.intersected(element, now_ms, fx),
            ObserverKind::SkillBar => self.skill_bars.intersected(element, fx),
        }
    }

    pub fn active_page(&self) -> Option<&PageKey> {
        self.router.active()
    }

    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    pub fn counters(&self) -> &CounterAnimator {
        &self.counters
    }

    pub fn skill_bars(&self) -> &SkillBarAnimator {
        &self.skill_bars
    }

    pub fn typing(&self) -> &TypingLooper {
        &self.typing
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn menu_open(&self) -> bool {
        self.nav.menu_open()
    }

    pub fn pending_timers(&self) -> usize {
        self.fx.pending_timers()
    }
}
