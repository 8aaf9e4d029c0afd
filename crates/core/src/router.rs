use folio_protocol::{DomCommand, PageKey};
use tracing::debug;

use crate::effects::{Effects, TimerTask};

/// Where a navigation request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSource {
    /// A link in the primary navigation bar.
    NavLink,
    /// Any in-page "go to" control.
    GotoLink,
}

/// Animations to re-arm once a page switch has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePlan {
    pub reveal: bool,
    pub skill_bars: bool,
    /// Counters and the typing loop.
    pub home: bool,
}

/// Owns which page is visible and keeps nav links and history in step.
#[derive(Debug)]
pub struct Router {
    pages: Vec<PageKey>,
    nav_links: Vec<PageKey>,
    active: Option<PageKey>,
    home: PageKey,
    skills: PageKey,
    settle_ms: u32,
}

impl Router {
    pub fn new(
        pages: Vec<PageKey>,
        nav_links: Vec<PageKey>,
        home: PageKey,
        skills: PageKey,
        settle_ms: u32,
    ) -> Self {
        Self {
            pages,
            nav_links,
            active: None,
            home,
            skills,
            settle_ms,
        }
    }

    pub fn active(&self) -> Option<&PageKey> {
        self.active.as_ref()
    }

    /// Make `key` the only visible page. Unknown keys change nothing and
    /// return `false`.
    pub fn show_page(&mut self, key: &str, fx: &mut Effects) -> bool {
        let Some(target) = self.pages.iter().find(|p| *p == key).cloned() else {
            debug!(key, "ignoring unknown page");
            return false;
        };
        for page in &self.pages {
            fx.push(DomCommand::SetPageVisible {
                page: page.clone(),
                visible: *page == target,
            });
        }
        for link in &self.nav_links {
            fx.push(DomCommand::SetNavActive {
                page: link.clone(),
                active: *link == target,
            });
        }
        fx.push(DomCommand::ScrollToTop { smooth: true });
        debug!(page = %target, "show page");
        fx.schedule(
            self.settle_ms,
            TimerTask::Settle {
                page: target.clone(),
            },
        );
        self.active = Some(target);
        true
    }

    /// Handle a link click: switch pages and record a history entry.
    pub fn navigate(&mut self, key: &PageKey, fx: &mut Effects) -> bool {
        let shown = self.show_page(key.as_str(), fx);
        if shown {
            fx.push(DomCommand::PushHistory { page: key.clone() });
        }
        shown
    }

    /// Handle initial load or back/forward: switch pages without pushing.
    pub fn restore(&mut self, fragment: &str, fx: &mut Effects) {
        let key = self.resolve_fragment(fragment);
        self.show_page(key.as_str(), fx);
    }

    /// Map a location fragment (with or without the leading `#`) to a known
    /// page, falling back to home.
    pub fn resolve_fragment(&self, fragment: &str) -> PageKey {
        let key = fragment.strip_prefix('#').unwrap_or(fragment);
        self.pages
            .iter()
            .find(|p| *p == key)
            .unwrap_or(&self.home)
            .clone()
    }

    pub fn settle_plan(&self, page: &PageKey) -> SettlePlan {
        SettlePlan {
            reveal: true,
            skill_bars: *page == self.skills,
            home: *page == self.home,
        }
    }
}

/// Mobile menu and condensed-navbar flags.
#[derive(Debug, Default)]
pub struct NavBar {
    menu_open: bool,
    scrolled: bool,
    scroll_threshold: f64,
}

impl NavBar {
    pub fn new(scroll_threshold: f64) -> Self {
        Self {
            scroll_threshold,
            ..Self::default()
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self, fx: &mut Effects) {
        self.menu_open = !self.menu_open;
        fx.push(DomCommand::SetMenuOpen {
            open: self.menu_open,
        });
    }

    pub fn close_menu(&mut self, fx: &mut Effects) {
        if self.menu_open {
            self.menu_open = false;
            fx.push(DomCommand::SetMenuOpen { open: false });
        }
    }

    pub fn scrolled(&mut self, y: f64, fx: &mut Effects) {
        let scrolled = y > self.scroll_threshold;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            fx.push(DomCommand::SetNavScrolled { scrolled });
        }
    }
}
