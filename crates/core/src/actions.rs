use folio_protocol::PageKey;

use crate::form::FieldInput;
use crate::router::NavSource;

/// A user interaction the core reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate { page: PageKey, source: NavSource },
    HistoryPopped { fragment: String },
    ToggleMenu,
    /// A click landed outside the navigation bar.
    ClickOutsideNav,
    Scrolled { y: f64 },
    ToggleTheme,
    FieldBlurred(FieldInput),
    FieldEdited(FieldInput),
    SubmitForm(Vec<FieldInput>),
}

/// Maps one data attribute on a clicked element to an action.
pub struct ClickBinding {
    pub attribute: &'static str,
    /// Ancestor the element must sit inside, as a CSS selector.
    pub within: Option<&'static str>,
    pub resolve: fn(&str) -> Option<Action>,
}

impl ClickBinding {
    /// CSS selector for elements this binding applies to.
    pub fn selector(&self) -> String {
        match self.within {
            Some(scope) => format!("{scope} [{}]", self.attribute),
            None => format!("[{}]", self.attribute),
        }
    }
}

/// Attributes the shell looks for when walking up from a click target,
/// most specific first.
pub const CLICK_BINDINGS: &[ClickBinding] = &[
    ClickBinding {
        attribute: "data-page",
        within: Some(".nav-links"),
        resolve: nav_link,
    },
    ClickBinding {
        attribute: "data-goto",
        within: None,
        resolve: goto_link,
    },
    ClickBinding {
        attribute: "data-action",
        within: None,
        resolve: named_action,
    },
];

fn nav_link(value: &str) -> Option<Action> {
    Some(Action::Navigate {
        page: PageKey::from(value),
        source: NavSource::NavLink,
    })
}

fn goto_link(value: &str) -> Option<Action> {
    Some(Action::Navigate {
        page: PageKey::from(value),
        source: NavSource::GotoLink,
    })
}

fn named_action(value: &str) -> Option<Action> {
    match value {
        "toggle-menu" => Some(Action::ToggleMenu),
        "toggle-theme" => Some(Action::ToggleTheme),
        _ => None,
    }
}

/// Resolve a clicked element's attribute into an action.
pub fn click_action(attribute: &str, value: &str) -> Option<Action> {
    CLICK_BINDINGS
        .iter()
        .find(|b| b.attribute == attribute)
        .and_then(|b| (b.resolve)(value))
}

/// CSS selector matching any element the click table knows about.
pub fn click_selector() -> String {
    CLICK_BINDINGS
        .iter()
        .map(ClickBinding::selector)
        .collect::<Vec<_>>()
        .join(",")
}
