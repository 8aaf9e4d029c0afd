use serde::{Deserialize, Serialize};

use crate::form::{FieldState, MessagePayload, ToastKind};
use crate::theme::Theme;
use crate::types::{ElementId, ObserverKind, PageKey, TimerId};

/// A single instruction for the browser shell.
///
/// The core emits a `Vec<DomCommand>` for every event it handles. The shell
/// applies them in order; each command carries all the data it needs and
/// none of them reads back from the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomCommand {
    /// Show or hide a page section.
    SetPageVisible { page: PageKey, visible: bool },

    /// Mark the primary nav link for `page` active or inactive.
    SetNavActive { page: PageKey, active: bool },

    /// Scroll the window back to the top.
    ScrollToTop { smooth: bool },

    /// Push `#<page>` onto the session history without reloading.
    PushHistory { page: PageKey },

    /// Open or close the mobile navigation menu and its hamburger.
    SetMenuOpen { open: bool },

    /// Toggle the condensed navbar style.
    SetNavScrolled { scrolled: bool },

    /// Start watching an element for viewport intersection.
    Observe {
        element: ElementId,
        kind: ObserverKind,
    },

    /// Stop watching an element. It will never be observed again.
    Unobserve {
        element: ElementId,
        kind: ObserverKind,
    },

    /// Add the `visible` class to a reveal element.
    Reveal { element: ElementId },

    /// Replace the text of a counter element.
    SetCounterText { element: ElementId, text: String },

    /// Ask for one animation frame on behalf of a running counter.
    RequestFrame { element: ElementId },

    /// Set the inline width of a skill-bar fill, e.g. `"85%"`.
    SetSkillWidth { element: ElementId, width: String },

    /// Replace the text of the typing target.
    SetTypedText { text: String },

    /// Arm a one-shot timeout. The shell reports it back with its id.
    ScheduleTimer { timer: TimerId, delay_ms: u32 },

    /// Disarm a pending timeout. Unknown ids are ignored.
    CancelTimer { timer: TimerId },

    /// Apply a theme class and update the toggle label.
    ApplyTheme { theme: Theme },

    /// Write the theme preference to the persistent store.
    PersistTheme { key: String, theme: Theme },

    /// Update a form field's error/success styling and error text.
    SetFieldState { field: String, state: FieldState },

    /// Clear all inputs of the contact form.
    ResetForm,

    /// Disable the submit control and show the sending indicator, or
    /// restore it.
    SetSubmitBusy { busy: bool },

    /// Send the contact message through the email service. The shell
    /// reports the outcome back exactly once.
    SendMessage { payload: MessagePayload },

    /// Show the toast with new content.
    ShowToast { message: String, kind: ToastKind },

    /// Hide the toast.
    HideToast,
}
