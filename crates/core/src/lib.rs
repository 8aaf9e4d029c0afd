//! Behaviour of the folio single-page site, independent of the browser.
//!
//! The shell turns DOM events into [`Event`]s, hands them to [`App::handle`]
//! and applies the returned [`DomCommand`](folio_protocol::DomCommand)s.
//! Timers, animation frames and visibility observations are requested as
//! commands and come back as events, so the whole lifecycle is testable
//! without a browser.

pub mod actions;
pub mod animate;
pub mod app;
pub mod config;
pub mod effects;
pub mod form;
pub mod model;
pub mod router;
pub mod theme;
pub mod toast;

pub use actions::{Action, click_action, click_selector};
pub use app::{App, Event};
pub use config::{ConfigError, SiteConfig};
pub use form::FieldInput;
pub use model::{LayoutError, PageSpec, SiteLayout};
pub use router::NavSource;
