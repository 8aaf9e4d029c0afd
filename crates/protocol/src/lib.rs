pub mod commands;
pub mod form;
pub mod theme;
pub mod types;

pub use commands::DomCommand;
pub use form::{FieldState, MessagePayload, ToastKind};
pub use theme::Theme;
pub use types::{ElementId, ObserveOptions, ObserverKind, PageKey, TimerId};
