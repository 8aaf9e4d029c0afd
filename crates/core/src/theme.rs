use folio_protocol::{DomCommand, Theme};

use crate::effects::Effects;

/// Applies the persisted colour scheme at startup and flips it on request.
#[derive(Debug)]
pub struct ThemeController {
    theme: Theme,
    storage_key: String,
}

impl ThemeController {
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            theme: Theme::default(),
            storage_key: storage_key.into(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply the stored preference without writing it back.
    pub fn restore(&mut self, saved: Option<&str>, fx: &mut Effects) {
        self.theme = Theme::from_stored(saved);
        fx.push(DomCommand::ApplyTheme { theme: self.theme });
    }

    pub fn toggle(&mut self, fx: &mut Effects) {
        self.theme = self.theme.toggled();
        fx.push(DomCommand::ApplyTheme { theme: self.theme });
        fx.push(DomCommand::PersistTheme {
            key: self.storage_key.clone(),
            theme: self.theme,
        });
    }
}
