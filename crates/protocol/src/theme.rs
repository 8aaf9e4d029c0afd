use serde::{Deserialize, Serialize};

/// Colour scheme of the site. Dark is the default; light is opt-in and
/// persisted across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Class toggled on `<body>` while the light theme is active.
    pub const LIGHT_CLASS: &'static str = "light-mode";

    /// Value written to the persistent store.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Text shown next to the theme toggle.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Interpret a stored preference. Only `"light"` selects the light
    /// theme; anything else, including a missing value, is dark.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }
}
