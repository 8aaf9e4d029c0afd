use folio_protocol::{ObserveOptions, ObserverKind, PageKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("role list must not be empty")]
    NoRoles,
    #[error("minimum message length must be at least 1")]
    ZeroMessageLength,
}

/// Site-wide settings. Every field has a default, so a partial JSON override
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Page shown for an empty or unknown fragment. Visiting it starts the
    /// counters and the typing loop.
    pub home_page: PageKey,
    /// Visiting this page fills the skill bars.
    pub skills_page: PageKey,
    /// Strings cycled by the typing loop.
    pub roles: Vec<String>,
    pub timings: Timings,
    pub observers: Observers,
    /// Local-storage key of the theme preference.
    pub theme_storage_key: String,
    /// Scroll offset in px past which the navbar switches to its condensed style.
    pub nav_scroll_threshold: f64,
    pub contact: ContactConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home_page: PageKey::from("home"),
            skills_page: PageKey::from("skills"),
            roles: [
                "Full-Stack Developer",
                "UI/UX Designer",
                "Digital Strategist",
                "Problem Solver",
                "React & Next.js Expert",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            timings: Timings::default(),
            observers: Observers::default(),
            theme_storage_key: "theme".into(),
            nav_scroll_threshold: 40.0,
            contact: ContactConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override on top of the defaults and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roles.is_empty() {
            return Err(ConfigError::NoRoles);
        }
        if self.contact.min_message_len == 0 {
            return Err(ConfigError::ZeroMessageLength);
        }
        Ok(())
    }
}

/// Fixed delays and durations, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timings {
    /// Delay between a page switch and re-arming its animations.
    pub settle_ms: u32,
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Hold on the fully typed word before deleting.
    pub hold_full_ms: u32,
    /// Hold on the empty text before typing the next word.
    pub hold_empty_ms: u32,
    pub counter_ms: u32,
    pub skill_bar_ms: u32,
    pub toast_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            settle_ms: 120,
            type_ms: 60,
            delete_ms: 35,
            hold_full_ms: 1800,
            hold_empty_ms: 400,
            counter_ms: 1800,
            skill_bar_ms: 250,
            toast_ms: 4500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Observers {
    pub reveal: ObserveOptions,
    pub counter: ObserveOptions,
    pub skill_bar: ObserveOptions,
}

impl Observers {
    pub fn options(&self, kind: ObserverKind) -> &ObserveOptions {
        match kind {
            ObserverKind::Reveal => &self.reveal,
            ObserverKind::Counter => &self.counter,
            ObserverKind::SkillBar => &self.skill_bar,
        }
    }
}

impl Default for Observers {
    fn default() -> Self {
        Self {
            // Fire slightly before the element is fully in view.
            reveal: ObserveOptions::new(0.1, "0px 0px -30px 0px"),
            counter: ObserveOptions::new(0.5, "0px"),
            skill_bar: ObserveOptions::new(0.3, "0px"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactConfig {
    pub service_id: String,
    pub template_id: String,
    /// Value of the `to_name` template parameter.
    pub recipient_name: String,
    /// Minimum trimmed length of the `message` field, in characters.
    pub min_message_len: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            service_id: "service_uor1bsl".into(),
            template_id: "template_pndoqeo".into(),
            recipient_name: "Atiq ur Rehman".into(),
            min_message_len: 20,
        }
    }
}
