use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a top-level navigable page, as used in `#<key>` fragments and
/// `data-page` / `data-goto` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(String);

impl PageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fragment form of this key, e.g. `#skills`.
    pub fn fragment(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PageKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for PageKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PageKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PageKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Identifier the shell assigns to an animatable element when it scans the
/// document. Stable for the lifetime of the page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el#{}", self.0)
    }
}

/// Handle of a timeout scheduled by the core. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Which visibility observer an element is registered with. Each kind has
/// its own threshold and root margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObserverKind {
    Reveal,
    Counter,
    SkillBar,
}

impl ObserverKind {
    pub const ALL: [ObserverKind; 3] = [Self::Reveal, Self::Counter, Self::SkillBar];
}

/// Viewport-intersection options for one observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserveOptions {
    /// Fraction of the element that must be visible, in `0.0..=1.0`.
    pub threshold: f64,
    /// CSS margin applied to the root's bounding box.
    pub root_margin: String,
}

impl ObserveOptions {
    pub fn new(threshold: f64, root_margin: impl Into<String>) -> Self {
        Self {
            threshold,
            root_margin: root_margin.into(),
        }
    }
}
