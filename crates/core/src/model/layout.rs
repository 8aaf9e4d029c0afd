use std::collections::{HashMap, HashSet};

use folio_protocol::{ElementId, ObserverKind, PageKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("page `{0}` is declared more than once")]
    DuplicatePage(PageKey),
    #[error("element {0} is declared more than once for one animation or on two pages")]
    DuplicateElement(ElementId),
    #[error("home page `{0}` is not declared")]
    MissingHome(PageKey),
}

/// Static structure of the document, captured once at load time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteLayout {
    /// Pages in document order.
    pub pages: Vec<PageSpec>,
    /// Pages that have a primary navigation link.
    pub nav_links: Vec<PageKey>,
    /// Whether the typing target element exists.
    pub has_typing_target: bool,
}

impl SiteLayout {
    /// Check the layout against the invariants the core relies on: unique
    /// page keys, a declared home page, and element ids that name one DOM
    /// element. An element may carry several animations (a revealed
    /// counter, say) but each at most once, and it lives on one page.
    pub fn validate(&self, home: &PageKey) -> Result<(), LayoutError> {
        let mut keys = HashSet::new();
        let mut registered = HashSet::new();
        let mut owner: HashMap<ElementId, &PageKey> = HashMap::new();
        for page in &self.pages {
            if !keys.insert(&page.key) {
                return Err(LayoutError::DuplicatePage(page.key.clone()));
            }
            for (kind, id) in page.elements() {
                let same_page = *owner.entry(id).or_insert(&page.key) == &page.key;
                if !same_page || !registered.insert((kind, id)) {
                    return Err(LayoutError::DuplicateElement(id));
                }
            }
        }
        if !keys.contains(home) {
            return Err(LayoutError::MissingHome(home.clone()));
        }
        Ok(())
    }
}

/// One page section and the animatable elements it contains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    pub key: PageKey,
    pub reveals: Vec<RevealSpec>,
    pub counters: Vec<CounterSpec>,
    pub skill_bars: Vec<SkillBarSpec>,
}

impl PageSpec {
    pub fn new(key: impl Into<PageKey>) -> Self {
        Self {
            key: key.into(),
            reveals: Vec::new(),
            counters: Vec::new(),
            skill_bars: Vec::new(),
        }
    }

    pub fn reveal(mut self, id: u32, delay_ms: u32) -> Self {
        self.reveals.push(RevealSpec {
            id: ElementId(id),
            delay_ms,
        });
        self
    }

    pub fn counter(mut self, id: u32, target: i64, suffix: &str) -> Self {
        self.counters.push(CounterSpec {
            id: ElementId(id),
            target,
            suffix: suffix.to_owned(),
        });
        self
    }

    pub fn skill_bar(mut self, id: u32, width: &str) -> Self {
        self.skill_bars.push(SkillBarSpec {
            id: ElementId(id),
            width: width.to_owned(),
        });
        self
    }

    fn elements(&self) -> impl Iterator<Item = (ObserverKind, ElementId)> + '_ {
        let reveals = self.reveals.iter().map(|r| (ObserverKind::Reveal, r.id));
        let counters = self.counters.iter().map(|c| (ObserverKind::Counter, c.id));
        let bars = self.skill_bars.iter().map(|s| (ObserverKind::SkillBar, s.id));
        reveals.chain(counters).chain(bars)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSpec {
    pub id: ElementId,
    /// Extra delay after intersection before the element is shown.
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterSpec {
    pub id: ElementId,
    pub target: i64,
    pub suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillBarSpec {
    pub id: ElementId,
    /// Final CSS width, e.g. `"90%"`.
    pub width: String,
}
