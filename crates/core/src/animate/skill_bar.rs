use std::collections::BTreeMap;

use folio_protocol::{DomCommand, ElementId, ObserverKind, PageKey};
use tracing::debug;

use crate::effects::{Effects, TimerTask};
use crate::model::{SkillBarSpec, Trigger};

#[derive(Debug, Clone)]
pub struct SkillBarElement {
    pub page: PageKey,
    pub width: String,
    pub trigger: Trigger,
    /// Set when the target width has been applied.
    pub filled: bool,
    observing: bool,
}

/// Grows skill-bar fills to their target width once visible. The smooth
/// transition itself comes from the stylesheet.
#[derive(Debug)]
pub struct SkillBarAnimator {
    elements: BTreeMap<ElementId, SkillBarElement>,
    delay_ms: u32,
}

impl SkillBarAnimator {
    pub fn new<'a>(
        pages: impl IntoIterator<Item = (&'a PageKey, &'a [SkillBarSpec])>,
        delay_ms: u32,
    ) -> Self {
        let mut elements = BTreeMap::new();
        for (page, specs) in pages {
            for spec in specs {
                elements.insert(
                    spec.id,
                    SkillBarElement {
                        page: page.clone(),
                        width: spec.width.clone(),
                        trigger: Trigger::Pending,
                        filled: false,
                        observing: false,
                    },
                );
            }
        }
        Self { elements, delay_ms }
    }

    pub fn animate(&mut self, page: &PageKey, fx: &mut Effects) -> usize {
        let mut added = 0;
        for (&id, el) in self.elements.iter_mut() {
            if el.page != *page || !el.trigger.is_pending() || el.observing {
                continue;
            }
            el.observing = true;
            fx.push(DomCommand::Observe {
                element: id,
                kind: ObserverKind::SkillBar,
            });
            added += 1;
        }
        debug!(%page, added, "skill bars armed");
        added
    }

    pub fn intersected(&mut self, id: ElementId, fx: &mut Effects) {
        let Some(el) = self.elements.get_mut(&id) else {
            return;
        };
        if !el.trigger.fire() {
            return;
        }
        el.observing = false;
        fx.push(DomCommand::Unobserve {
            element: id,
            kind: ObserverKind::SkillBar,
        });
        fx.schedule(self.delay_ms, TimerTask::FillSkillBar { element: id });
    }

    pub fn fill(&mut self, id: ElementId, fx: &mut Effects) {
        let Some(el) = self.elements.get_mut(&id) else {
            return;
        };
        if el.filled {
            return;
        }
        el.filled = true;
        fx.push(DomCommand::SetSkillWidth {
            element: id,
            width: el.width.clone(),
        });
    }

    pub fn get(&self, id: ElementId) -> Option<&SkillBarElement> {
        self.elements.get(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }
}
