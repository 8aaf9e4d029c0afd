use std::collections::BTreeMap;

use folio_protocol::{DomCommand, ElementId, ObserverKind, PageKey};
use tracing::debug;

use crate::effects::Effects;
use crate::model::{CounterSpec, Trigger};

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Fraction of `duration_ms` covered after `elapsed_ms`, clamped to `0..=1`.
pub fn progress(elapsed_ms: f64, duration_ms: u32) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    (elapsed_ms / f64::from(duration_ms)).clamp(0.0, 1.0)
}

/// Value shown at progress `p`. Exactly `target` once `p` reaches 1.
pub fn displayed_value(target: i64, p: f64) -> i64 {
    (ease_out_cubic(p) * target as f64).floor() as i64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterRun {
    Idle,
    Running { started_ms: f64 },
    Finished,
}

#[derive(Debug, Clone)]
pub struct CounterElement {
    pub page: PageKey,
    pub target: i64,
    pub suffix: String,
    pub trigger: Trigger,
    pub run: CounterRun,
    observing: bool,
}

/// Counts statistic numbers up from zero the first time they are seen.
#[derive(Debug)]
pub struct CounterAnimator {
    elements: BTreeMap<ElementId, CounterElement>,
    duration_ms: u32,
}

impl CounterAnimator {
    pub fn new<'a>(
        pages: impl IntoIterator<Item = (&'a PageKey, &'a [CounterSpec])>,
        duration_ms: u32,
    ) -> Self {
        let mut elements = BTreeMap::new();
        for (page, specs) in pages {
            for spec in specs {
                elements.insert(
                    spec.id,
                    CounterElement {
                        page: page.clone(),
                        target: spec.target,
                        suffix: spec.suffix.clone(),
                        trigger: Trigger::Pending,
                        run: CounterRun::Idle,
                        observing: false,
                    },
                );
            }
        }
        Self {
            elements,
            duration_ms,
        }
    }

    pub fn init(&mut self, page: &PageKey, fx: &mut Effects) -> usize {
        let mut added = 0;
        for (&id, el) in self.elements.iter_mut() {
            if el.page != *page || !el.trigger.is_pending() || el.observing {
                continue;
            }
            el.observing = true;
            fx.push(DomCommand::Observe {
                element: id,
                kind: ObserverKind::Counter,
            });
            added += 1;
        }
        debug!(%page, added, "counter init");
        added
    }

    /// First sighting starts the run; later sightings are ignored.
    pub fn intersected(&mut self, id: ElementId, now_ms: f64, fx: &mut Effects) {
        let Some(el) = self.elements.get_mut(&id) else {
            return;
        };
        if !el.trigger.fire() {
            return;
        }
        el.observing = false;
        el.run = CounterRun::Running { started_ms: now_ms };
        fx.push(DomCommand::Unobserve {
            element: id,
            kind: ObserverKind::Counter,
        });
        fx.push(DomCommand::RequestFrame { element: id });
    }

    /// Render one frame of a running counter and ask for the next until the
    /// duration has elapsed.
    pub fn frame(&mut self, id: ElementId, now_ms: f64, fx: &mut Effects) {
        let Some(el) = self.elements.get_mut(&id) else {
            return;
        };
        let CounterRun::Running { started_ms } = el.run else {
            return;
        };
        let p = progress(now_ms - started_ms, self.duration_ms);
        let value = displayed_value(el.target, p);
        fx.push(DomCommand::SetCounterText {
            element: id,
            text: format!("{value}{}", el.suffix),
        });
        if p < 1.0 {
            fx.push(DomCommand::RequestFrame { element: id });
        } else {
            el.run = CounterRun::Finished;
        }
    }

    pub fn get(&self, id: ElementId) -> Option<&CounterElement> {
        self.elements.get(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }
}
