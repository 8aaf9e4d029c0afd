use std::collections::BTreeMap;

use folio_protocol::{DomCommand, ElementId, ObserverKind, PageKey};
use tracing::debug;

use crate::effects::{Effects, TimerTask};
use crate::model::{RevealSpec, Trigger};

#[derive(Debug, Clone)]
pub struct RevealElement {
    pub page: PageKey,
    pub delay_ms: u32,
    pub trigger: Trigger,
    /// Set when the `visible` class has been applied. Never cleared.
    pub visible: bool,
    observing: bool,
}

/// Fades elements in as they scroll into view.
#[derive(Debug, Default)]
pub struct RevealAnimator {
    elements: BTreeMap<ElementId, RevealElement>,
}

impl RevealAnimator {
    pub fn new<'a>(pages: impl IntoIterator<Item = (&'a PageKey, &'a [RevealSpec])>) -> Self {
        let mut elements = BTreeMap::new();
        for (page, specs) in pages {
            for spec in specs {
                elements.insert(
                    spec.id,
                    RevealElement {
                        page: page.clone(),
                        delay_ms: spec.delay_ms,
                        trigger: Trigger::Pending,
                        visible: false,
                        observing: false,
                    },
                );
            }
        }
        Self { elements }
    }

    /// Observe every pending element of `page` that is not observed yet.
    /// Returns how many observations were added.
    pub fn init(&mut self, page: &PageKey, fx: &mut Effects) -> usize {
        let mut added = 0;
        for (&id, el) in self.elements.iter_mut() {
            if el.page != *page || !el.trigger.is_pending() || el.observing {
                continue;
            }
            el.observing = true;
            fx.push(DomCommand::Observe {
                element: id,
                kind: ObserverKind::Reveal,
            });
            added += 1;
        }
        debug!(%page, added, "reveal init");
        added
    }

    /// The element crossed the reveal threshold. Retires its observation and
    /// shows it, now or after its delay.
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
            kind: ObserverKind::Reveal,
        });
        if el.delay_ms == 0 {
            Self::show(id, el, fx);
        } else {
            fx.schedule(el.delay_ms, TimerTask::Reveal { element: id });
        }
    }

    /// The delay of a triggered element elapsed.
    pub fn delay_elapsed(&mut self, id: ElementId, fx: &mut Effects) {
        if let Some(el) = self.elements.get_mut(&id) {
            Self::show(id, el, fx);
        }
    }

    fn show(id: ElementId, el: &mut RevealElement, fx: &mut Effects) {
        if el.visible {
            return;
        }
        el.visible = true;
        fx.push(DomCommand::Reveal { element: id });
    }

    pub fn get(&self, id: ElementId) -> Option<&RevealElement> {
        self.elements.get(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> (RevealAnimator, PageKey, PageKey) {
        let home = PageKey::from("home");
        let about = PageKey::from("about");
        let home_specs = [
            RevealSpec {
                id: ElementId(1),
                delay_ms: 0,
            },
            RevealSpec {
                id: ElementId(2),
                delay_ms: 200,
            },
        ];
        let about_specs = [RevealSpec {
            id: ElementId(3),
            delay_ms: 0,
        }];
        let animator = RevealAnimator::new([
            (&home, &home_specs[..]),
            (&about, &about_specs[..]),
        ]);
        (animator, home, about)
    }

    #[test]
    fn init_only_observes_active_page() {
        let (mut reveal, home, _) = animator();
        let mut fx = Effects::new();
        assert_eq!(reveal.init(&home, &mut fx), 2);
        let cmds = fx.drain();
        assert!(cmds.contains(&DomCommand::Observe {
            element: ElementId(1),
            kind: ObserverKind::Reveal
        }));
        assert!(!cmds.iter().any(|c| matches!(
            c,
            DomCommand::Observe {
                element: ElementId(3),
                ..
            }
        )));
    }

    #[test]
    fn second_init_does_not_double_register() {
        let (mut reveal, home, _) = animator();
        let mut fx = Effects::new();
        reveal.init(&home, &mut fx);
        reveal.intersected(ElementId(1), &mut fx);
        fx.drain();
        assert_eq!(reveal.init(&home, &mut fx), 0);
        assert!(fx.drain().is_empty());
    }

    #[test]
    fn immediate_reveal_and_retire() {
        let (mut reveal, home, _) = animator();
        let mut fx = Effects::new();
        reveal.init(&home, &mut fx);
        fx.drain();
        reveal.intersected(ElementId(1), &mut fx);
        assert_eq!(
            fx.drain(),
            vec![
                DomCommand::Unobserve {
                    element: ElementId(1),
                    kind: ObserverKind::Reveal
                },
                DomCommand::Reveal {
                    element: ElementId(1)
                },
            ]
        );
        reveal.intersected(ElementId(1), &mut fx);
        assert!(fx.drain().is_empty());
        assert!(reveal.get(ElementId(1)).is_some_and(|e| e.visible));
    }

    #[test]
    fn delayed_reveal_waits_for_timer() {
        let (mut reveal, home, _) = animator();
        let mut fx = Effects::new();
        reveal.init(&home, &mut fx);
        fx.drain();
        reveal.intersected(ElementId(2), &mut fx);
        let cmds = fx.drain();
        assert!(cmds.contains(&DomCommand::ScheduleTimer {
            timer: folio_protocol::TimerId(1),
            delay_ms: 200
        }));
        assert!(reveal.get(ElementId(2)).is_some_and(|e| !e.visible));
        reveal.delay_elapsed(ElementId(2), &mut fx);
        reveal.delay_elapsed(ElementId(2), &mut fx);
        assert_eq!(
            fx.drain(),
            vec![DomCommand::Reveal {
                element: ElementId(2)
            }]
        );
    }
}
