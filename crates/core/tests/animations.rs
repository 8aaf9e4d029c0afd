//! Reveal, counter, skill-bar and typing lifecycles driven through the app.

mod common;

use common::Browser;
use folio_core::{Action, Event, NavSource, PageSpec, SiteConfig, SiteLayout};
use folio_protocol::{ElementId, ObserverKind, PageKey};
use proptest::prelude::*;

fn go(b: &mut Browser, page: &str) {
    b.send(Event::Action(Action::Navigate {
        page: PageKey::from(page),
        source: NavSource::GotoLink,
    }));
}

#[test]
fn settle_delay_precedes_observation() {
    let mut b = Browser::sample();
    b.boot("");
    assert!(b.observed.is_empty());
    b.advance(100.0);
    assert!(b.observed.is_empty());
    b.advance(40.0);
    assert!(b.is_observed(1, ObserverKind::Reveal));
    assert!(b.is_observed(10, ObserverKind::Counter));
    assert!(!b.observing(3));
}

#[test]
fn reveal_respects_delay_and_retires() {
    let mut b = Browser::sample();
    b.boot("");
    b.advance(150.0);
    b.scroll_into_view(1);
    b.scroll_into_view(2);
    assert_eq!(b.revealed.get(&ElementId(1)), Some(&1));
    assert_eq!(b.revealed.get(&ElementId(2)), None);
    assert!(!b.observing(1));
    assert!(!b.observing(2));

    b.advance(160.0);
    assert_eq!(b.revealed.get(&ElementId(2)), Some(&1));
}

#[test]
fn reinit_never_re_marks_and_picks_up_new_page() {
    let mut b = Browser::sample();
    b.boot("");
    b.advance(150.0);
    b.scroll_into_view(1);
    let calls = b.observe_calls;

    // Re-entering home re-runs init; element 1 is retired, element 2 is
    // still observed, so nothing new is registered for home.
    go(&mut b, "home");
    b.advance(150.0);
    assert_eq!(b.observe_calls, calls);
    b.intersect(1, ObserverKind::Reveal);
    assert_eq!(b.revealed.get(&ElementId(1)), Some(&1));

    go(&mut b, "about");
    b.advance(150.0);
    assert!(b.is_observed(3, ObserverKind::Reveal));
    b.scroll_into_view(3);
    assert_eq!(b.revealed.get(&ElementId(3)), Some(&1));
}

#[test]
fn counter_reaches_target_exactly_once() {
    let mut b = Browser::sample();
    b.boot("");
    b.advance(150.0);
    b.scroll_into_view(10);
    b.advance(2000.0);
    assert_eq!(b.last_counter_text(10), Some("100"));

    let updates = b.counter_text[&ElementId(10)].len();
    assert!(updates > 10);
    let values: Vec<i64> = b.counter_text[&ElementId(10)]
        .iter()
        .map(|s| s.value.parse().unwrap())
        .collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));

    b.intersect(10, ObserverKind::Counter);
    go(&mut b, "home");
    b.advance(3000.0);
    assert_eq!(b.counter_text[&ElementId(10)].len(), updates);
    assert!(!b.observing(10));
}

#[test]
fn revealed_counter_answers_each_observer_separately() {
    let layout = SiteLayout {
        pages: vec![PageSpec::new("home").reveal(7, 0).counter(7, 50, "+")],
        nav_links: vec![PageKey::from("home")],
        has_typing_target: false,
    };
    let mut b = Browser::new(SiteConfig::default(), layout);
    b.boot("");
    b.advance(150.0);
    assert!(b.is_observed(7, ObserverKind::Reveal));
    assert!(b.is_observed(7, ObserverKind::Counter));

    b.intersect(7, ObserverKind::Reveal);
    assert_eq!(b.revealed.get(&ElementId(7)), Some(&1));
    assert!(!b.counter_text.contains_key(&ElementId(7)));
    assert!(!b.is_observed(7, ObserverKind::Reveal));
    assert!(b.is_observed(7, ObserverKind::Counter));

    b.intersect(7, ObserverKind::Counter);
    b.advance(2000.0);
    assert_eq!(b.last_counter_text(7), Some("50+"));
    assert!(!b.observing(7));
    assert_eq!(b.revealed.get(&ElementId(7)), Some(&1));
}

#[test]
fn counter_suffix_on_every_frame() {
    let mut b = Browser::sample();
    b.boot("");
    b.advance(150.0);
    b.scroll_into_view(11);
    b.advance(2000.0);
    let texts = &b.counter_text[&ElementId(11)];
    assert!(texts.iter().all(|s| s.value.ends_with('+')));
    assert_eq!(b.last_counter_text(11), Some("50+"));
}

#[test]
fn counters_animate_independently() {
    let mut b = Browser::sample();
    b.boot("");
    b.advance(150.0);
    b.scroll_into_view(10);
    b.advance(900.0);
    b.scroll_into_view(11);
    b.advance(1000.0);
    assert_eq!(b.last_counter_text(10), Some("100"));
    assert_ne!(b.last_counter_text(11), Some("50+"));
    b.advance(1000.0);
    assert_eq!(b.last_counter_text(11), Some("50+"));
}

#[test]
fn skill_bars_fill_once_on_skills_page() {
    let mut b = Browser::sample();
    b.boot("");
    b.advance(150.0);
    assert!(!b.observing(20));

    go(&mut b, "skills");
    b.advance(150.0);
    assert!(b.is_observed(20, ObserverKind::SkillBar));

    b.scroll_into_view(20);
    b.intersect(20, ObserverKind::SkillBar);
    b.intersect(20, ObserverKind::SkillBar);
    b.advance(200.0);
    assert!(b.skill_width.get(&ElementId(20)).is_none());
    b.advance(100.0);
    assert_eq!(b.skill_width[&ElementId(20)], vec!["90%".to_string()]);

    // Revisiting does not refill.
    go(&mut b, "about");
    go(&mut b, "skills");
    b.advance(500.0);
    b.intersect(20, ObserverKind::SkillBar);
    b.advance(500.0);
    assert_eq!(b.skill_width[&ElementId(20)].len(), 1);
    assert!(
        b.app
            .skill_bars()
            .get(ElementId(20))
            .is_some_and(|s| s.filled)
    );
}

#[test]
fn typing_cycles_through_roles() {
    let mut b = Browser::sample();
    b.boot("");
    b.advance(150.0);
    let roles = b.app.typing().roles().to_vec();
    // Long enough to finish the first role and start the second.
    b.advance(8000.0);
    let texts: Vec<&str> = b.typed.iter().map(|s| s.value.as_str()).collect();
    assert!(texts.contains(&roles[0].as_str()));
    assert!(texts.iter().any(|t| t.is_empty()));
    assert!(b.app.typing().role_index() >= 1);
}

#[test]
fn typing_restarted_twice_keeps_one_stream() {
    let mut b = Browser::sample();
    b.boot("");
    b.advance(150.0);
    b.advance(200.0);
    go(&mut b, "home");
    go(&mut b, "home");
    b.advance(150.0);
    let restart_at = b.typed.len();
    b.advance(12_000.0);
    assert!(b.app.typing().is_armed());

    let roles = b.app.typing().roles().to_vec();
    let after = &b.typed[restart_at - 1..];
    for pair in after.windows(2) {
        let gap = pair[1].at - pair[0].at;
        assert!(gap >= 35.0, "two steps {gap}ms apart");
        let (a, c) = (&pair[0].value, &pair[1].value);
        let diff = a.chars().count().abs_diff(c.chars().count());
        assert_eq!(diff, 1, "{a:?} -> {c:?}");
    }
    for stamped in &b.typed {
        assert!(roles.iter().any(|r| r.starts_with(&stamped.value)));
    }
}

proptest! {
    #[test]
    fn typed_text_is_always_a_role_prefix(restarts in prop::collection::vec(0u32..3000, 0..5)) {
        let mut b = Browser::sample();
        b.boot("");
        b.advance(150.0);
        for wait in restarts {
            b.advance(f64::from(wait));
            go(&mut b, "home");
        }
        b.advance(6000.0);
        let roles = b.app.typing().roles().to_vec();
        for stamped in &b.typed {
            prop_assert!(roles.iter().any(|r| r.starts_with(&stamped.value)));
        }
        // Every settle has run by now, so only the typing step is armed.
        prop_assert_eq!(b.armed_timers().len(), 1);
        prop_assert_eq!(b.app.pending_timers(), 1);
    }
}
