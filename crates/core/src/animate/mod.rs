//! Scroll- and timer-driven animations.
//!
//! Each animator owns the elements of its kind across all pages and only
//! arms the ones that belong to the page passed in, so calling `init` again
//! after a page switch picks up the new page without touching elements that
//! already ran.

pub mod counter;
pub mod reveal;
pub mod skill_bar;
pub mod typing;

pub use counter::CounterAnimator;
pub use reveal::RevealAnimator;
pub use skill_bar::SkillBarAnimator;
pub use typing::{TypingLooper, TypingPhase};
