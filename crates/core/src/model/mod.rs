pub mod layout;
pub mod trigger;

pub use layout::{CounterSpec, LayoutError, PageSpec, RevealSpec, SiteLayout, SkillBarSpec};
pub use trigger::Trigger;
