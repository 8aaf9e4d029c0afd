use folio_protocol::{DomCommand, TimerId};
use tracing::debug;

use crate::config::Timings;
use crate::effects::{Effects, TimerTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    /// Holding the complete word.
    PausingBeforeDelete,
    Deleting,
    /// Holding the empty text before the next word.
    PausingBeforeType,
}

/// Endless type/delete loop over the role strings.
///
/// Exactly one step is ever pending: `start` cancels the armed step before
/// running a new one, and a step that fires with a stale id is dropped.
#[derive(Debug)]
pub struct TypingLooper {
    roles: Vec<String>,
    role_idx: usize,
    char_idx: usize,
    phase: TypingPhase,
    pending: Option<TimerId>,
    enabled: bool,
    timings: Timings,
}

impl TypingLooper {
    /// A looper without roles or without a target element never runs.
    pub fn new(roles: Vec<String>, timings: Timings, has_target: bool) -> Self {
        let enabled = has_target && !roles.is_empty();
        Self {
            roles,
            role_idx: 0,
            char_idx: 0,
            phase: TypingPhase::Typing,
            pending: None,
            enabled,
            timings,
        }
    }

    /// Cancel any armed step and resume the loop from where it stopped.
    pub fn start(&mut self, fx: &mut Effects) {
        if !self.enabled {
            return;
        }
        if let Some(timer) = self.pending.take() {
            fx.cancel(timer);
        }
        debug!(role = self.role_idx, chars = self.char_idx, "typing start");
        self.step(fx);
    }

    /// The armed step fired.
    pub fn timer_fired(&mut self, timer: TimerId, fx: &mut Effects) {
        if self.pending != Some(timer) {
            return;
        }
        self.pending = None;
        self.step(fx);
    }

    fn step(&mut self, fx: &mut Effects) {
        let delay = self.advance();
        fx.push(DomCommand::SetTypedText { text: self.text() });
        self.pending = Some(fx.schedule(delay, TimerTask::TypingStep));
    }

    /// Apply one tick of the state machine and return the delay until the
    /// next one.
    fn advance(&mut self) -> u32 {
        match self.phase {
            TypingPhase::PausingBeforeDelete => self.phase = TypingPhase::Deleting,
            TypingPhase::PausingBeforeType => self.phase = TypingPhase::Typing,
            TypingPhase::Typing | TypingPhase::Deleting => {}
        }
        let len = self.current_len();
        match self.phase {
            TypingPhase::Typing => {
                self.char_idx = (self.char_idx + 1).min(len);
                if self.char_idx == len {
                    self.phase = TypingPhase::PausingBeforeDelete;
                    self.timings.hold_full_ms
                } else {
                    self.timings.type_ms
                }
            }
            TypingPhase::Deleting => {
                self.char_idx = self.char_idx.saturating_sub(1);
                if self.char_idx == 0 {
                    self.role_idx = (self.role_idx + 1) % self.roles.len();
                    self.phase = TypingPhase::PausingBeforeType;
                    self.timings.hold_empty_ms
                } else {
                    self.timings.delete_ms
                }
            }
            // Pauses were resolved above.
            TypingPhase::PausingBeforeDelete | TypingPhase::PausingBeforeType => 0,
        }
    }

    fn current_len(&self) -> usize {
        self.roles
            .get(self.role_idx)
            .map_or(0, |r| r.chars().count())
    }

    /// Text currently displayed.
    pub fn text(&self) -> String {
        self.roles
            .get(self.role_idx)
            .map(|r| r.chars().take(self.char_idx).collect())
            .unwrap_or_default()
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn role_index(&self) -> usize {
        self.role_idx
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
