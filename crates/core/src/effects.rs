use std::collections::HashMap;

use folio_protocol::{DomCommand, ElementId, PageKey, TimerId};
use tracing::debug;

/// What to do when a scheduled timeout fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    /// Re-arm animations after a page switch has painted.
    Settle { page: PageKey },
    /// Show a reveal element whose delay has elapsed.
    Reveal { element: ElementId },
    /// Set a skill bar to its target width.
    FillSkillBar { element: ElementId },
    /// Next character of the typing loop.
    TypingStep,
    DismissToast,
}

/// Output buffer for one event: the commands emitted so far plus the table
/// of timers that are still armed.
///
/// Components receive `&mut Effects` instead of touching the shell, which
/// keeps every scheduling decision inside the core.
#[derive(Debug, Default)]
pub struct Effects {
    commands: Vec<DomCommand>,
    next_timer: u64,
    pending: HashMap<TimerId, TimerTask>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DomCommand) {
        self.commands.push(command);
    }

    /// Arm a timeout and remember its task.
    pub fn schedule(&mut self, delay_ms: u32, task: TimerTask) -> TimerId {
        self.next_timer += 1;
        let timer = TimerId(self.next_timer);
        debug!(?timer, delay_ms, ?task, "schedule");
        self.pending.insert(timer, task);
        self.commands.push(DomCommand::ScheduleTimer { timer, delay_ms });
        timer
    }

    /// Disarm a timeout. Returns `false` if it already fired or was
    /// cancelled, in which case nothing is emitted.
    pub fn cancel(&mut self, timer: TimerId) -> bool {
        if self.pending.remove(&timer).is_some() {
            debug!(?timer, "cancel");
            self.commands.push(DomCommand::CancelTimer { timer });
            true
        } else {
            false
        }
    }

    /// Claim the task of a timer that just fired. Stale ids yield `None`.
    pub fn take_timer(&mut self, timer: TimerId) -> Option<TimerTask> {
        self.pending.remove(&timer)
    }

    /// Number of armed timers.
    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    pub fn drain(&mut self) -> Vec<DomCommand> {
        std::mem::take(&mut self.commands)
    }
}
