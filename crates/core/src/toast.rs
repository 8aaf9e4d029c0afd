use folio_protocol::{DomCommand, TimerId, ToastKind};

use crate::effects::{Effects, TimerTask};

/// Single toast slot. A new message replaces the current one and restarts
/// the dismiss timer.
#[derive(Debug)]
pub struct Toaster {
    duration_ms: u32,
    dismiss: Option<TimerId>,
}

impl Toaster {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            dismiss: None,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, fx: &mut Effects) {
        if let Some(timer) = self.dismiss.take() {
            fx.cancel(timer);
        }
        fx.push(DomCommand::ShowToast {
            message: message.into(),
            kind,
        });
        self.dismiss = Some(fx.schedule(self.duration_ms, TimerTask::DismissToast));
    }

    pub fn timer_fired(&mut self, timer: TimerId, fx: &mut Effects) {
        if self.dismiss == Some(timer) {
            self.dismiss = None;
            fx.push(DomCommand::HideToast);
        }
    }

    pub fn is_showing(&self) -> bool {
        self.dismiss.is_some()
    }
}
