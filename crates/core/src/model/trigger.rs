/// One-shot lifecycle of an animatable element.
///
/// Every reveal, counter and skill-bar element starts `Pending` and moves to
/// `Triggered` the first time its observer reports it visible. The transition
/// never reverses, so repeated observer callbacks are harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    #[default]
    Pending,
    Triggered,
}

impl Trigger {
    /// Move to `Triggered`. Returns `true` only for the call that performed
    /// the transition.
    #[must_use]
    pub fn fire(&mut self) -> bool {
        match self {
            Trigger::Pending => {
                *self = Trigger::Triggered;
                true
            }
            Trigger::Triggered => false,
        }
    }

    pub fn is_pending(self) -> bool {
        self == Trigger::Pending
    }
}
