/// Progress of one coordinator's request. Only `InFlight` counts as busy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestLifecycle {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl RequestLifecycle {
    pub fn is_busy(self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub(super) fn begin(&mut self) {
        *self = Self::InFlight;
    }

    /// Leave `InFlight` according to the outcome.
    pub(super) fn settle<T, E>(&mut self, result: &Result<T, E>) {
        *self = if result.is_ok() {
            Self::Succeeded
        } else {
            Self::Failed
        };
    }
}
