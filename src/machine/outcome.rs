//! Result of a successful dispatch.

/// What a dispatch did to the stored state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The policy produced a new state and it was committed.
    Transitioned,

    /// The policy declined the event; the state was left as it was.
    Unchanged,
}

impl Outcome {
    /// Whether a new state was committed.
    pub fn is_transitioned(self) -> bool {
        matches!(self, Self::Transitioned)
    }
}
