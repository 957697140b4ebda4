#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Event {
    /// One trigger signal was written to the output channel
    SignalSent,

    AppFocusGained,
    AppFocusLost,
}
