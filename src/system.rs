/// Commands represent user intentions. Key presses are resolved to commands
/// through the key map, and each command is handed to the app and then to the
/// trigger dispatcher.
pub mod command;

/// Events represent things that happen within the program. Events are emitted
/// by components as a result of handling a command or a raw terminal event.
/// Every component receives every event.
pub mod event;

/// `SignalQueue`, the FIFO that components push events onto while the app
/// drains it between input events.
pub mod signal;
