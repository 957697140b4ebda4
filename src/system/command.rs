#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, strum_macros::Display)]
pub enum Command {
    Trigger,
    Quit,
}

#[derive(Debug, Clone)]
pub struct CommandGroup {
    pub commands: Vec<Command>,
    pub name: &'static str,
}

impl CommandGroup {
    pub const fn new(commands: Vec<Command>, name: &'static str) -> Self {
        Self { commands, name }
    }
}
