use crate::system::{
    command::{Command, CommandGroup},
    event::Event,
    signal::SignalQueue,
};
use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use ratatui::{layout::Rect, Frame};

pub mod status_bar;

pub trait Component {
    fn commands(&self) -> Vec<CommandGroup> {
        vec![]
    }

    fn handle_command(&mut self, _command: &Command, _queue: &mut SignalQueue) -> Result<()> {
        Ok(())
    }

    fn handle_raw_event(&mut self, _event: &CrosstermEvent, _queue: &mut SignalQueue) -> Result<()> {
        Ok(())
    }

    fn handle_event(&mut self, _event: &Event, _queue: &mut SignalQueue) {}

    fn render(&mut self, _frame: &mut Frame, _area: Rect) {}
}
