use std::rc::Rc;

use crate::{
    channel::OutputChannel,
    components::{status_bar::StatusBar, Component},
    config::key_map::{Key, KeyMap},
    dispatcher::TriggerDispatcher,
    system::{
        command::{Command, CommandGroup},
        event::Event,
        signal::SignalQueue,
    },
};
use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::prelude::*;

pub struct App<'a, C: OutputChannel + ?Sized> {
    dispatcher: TriggerDispatcher<'a, C>,
    status_bar: StatusBar,
    key_map: Rc<KeyMap>,
    exiting: bool,
}

impl<'a, C: OutputChannel + ?Sized> App<'a, C> {
    pub fn new(dispatcher: TriggerDispatcher<'a, C>, key_map: Rc<KeyMap>) -> Self {
        let status_bar = StatusBar::new(dispatcher.channel_name(), key_map.clone());

        Self {
            dispatcher,
            status_bar,
            key_map,
            exiting: false,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read from or drawn to, or
    /// as soon as a trigger signal fails to send. A failed send ends the
    /// session instead of being retried.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        // initial draw call
        terminal.draw(|frame| {
            let area = frame.area();
            self.render(frame, area);
        })?;

        loop {
            let event = crossterm::event::read()?;
            let update = self.handle_terminal_event(&event)?;

            if self.exiting {
                tracing::info!(
                    signals_sent = self.status_bar.signals_sent(),
                    "Exiting event loop"
                );
                return Ok(());
            }

            if update {
                terminal.draw(|frame| {
                    let area = frame.area();
                    self.render(frame, area);
                })?;
            }
        }
    }

    /// Handles one terminal event and every signal it causes. Returns whether
    /// the screen needs to be redrawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the event fired a trigger whose write failed.
    pub fn handle_terminal_event(&mut self, event: &CrosstermEvent) -> Result<bool> {
        let mut queue = SignalQueue::default();

        let update = match event {
            // only key-down counts; release and repeat events are ignored
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                match self.key_map.command_for_key(Key::from(*key)) {
                    Some(command) => {
                        self.handle_command(&command, &mut queue)?;
                        true
                    }
                    None => false,
                }
            }
            CrosstermEvent::Mouse(_) => {
                self.dispatcher.handle_raw_event(event, &mut queue)?;
                !queue.is_empty()
            }
            CrosstermEvent::FocusGained => {
                queue.push(Event::AppFocusGained);
                true
            }
            CrosstermEvent::FocusLost => {
                queue.push(Event::AppFocusLost);
                true
            }
            CrosstermEvent::Resize(..) => true,
            _ => false,
        };

        self.process_signals(queue);
        Ok(update)
    }

    fn process_signals(&mut self, mut queue: SignalQueue) {
        while let Some(event) = queue.pop() {
            tracing::trace!("Processing event {event}");
            self.dispatcher.handle_event(&event, &mut queue);
            self.status_bar.handle_event(&event, &mut queue);
        }
    }

    pub const fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub const fn signals_sent(&self) -> usize {
        self.status_bar.signals_sent()
    }
}

impl<C: OutputChannel + ?Sized> Component for App<'_, C> {
    fn commands(&self) -> Vec<CommandGroup> {
        let mut out = self.dispatcher.commands();
        out.push(CommandGroup::new(vec![Command::Quit], "quit"));
        out
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) -> Result<()> {
        match command {
            Command::Quit => {
                self.exiting = true;
                Ok(())
            }
            Command::Trigger => self.dispatcher.handle_command(command, queue),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);

        self.dispatcher.render(frame, layout[0]);

        self.status_bar.commands = self.commands();
        self.status_bar.render(frame, layout[1]);
    }
}
