use crate::{
    channel::OutputChannel,
    components::Component,
    error::ChannelError,
    system::{
        command::{Command, CommandGroup},
        event::Event,
        signal::SignalQueue,
    },
};
use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Paragraph},
};

/// The single byte sent for every trigger, an ASCII space.
pub const TRIGGER_SIGNAL: &[u8] = b" ";

const BUTTON_LABEL: &str = "NOW";
const BUTTON_MARGIN_PERCENT: u16 = 5;

/// Binds every trigger source (the on-screen button and the trigger keys) to
/// one action: writing `TRIGGER_SIGNAL` to an already-open channel.
///
/// The dispatcher borrows the channel and never opens or closes it. It keeps
/// no state between triggers apart from where the button was last drawn, so
/// mouse clicks can be hit-tested.
#[derive(Debug)]
pub struct TriggerDispatcher<'a, C: OutputChannel + ?Sized> {
    channel: &'a mut C,
    button_area: Option<Rect>,
}

impl<'a, C: OutputChannel + ?Sized> TriggerDispatcher<'a, C> {
    pub const fn bind(channel: &'a mut C) -> Self {
        Self {
            channel,
            button_area: None,
        }
    }

    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    /// Writes one trigger signal to the channel. Failures are not retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is closed or the write fails.
    pub fn trigger(&mut self, queue: &mut SignalQueue) -> Result<(), ChannelError> {
        self.channel
            .write_bytes(TRIGGER_SIGNAL)
            .inspect_err(|err| tracing::error!("Failed to send trigger signal: {err}"))?;

        tracing::debug!(channel = self.channel.name(), "Sent trigger signal");
        queue.push(Event::SignalSent);
        Ok(())
    }

    fn is_button_click(&self, mouse: &MouseEvent) -> bool {
        mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self
                .button_area
                .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)))
    }
}

/// The part of `area` covered by the button: everything but a margin of
/// `BUTTON_MARGIN_PERCENT` on each side.
fn button_area(area: Rect) -> Rect {
    let margins = [
        Constraint::Percentage(BUTTON_MARGIN_PERCENT),
        Constraint::Fill(1),
        Constraint::Percentage(BUTTON_MARGIN_PERCENT),
    ];
    let row = Layout::vertical(margins).split(area)[1];
    Layout::horizontal(margins).split(row)[1]
}

impl<C: OutputChannel + ?Sized> Component for TriggerDispatcher<'_, C> {
    fn commands(&self) -> Vec<CommandGroup> {
        vec![CommandGroup::new(vec![Command::Trigger], "send")]
    }

    fn handle_command(&mut self, command: &Command, queue: &mut SignalQueue) -> Result<()> {
        if *command == Command::Trigger {
            self.trigger(queue)?;
        }
        Ok(())
    }

    fn handle_raw_event(&mut self, event: &CrosstermEvent, queue: &mut SignalQueue) -> Result<()> {
        if let CrosstermEvent::Mouse(mouse) = event {
            if self.is_button_click(mouse) {
                self.trigger(queue)?;
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let button = button_area(area);
        self.button_area = Some(button);

        let block = Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(Style::default().cyan());
        let inner = block.inner(button);
        frame.render_widget(block, button);

        let label_row = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(inner)[1];

        let label = Paragraph::new(BUTTON_LABEL.bold()).centered();
        frame.render_widget(label, label_row);
    }
}

#[expect(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock_channel::MockChannel, ComponentTestHarness};
    use ratatui::backend::TestBackend;

    fn rendered(dispatcher: &mut TriggerDispatcher<'_, MockChannel>, width: u16, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                dispatcher.render(frame, area);
            })
            .unwrap();
    }

    #[test]
    fn button_click_sends_one_space() {
        let mut channel = MockChannel::new("COM3");
        let writes = channel.clone();
        let mut dispatcher = TriggerDispatcher::bind(&mut channel);
        rendered(&mut dispatcher, 40, 20);

        let mut test = ComponentTestHarness::new(dispatcher);
        test.given_click(20, 10);

        assert_eq!(writes.writes(), vec![b" ".to_vec()]);
        test.expect_event(|e| matches!(e, Event::SignalSent));
    }

    #[test]
    fn letter_key_sends_one_space() {
        let mut channel = MockChannel::new("COM3");
        let writes = channel.clone();
        let mut test = ComponentTestHarness::new(TriggerDispatcher::bind(&mut channel));

        test.given_key("q");

        assert_eq!(writes.writes(), vec![b" ".to_vec()]);
    }

    #[test]
    fn every_trigger_source_sends_exactly_one_space() {
        let sources = ["space", "enter"]
            .into_iter()
            .map(String::from)
            .chain(('a'..='z').map(String::from))
            .chain(('0'..='9').map(String::from));

        for source in sources {
            let mut channel = MockChannel::new("COM3");
            let writes = channel.clone();
            let mut test = ComponentTestHarness::new(TriggerDispatcher::bind(&mut channel));

            test.given_key(&source);

            assert_eq!(
                writes.writes(),
                vec![TRIGGER_SIGNAL.to_vec()],
                "'{source}' should send exactly one space"
            );
        }
    }

    #[test]
    fn digit_then_enter_sends_two_spaces_in_order() {
        let mut channel = MockChannel::new("COM3");
        let writes = channel.clone();
        let mut test = ComponentTestHarness::new(TriggerDispatcher::bind(&mut channel));

        test.given_key("5");
        test.given_key("enter");

        assert_eq!(writes.writes(), vec![b" ".to_vec(), b" ".to_vec()]);
        assert_eq!(test.events(), &[Event::SignalSent, Event::SignalSent]);
    }

    #[test]
    fn repeated_triggers_are_not_coalesced() {
        let mut channel = MockChannel::new("COM3");
        let writes = channel.clone();
        let mut dispatcher = TriggerDispatcher::bind(&mut channel);
        let mut queue = SignalQueue::default();

        for _ in 0..25 {
            dispatcher.trigger(&mut queue).unwrap();
        }

        let writes = writes.writes();
        assert_eq!(writes.len(), 25);
        assert!(writes.iter().all(|w| w.as_slice() == TRIGGER_SIGNAL));
    }

    #[test]
    fn trigger_on_closed_channel_fails_without_writing() {
        let mut channel = MockChannel::new("COM3");
        let handle = channel.clone();
        let mut dispatcher = TriggerDispatcher::bind(&mut channel);
        let mut queue = SignalQueue::default();

        dispatcher.trigger(&mut queue).unwrap();
        handle.close();
        let res = dispatcher.trigger(&mut queue);

        assert!(matches!(res, Err(ChannelError::Closed(_))));
        assert_eq!(handle.writes().len(), 1);
        assert_eq!(queue.pop(), Some(Event::SignalSent));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn nothing_is_written_until_triggered() {
        let mut channel = MockChannel::new("COM3");
        let writes = channel.clone();
        let mut dispatcher = TriggerDispatcher::bind(&mut channel);
        rendered(&mut dispatcher, 40, 20);

        assert!(writes.writes().is_empty());
    }

    #[test]
    fn clicks_outside_the_button_are_ignored() {
        let mut channel = MockChannel::new("COM3");
        let writes = channel.clone();
        let mut dispatcher = TriggerDispatcher::bind(&mut channel);
        rendered(&mut dispatcher, 100, 100);

        let mut test = ComponentTestHarness::new(dispatcher);
        // inside the 5% margin
        test.given_click(1, 1);
        test.given_click(98, 50);

        assert!(writes.writes().is_empty());
    }

    #[test]
    fn clicks_before_first_render_are_ignored() {
        let mut channel = MockChannel::new("COM3");
        let writes = channel.clone();
        let mut test = ComponentTestHarness::new(TriggerDispatcher::bind(&mut channel));

        test.given_click(0, 0);

        assert!(writes.writes().is_empty());
    }

    #[test]
    fn button_covers_ninety_percent_of_the_area() {
        let area = button_area(Rect::new(0, 0, 100, 100));
        assert_eq!(area, Rect::new(5, 5, 90, 90));
    }

    #[test]
    fn renders_the_button_label() {
        let mut channel = MockChannel::new("COM3");
        let mut dispatcher = TriggerDispatcher::bind(&mut channel);
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                dispatcher.render(frame, area);
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(screen.contains("NOW"));
    }
}
