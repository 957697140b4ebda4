use std::rc::Rc;

use crate::{
    components::Component,
    config::key_map::KeyMap,
    system::{command::CommandGroup, event::Event, signal::SignalQueue},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Padding, Paragraph},
};

/// Shows which port the pad is talking to, how many signals have gone out
/// this session, and the key hints for the available commands.
#[derive(Debug, Default)]
pub struct StatusBar {
    pub commands: Vec<CommandGroup>,

    port_name: String,
    signals_sent: usize,
    focused: bool,

    key_map: Rc<KeyMap>,
}

impl StatusBar {
    pub fn new(port_name: &str, key_map: Rc<KeyMap>) -> Self {
        Self {
            port_name: port_name.to_string(),
            focused: true,
            key_map,
            ..Default::default()
        }
    }

    pub const fn signals_sent(&self) -> usize {
        self.signals_sent
    }

    fn cmd_group_to_spans<'a>(&self, group: &'a CommandGroup) -> Vec<Span<'a>> {
        let hint_style = Style::default();
        let key_hint = group
            .commands
            .iter()
            .map(|c| self.key_map.key_hint(*c))
            .collect::<Vec<_>>()
            .join(" ");

        vec![
            Span::styled(key_hint, hint_style.add_modifier(Modifier::BOLD)),
            Span::styled(": ", hint_style),
            Span::styled(group.name, hint_style.fg(Color::Gray)),
            Span::raw("  "),
        ]
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (dot, dot_style) = if self.focused {
            ("● ", Style::default().green())
        } else {
            ("● unfocused ", Style::default().yellow())
        };

        let status = Line::from(vec![
            Span::styled(dot, dot_style),
            Span::styled(self.port_name.clone(), Style::default().bold()),
            Span::raw(format!("  sent: {}", self.signals_sent)),
        ]);

        let hints = Line::from(
            self.commands
                .iter()
                .flat_map(|group| self.cmd_group_to_spans(group))
                .collect::<Vec<Span>>(),
        )
        .right_aligned();

        let block = Block::default().padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).split(inner);
        frame.render_widget(Paragraph::new(status), layout[0]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn handle_event(&mut self, event: &Event, _queue: &mut SignalQueue) {
        match event {
            Event::SignalSent => self.signals_sent += 1,
            Event::AppFocusGained => self.focused = true,
            Event::AppFocusLost => self.focused = false,
        }
    }
}
