use crate::{
    components::Component,
    config::key_map::{Key, KeyMap},
    system::{event::Event, signal::SignalQueue},
};
use crossterm::event::{
    Event as CrosstermEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind, KeyModifiers,
};

pub mod mock_channel;
pub mod mock_storage;

/// Drives a single component the way `App` does: keys are resolved through
/// the default key map, raw mouse events are passed straight through, and
/// every emitted event is fed back until the queue is drained.
pub struct ComponentTestHarness<C: Component> {
    component: C,
    key_map: KeyMap,
    events: Vec<Event>,
}

impl<C: Component> ComponentTestHarness<C> {
    pub fn new(component: C) -> Self {
        Self {
            component,
            key_map: KeyMap::default(),
            events: Vec::new(),
        }
    }

    pub const fn component(&self) -> &C {
        &self.component
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn given_key(&mut self, string: &str) {
        let key = Key::try_from(string).expect("key codes in tests should be correct");
        let key_event = KeyEvent::new(key.code, key.modifiers);
        let Some(command) = self.key_map.command_for_key(key_event.into()) else {
            return;
        };

        let mut queue = SignalQueue::default();
        self.component
            .handle_command(&command, &mut queue)
            .expect("commands in tests should succeed");
        self.process_signals(queue);
    }

    pub fn given_click(&mut self, column: u16, row: u16) {
        let raw_event = CrosstermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        });
        let mut queue = SignalQueue::default();
        self.component
            .handle_raw_event(&raw_event, &mut queue)
            .expect("raw events in tests should succeed");
        self.process_signals(queue);
    }

    pub fn given_event(&mut self, event: Event) {
        let mut queue = SignalQueue::default();
        queue.push(event);
        self.process_signals(queue);
    }

    fn process_signals(&mut self, mut queue: SignalQueue) {
        while let Some(event) = queue.pop() {
            let mut new_queue = SignalQueue::default();
            self.component.handle_event(&event, &mut new_queue);

            // Add any new signals back to the main queue for processing
            while let Some(new_event) = new_queue.pop() {
                queue.push(new_event);
            }

            // Store the processed signal for test assertions
            self.events.push(event);
        }
    }

    pub fn expect_event<P: FnMut(&&Event) -> bool>(&self, predicate: P) {
        let event = self.events.iter().find(predicate);
        assert!(
            event.is_some(),
            "Matching event not found. These events were recorded:\n{:?}",
            self.events
        );
    }
}
