use std::collections::VecDeque;

use super::event::Event;

#[derive(Debug, Default)]
pub struct SignalQueue {
    queue: VecDeque<Event>,
}

impl SignalQueue {
    pub fn push(&mut self, event: impl Into<Event>) {
        self.queue.push_back(event.into());
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
