use std::{cell::RefCell, rc::Rc};

use crate::{channel::OutputChannel, error::ChannelError};

#[derive(Debug, Default)]
struct MockChannelState {
    writes: Vec<Vec<u8>>,
    closed: bool,
}

/// An in-memory channel that records every write. Clones share state, so a
/// test can keep a handle to inspect or close the channel while a dispatcher
/// holds the borrowed original.
#[derive(Debug, Clone)]
pub struct MockChannel {
    name: String,
    state: Rc<RefCell<MockChannelState>>,
}

impl MockChannel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Rc::default(),
        }
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.borrow().writes.clone()
    }

    pub fn close(&self) {
        self.state.borrow_mut().closed = true;
    }
}

impl OutputChannel for MockChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(ChannelError::Closed(self.name.clone()));
        }
        state.writes.push(bytes.to_vec());
        Ok(())
    }
}
