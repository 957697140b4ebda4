use crate::{
    config::Config,
    utils::storage::{LastPort, Storage},
};
use anyhow::{anyhow, Result};
use std::cell::RefCell;

#[derive(Debug, Default)]
pub struct MockStorage {
    pub config: Config,
    pub last_port: RefCell<Option<LastPort>>,
}

impl Storage for MockStorage {
    fn read_config(&self) -> Result<Config> {
        Ok(self.config.clone())
    }

    fn read_last_port(&self) -> Result<LastPort> {
        self.last_port
            .borrow()
            .clone()
            .ok_or_else(|| anyhow!("No last port in mock"))
    }

    fn write_last_port(&self, last_port: &LastPort) -> Result<()> {
        *self.last_port.borrow_mut() = Some(last_port.clone());
        Ok(())
    }
}
