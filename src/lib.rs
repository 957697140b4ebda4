pub mod app;
pub mod channel;
pub mod components;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod setup;
pub mod system;
pub mod tui;
pub mod utils;

#[cfg(test)]
mod testing;
