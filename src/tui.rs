use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};

const TITLE: &str = env!("CARGO_PKG_NAME");

fn enter_pad_screen(out: &mut impl Write, title: &str) -> io::Result<()> {
    crossterm::execute!(
        out,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle(title)
    )
}

fn leave_pad_screen(out: &mut impl Write) -> io::Result<()> {
    crossterm::execute!(
        out,
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )
}

/// Switches to raw mode and the alternate screen, turns on mouse and focus
/// reporting, and titles the terminal after the pad.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    tracing::debug!("Setting up terminal");

    let mut stdout = io::stdout();
    crossterm::terminal::enable_raw_mode()?;
    enter_pad_screen(&mut stdout, TITLE)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Undoes `setup_terminal`. Every step runs even if an earlier one fails, so
/// the shell is never left in raw mode; the first failure is returned.
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    let raw_mode = crossterm::terminal::disable_raw_mode();
    let screen = leave_pad_screen(terminal.backend_mut());
    let cursor = terminal.show_cursor();

    raw_mode.and(screen).and(cursor)?;

    tracing::debug!("Terminal restored");

    Ok(())
}
