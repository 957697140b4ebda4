use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use crate::{
    channel::PortListing,
    utils::storage::{LastPort, Storage},
};

/// How the user asked for the port to be picked on startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortChoice {
    Named(String),
    Last,
    Prompt,
}

/// What a run does, decided from the command line alone so that listing
/// ports works even when the config file is broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupAction {
    ListPorts,
    Open(PortChoice),
}

impl StartupAction {
    pub fn from_args(port: Option<String>, last: bool, list: bool) -> Self {
        match (list, port, last) {
            (true, ..) => Self::ListPorts,
            (false, Some(name), _) => Self::Open(PortChoice::Named(name)),
            (false, None, true) => Self::Open(PortChoice::Last),
            (false, None, false) => Self::Open(PortChoice::Prompt),
        }
    }
}

/// Reports how the session ended once the terminal is back to normal. Both
/// the session error and a failure to restore the terminal are printed, the
/// former first. Returns whether the run ended cleanly.
pub fn report_session_end(
    session: Result<()>,
    restore: Result<()>,
    mut err_out: impl Write,
) -> bool {
    let mut clean = true;

    for (label, res) in [("Error", session), ("Could not restore terminal", restore)] {
        if let Err(err) = res {
            clean = false;
            // stderr is all that is left at this point
            let _ = writeln!(err_out, "{label}: {err:#}");
        }
    }

    clean
}

/// Settles on the port and baud rate to open before the UI starts.
///
/// `--baud` wins over everything; otherwise a port remembered with `--last`
/// keeps its own baud rate and any other port uses the configured one.
///
/// # Errors
///
/// Returns an error if `--last` is requested with no previous session, if
/// the prompt receives an empty answer, or if reading/writing the terminal
/// fails.
pub fn choose_port(
    choice: PortChoice,
    configured_baud: u32,
    baud_override: Option<u32>,
    storage: &dyn Storage,
    ports: &[PortListing],
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<LastPort> {
    let mut port = match choice {
        PortChoice::Named(name) => LastPort {
            name,
            baud_rate: configured_baud,
        },
        PortChoice::Last => storage
            .read_last_port()
            .context("`--last` was given, but no previous port was recorded")?,
        PortChoice::Prompt => {
            print_ports(ports, &mut output)?;
            write!(output, "Please enter a valid port name (e.g. \"COM3\"):")?;
            output.flush()?;

            let mut line = String::new();
            input.read_line(&mut line)?;
            let name = line.trim();
            if name.is_empty() {
                bail!("No port name entered");
            }

            LastPort {
                name: name.to_string(),
                baud_rate: configured_baud,
            }
        }
    };

    if let Some(baud_rate) = baud_override {
        port.baud_rate = baud_rate;
    }

    Ok(port)
}

/// # Errors
///
/// Returns an error if writing to `output` fails.
pub fn print_ports(ports: &[PortListing], mut output: impl Write) -> Result<()> {
    writeln!(output, "Available ports:")?;
    for port in ports {
        writeln!(output, "{port}")?;
    }
    Ok(())
}
