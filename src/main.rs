use anyhow::{Context, Result};
use clap::Parser;
use std::{io, path::PathBuf, process::ExitCode, rc::Rc};
use trigpad::{
    app::App,
    channel::{list_ports, SerialChannel},
    dispatcher::TriggerDispatcher,
    setup::{choose_port, print_ports, report_session_end, PortChoice, StartupAction},
    tui::{restore_terminal, setup_terminal},
    utils::storage::{get_app_data_path, FileStorage, Storage},
};

/// A one-button pad that sends a trigger byte over a serial port.
#[derive(Parser)]
#[command(author, version)]
pub struct Args {
    /// Serial port to open (eg. "COM3" or "/dev/ttyUSB0"); prompts if omitted
    #[arg(long, short, conflicts_with = "last")]
    port: Option<String>,

    /// Reopen the port used by the most recent session
    #[arg(long, short)]
    last: bool,

    /// Data rate to open the port with; defaults to the configured rate
    #[arg(long, short)]
    baud: Option<u32>,

    /// List the available serial ports and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<ExitCode> {
    init_tracing()?;

    tracing::info!(
        "Started {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );

    let args = Args::parse();

    let choice = match StartupAction::from_args(args.port, args.last, args.list) {
        StartupAction::ListPorts => {
            print_ports(&list_ports()?, io::stdout())?;
            return Ok(ExitCode::SUCCESS);
        }
        StartupAction::Open(choice) => choice,
    };

    let storage = FileStorage::init()?;

    // load config
    let config = storage.read_config().context("Loading config")?;

    // an empty listing is not fatal, the user may still know the port name
    let ports = if choice == PortChoice::Prompt {
        list_ports().unwrap_or_else(|err| {
            tracing::warn!("Could not list ports: {err}");
            vec![]
        })
    } else {
        vec![]
    };

    let port = choose_port(
        choice,
        config.serial.baud_rate,
        args.baud,
        &storage,
        &ports,
        io::stdin().lock(),
        io::stdout(),
    )?;

    // open before the UI comes up so failures are visible on the plain terminal
    let mut channel = SerialChannel::open(&port.name, port.baud_rate, config.serial.timeout())?;

    if let Err(err) = storage.write_last_port(&port) {
        tracing::warn!("Could not remember port: {err}");
    }

    let mut terminal = setup_terminal()?;
    let mut app = App::new(
        TriggerDispatcher::bind(&mut channel),
        Rc::new(config.key_map),
    );

    let res = app.run(&mut terminal);
    drop(app);

    if let Err(err) = &res {
        tracing::error!("Session ended with an error: {err:?}");
    }

    let restored = restore_terminal(terminal);
    channel.close();

    if report_session_end(res, restored, io::stderr()) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Initializes the `tracing` system for logging.
fn init_tracing() -> Result<()> {
    let log_env = format!("{}_LOGLEVEL", env!("CARGO_PKG_NAME").to_uppercase());
    let log_filename = format!("{}.log", env!("CARGO_PKG_NAME"));

    let log_file_path = if let Ok(dir) = get_app_data_path() {
        dir.join(log_filename)
    } else {
        PathBuf::from(".")
            .join(format!(".{}", env!("CARGO_PKG_NAME")))
            .join(log_filename)
    };

    if let Some(parent) = log_file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::File::create(log_file_path)?;

    let filter = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(log_env))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")));

    let subscriber = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(log_file)
        .with_ansi(false)
        .pretty()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
