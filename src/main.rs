use std::io;

use anyhow::Context;
use clap::Parser;
use railway_reservation::{logger, AppConfig, CliArgs, Console, Menu};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    if let Err(e) = logger::init_logger(&args.log_level) {
        eprintln!("failed to initialise logging: {e}");
    }

    let config = AppConfig::from_args(&args).context("failed to load configuration")?;
    let state = config.initial_state();
    tracing::info!(trains = state.trains.len(), "catalog loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock());
    let mut menu = Menu::new(state, config.admin, console);
    menu.run().context("console I/O failed")?;

    Ok(())
}
