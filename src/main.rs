mod api;
mod app;
mod application;
mod config;
mod console;
mod domain;
mod ui;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{Cli, Mode, Settings};
use domain::AppError;

fn init_logging(mode: Mode) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(mode.default_log_filter()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> ExitCode {
    let settings = Settings::from(Cli::parse());
    init_logging(settings.mode);

    let result = match settings.mode {
        Mode::Desktop => app::run(settings).map_err(|e| AppError::Ui(e.to_string())),
        Mode::Simple => app::simple::run(settings).map_err(|e| AppError::Ui(e.to_string())),
        Mode::Console => console::run(settings),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "feather exited with an error");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
