//! `tessel` binary: turns an editor scene file into a JSX component.

use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use miette::GraphicalReportHandler;

use tessel::TesselError;
use tessel_cli::{Args, error_adapter::to_reportables};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = args.log_filter().unwrap_or_else(|err| {
        eprintln!("{err}; falling back to 'warn'");
        log::LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(args:?; "Parsed arguments");

    match tessel_cli::run(&args) {
        Ok(()) => {
            info!(output_file = args.output; "Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Prints every diagnostic of `err` to stderr, regardless of the log level.
fn report(err: &TesselError) {
    let handler = GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &reportable) {
            Ok(()) => eprint!("{rendered}"),
            Err(_) => eprintln!("error: {reportable}"),
        }
    }
}
