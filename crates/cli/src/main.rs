mod build_info;
mod cli;
mod config;
mod error;
mod flags;
mod logging;
mod pipeline;
mod sink;
mod slack;
mod target;

use std::env;
use std::io;
use std::process::ExitCode;

use build_info::BuildInfo;
use chrono::Utc;
use cli::Cli;
use config::Config;
use error::CliError;
use promplot_query::PrometheusClient;
use promplot_vis::Plotter;
use sink::Sink;

fn main() -> ExitCode {
    let build = BuildInfo::current();

    let cli = match Cli::try_parse_args(env::args_os()) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            // --help lands here too and goes to stdout.
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli, &build) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, build: &BuildInfo) -> Result<(), CliError> {
    if cli.version {
        println!("{build}");
        return Ok(());
    }

    let config = Config::new(cli, Utc::now())?;
    logging::init(config.silent);

    let fetcher = PrometheusClient::new(&config.url)?;
    let sink = Sink::new(&config.target);

    pipeline::run(
        &config,
        &fetcher,
        &Plotter::default(),
        &sink,
        &mut io::stdout().lock(),
    )
}
