mod cli;
mod platform;

use clap::Parser;
use lens_logging::lens_error;

use crate::platform::logging::{self, LogDestination};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    logging::initialize(destination, logging::level_for(cli.verbose));
    platform::run(cli).inspect_err(|err| lens_error!("{err:#}"))
}
