use anyhow::Result;
use clap::Parser;
use contributor_colors::core::{commands, CommandLineArguments, Config, Logger};
use log::LevelFilter;

fn main() -> Result<()> {
    let args = CommandLineArguments::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Logger::install(level)?;

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    commands::run(&args.command, &config)
}
