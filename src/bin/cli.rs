// src/bin/cli.rs
use clap::Parser;
use tcg_scrape::cli::{self, Cli};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    tcg_scrape::log::init(&args.log_level, args.log_file.as_deref())?;
    cli::run(args)?;
    Ok(())
}
