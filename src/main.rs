use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod domain;
mod logging;
mod services;

use cli::Cli;
use services::theme;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let cfg = theme::load_page_config(cli.config.as_deref())?;
    commands::handle(&cli, &cfg)
}
