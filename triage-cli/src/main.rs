mod cli;
mod logging;
mod opt;

use anyhow::Error;
use clap::Parser;
use opt::Cli;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    if cli.debug {
        logging::setup()?;
    }
    cli::exec(cli.command, cli.backend).await
}
