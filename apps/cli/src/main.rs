//! autocrumb CLI - fills breadcrumb markup in static HTML.
//!
//! Derives a breadcrumb trail from each page's URL and writes it into the
//! elements marked with `fj-breadcrumb` attributes.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
