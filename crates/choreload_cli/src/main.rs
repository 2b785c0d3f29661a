//! `choreload` command-line entry point.

use anyhow::Result;
use choreload_cli::app::{execute, Cli};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    execute(&cli, &mut stdout.lock())
}
