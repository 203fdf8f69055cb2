//! Hashwarden CLI: audit a directory against a baseline and report changes.

use anyhow::Result;
use clap::Parser;
use hashwarden::engine::arg_parser::Cli;
use hashwarden::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
