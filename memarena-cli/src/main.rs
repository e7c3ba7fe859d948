//! ## memarena-cli
//! **Demonstration driver for the arena and the zero-copy views**
//!
//! - `memarena demo`: fill an arena past capacity, reset it, reuse it
//! - `memarena views`: convert between text and bytes without copying

use clap::Parser;

mod commands;
mod demo;
mod views;

use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    commands::run_command(cli)
}
