//! ## kinsight
//! Resolves container-insights and GPU metric flags from agent configuration.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    commands::run_command(cli, &mut stdout.lock())
}
