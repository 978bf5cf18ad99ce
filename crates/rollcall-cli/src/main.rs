use std::io;

use anyhow::Result;
use clap::Parser;
use rollcall_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    rollcall_cli::init_tracing(cli.log_json)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    rollcall_cli::run(&cli, io::stdin().lock(), &mut out)
}
