use anyhow::Result;
use clap::Parser;

use wordsmith::cli::{self, CliArgs};

fn main() -> Result<()> {
    wordsmith::tracing::init();

    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run(args, &mut out)
}
