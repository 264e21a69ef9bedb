//! Forge compiler CLI.

use clap::Parser;
use forgec::migrate::MigrateError;
use forgec::{Cli, CliError};

fn main() {
    let cli = Cli::parse();
    forgec::init_tracing();

    if let Err(err) = forgec::run(cli) {
        match &err {
            // Already rendered by the diagnostic emitter.
            CliError::Diagnostics(_) => {}
            CliError::Migrate(MigrateError::Destructive { warning, .. }) => eprint!("{warning}"),
            other => eprintln!("error: {other}"),
        }
        std::process::exit(err.exit_code());
    }
}
