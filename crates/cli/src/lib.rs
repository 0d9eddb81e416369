mod cli_args;
mod state;

pub use cli_args::{CliArgs, CliCommand};
pub use state::{InitStateError, State};

use clap::Parser;
use lockgraph_diagnostics::enable_tracing_by_env;

pub fn run_cli() -> miette::Result<()> {
    enable_tracing_by_env();
    CliArgs::parse().run()
}
