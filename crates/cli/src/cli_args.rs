pub mod list;
pub mod normalize;
pub mod remove;

use crate::State;
use clap::{Parser, Subcommand};
use list::ListArgs;
use miette::Context;
use normalize::NormalizeArgs;
use remove::RemoveArgs;
use std::path::PathBuf;

/// Inspect and rewrite npm lockfiles of version 1.
#[derive(Debug, Parser)]
#[clap(name = "lockgraph")]
#[clap(bin_name = "lockgraph")]
#[clap(version = "0.0.1")]
#[clap(about = "Inspect and rewrite npm lockfiles of version 1")]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: CliCommand,

    /// Set working directory.
    #[clap(short = 'C', long, default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Verify that package-lock.json satisfies package.json.
    Check,
    /// Rewrite package-lock.json in canonical form.
    Normalize(NormalizeArgs),
    /// Print the dependency tree.
    List(ListArgs),
    /// Remove a direct dependency and the packages only it needed.
    Remove(RemoveArgs),
}

impl CliArgs {
    /// Execute the command
    pub fn run(self) -> miette::Result<()> {
        let CliArgs { command, dir } = self;
        let state = || State::init(&dir).wrap_err("initialize the state");

        match command {
            CliCommand::Check => {
                let graph = state()?.graph().wrap_err("parse the lockfile")?;
                let count = graph.packages().count();
                println!("Lockfile is in sync with package.json ({count} packages)");
                Ok(())
            }
            CliCommand::Normalize(args) => args.run(state()?),
            CliCommand::List(args) => args.run(state()?),
            CliCommand::Remove(args) => args.run(state()?),
        }
    }
}
