use crate::State;
use clap::Args;
use lockgraph_lockfile::RawLockfile;
use miette::{Context, IntoDiagnostic};
use std::fs;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Don't write anything and fail if package-lock.json is not in canonical form.
    #[clap(long)]
    pub check: bool,
}

impl NormalizeArgs {
    /// Execute the subcommand.
    pub fn run(self, state: State) -> miette::Result<()> {
        let NormalizeArgs { check } = self;
        let raw = state.graph().wrap_err("parse the lockfile")?.synth()?;
        let content = raw.to_json_string().into_diagnostic().wrap_err("serialize the lockfile")?;
        let file_path = state.dir.join(RawLockfile::FILE_NAME);
        let current = fs::read_to_string(&file_path).into_diagnostic().wrap_err("read the lockfile")?;

        if current == content {
            println!("{} is already normalized", RawLockfile::FILE_NAME);
            return Ok(());
        }

        if check {
            miette::bail!(
                code = "lockgraph_cli::not_normalized",
                help = "Run `lockgraph normalize` to rewrite it.",
                "{} is not normalized",
                RawLockfile::FILE_NAME
            );
        }

        raw.save_to_dir(&state.dir).wrap_err("write the lockfile")?;
        println!("Normalized {}", RawLockfile::FILE_NAME);
        Ok(())
    }
}
