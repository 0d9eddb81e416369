use crate::State;
use clap::Args;
use miette::Context;
use tracing::debug;

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Name of the direct dependency to remove.
    pub name: String,
}

impl RemoveArgs {
    /// Execute the subcommand.
    pub fn run(self, state: State) -> miette::Result<()> {
        let RemoveArgs { name } = self;
        let mut graph = state.graph().wrap_err("parse the lockfile")?;
        let State { dir, mut manifest, .. } = state;

        let Some(group) = manifest.remove_dependency(&name) else {
            miette::bail!(
                code = "lockgraph_cli::not_a_direct_dependency",
                help = "Only packages listed in package.json can be removed.",
                "{name:?} is not a direct dependency"
            );
        };
        // Peer dependencies that are not installed have no root entry.
        let removed = graph.remove_root(&name);
        debug!(?group, ?removed, "removed direct dependency");

        let raw = graph.synth()?;
        manifest.save().wrap_err("write package.json")?;
        raw.save_to_dir(&dir).wrap_err("write the lockfile")?;
        let group: &str = group.into();
        println!("Removed {name} from {group}");
        Ok(())
    }
}
