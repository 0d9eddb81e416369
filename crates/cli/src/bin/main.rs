use lockgraph_diagnostics::Result;

pub fn main() -> Result<()> {
    lockgraph_cli::run_cli()
}
