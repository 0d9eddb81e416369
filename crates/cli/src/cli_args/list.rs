use crate::State;
use clap::Args;
use lockgraph_lockfile::{DependencyKind, PackageId, ParsedGraph};
use miette::Context;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Max display depth of the dependency tree.
    #[clap(long)]
    pub depth: Option<usize>,
    /// Display only the dependency graph for packages in dependencies.
    #[clap(short = 'P', long, conflicts_with = "dev")]
    pub prod: bool,
    /// Display only the dependency graph for packages in devDependencies.
    #[clap(short = 'D', long)]
    pub dev: bool,
}

impl ListArgs {
    /// Root buckets selected by `--prod` and `--dev`.
    fn kinds(&self) -> Vec<DependencyKind> {
        match (self.prod, self.dev) {
            (true, _) => vec![DependencyKind::Regular],
            (_, true) => vec![DependencyKind::Dev],
            _ => DependencyKind::ALL.to_vec(),
        }
    }

    /// Execute the subcommand.
    pub fn run(self, state: State) -> miette::Result<()> {
        let graph = state.graph().wrap_err("parse the lockfile")?;
        print!("{}", render_tree(&graph, &self.kinds(), self.depth));
        Ok(())
    }
}

/// One line per package, indented by two spaces per level. Shared packages are repeated under
/// every parent, a package already on the path is marked and not expanded.
fn render_tree(graph: &ParsedGraph, kinds: &[DependencyKind], depth: Option<usize>) -> String {
    let mut text = String::new();
    let mut path = Vec::new();
    for &kind in kinds {
        for (_, id) in graph.sorted_bucket(kind) {
            render_package(graph, id, depth, &mut path, &mut text);
        }
    }
    text
}

fn render_package(
    graph: &ParsedGraph,
    id: PackageId,
    depth: Option<usize>,
    path: &mut Vec<PackageId>,
    text: &mut String,
) {
    let indent = "  ".repeat(path.len());
    let package = &graph[id];
    if path.contains(&id) {
        text.push_str(&format!("{indent}{} (cycle)\n", package.name_ver()));
        return;
    }
    text.push_str(&format!("{indent}{}\n", package.name_ver()));
    if depth.is_some_and(|depth| path.len() >= depth) {
        return;
    }

    let mut children: Vec<_> = package.children().collect();
    children.sort_by(|(a, _), (b, _)| a.cmp(b));
    path.push(id);
    for (_, child) in children {
        render_package(graph, child, depth, path, text);
    }
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockgraph_lockfile::RawLockfile;
    use lockgraph_package_manifest::ManifestDependencies;
    use lockgraph_testing_utils::fixtures::{self, Fixture};
    use pretty_assertions::assert_eq;
    use text_block_macros::text_block_fnl;

    fn graph(fixture: Fixture) -> ParsedGraph {
        let raw: RawLockfile = serde_json::from_value(fixture.lockfile).unwrap();
        let manifest: ManifestDependencies = serde_json::from_value(fixture.manifest).unwrap();
        ParsedGraph::parse(&raw, &manifest).unwrap()
    }

    #[test]
    fn full_tree() {
        let received = render_tree(&graph(fixtures::deep()), &DependencyKind::ALL, None);
        let expected = text_block_fnl! {
            "debug@4.3.4"
            "  ms@2.1.2"
            "send@0.18.0"
            "  debug@2.6.9"
            "    ms@2.0.0"
            "  ms@2.1.3"
        };
        assert_eq!(received, expected);
    }

    #[test]
    fn limited_depth() {
        macro_rules! case {
            ($depth:expr => $expected:expr) => {{
                let depth: usize = $depth;
                eprintln!("CASE: depth = {depth}");
                let received = render_tree(&graph(fixtures::deep()), &DependencyKind::ALL, Some(depth));
                assert_eq!(received, $expected);
            }};
        }

        case!(0 => "debug@4.3.4\nsend@0.18.0\n");
        case!(1 => text_block_fnl! {
            "debug@4.3.4"
            "  ms@2.1.2"
            "send@0.18.0"
            "  debug@2.6.9"
            "  ms@2.1.3"
        });
    }

    #[test]
    fn cycles_are_cut() {
        let received = render_tree(&graph(fixtures::cyclic()), &DependencyKind::ALL, None);
        let expected = text_block_fnl! {
            "es-abstract@1.22.3"
            "  string.prototype.trim@1.2.8"
            "    es-abstract@1.22.3 (cycle)"
        };
        assert_eq!(received, expected);
    }

    #[test]
    fn filter_by_group() {
        macro_rules! case {
            ($prod:expr, $dev:expr => $expected:expr) => {{
                let args = ListArgs { depth: None, prod: $prod, dev: $dev };
                eprintln!("CASE: {args:?}");
                let received = render_tree(&graph(fixtures::nested_mixed_dev()), &args.kinds(), None);
                assert_eq!(received, $expected);
            }};
        }

        case!(false, false => "ms@2.1.2\ndebug@4.3.4\n  ms@2.1.2\n");
        case!(true, false => "ms@2.1.2\n");
        case!(false, true => "debug@4.3.4\n  ms@2.1.2\n");
    }
}
