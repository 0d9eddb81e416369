use crate::{
    DependencyKind, PackageId, ParsedGraph, ParsedPackage, PkgNameVer, RawLockfile, RawPackage,
    RawPackageMap, RequiresMap,
};
use derive_more::{Display, Error};
use indexmap::IndexMap;
use lockgraph_diagnostics::miette::{self, Diagnostic};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Two root dependency groups give the same name to different packages.
#[derive(Debug, Display, Error, Diagnostic, Clone, PartialEq, Eq)]
#[display("Cannot install {package} at the top level, {name:?} is already taken by {claimed_by}")]
#[diagnostic(
    code(lockgraph_lockfile::conflicting_root_dependency),
    help("A name must refer to the same package in dependencies, devDependencies and peerDependencies.")
)]
pub struct ConsistencyError {
    pub name: String,
    pub package: PkgNameVer,
    pub claimed_by: PkgNameVer,
}

/// Slot of the root table.
const ROOT: usize = 0;

/// A place in the `node_modules` tree: one entry of a dependency table.
#[derive(Debug)]
struct Slot {
    /// `None` only for [`ROOT`].
    package: Option<PackageId>,
    parent: Option<usize>,
    /// The `dependencies` table of this entry.
    children: IndexMap<String, usize>,
}

/// Request-scoped synth state.
struct SynthWorkbench<'a> {
    graph: &'a ParsedGraph,
    slots: Vec<Slot>,
    /// `(slot, name)` pairs resolved through `slot` by a package placed below it, and the node the
    /// name resolved to. A table may not take a name its subtree relies on for another node.
    relied: HashMap<(usize, String), PackageId>,
}

impl<'a> SynthWorkbench<'a> {
    fn new(graph: &'a ParsedGraph) -> Self {
        let root = Slot { package: None, parent: None, children: IndexMap::new() };
        SynthWorkbench { graph, slots: vec![root], relied: HashMap::new() }
    }

    fn add_slot(&mut self, parent: usize, name: &str, package: PackageId) -> usize {
        let slot = self.slots.len();
        self.slots.push(Slot { package: Some(package), parent: Some(parent), children: IndexMap::new() });
        self.slots[parent].children.insert(name.to_string(), slot);
        slot
    }

    /// Slots from the root down to `slot`, both included.
    fn chain(&self, slot: usize) -> Vec<usize> {
        let mut chain = vec![slot];
        let mut current = slot;
        while let Some(parent) = self.slots[current].parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    fn rely(&mut self, owners: &[usize], name: &str, package: PackageId) {
        for &owner in owners {
            self.relied.insert((owner, name.to_string()), package);
        }
    }

    /// Give the root table to every entry of the root buckets.
    fn claim_buckets(&mut self) -> Result<(), ConsistencyError> {
        let graph = self.graph;
        for kind in DependencyKind::ALL {
            for (name, package) in graph.sorted_bucket(kind) {
                let claimed = self.slots[ROOT]
                    .children
                    .get(name)
                    .and_then(|&slot| self.slots[slot].package);
                match claimed {
                    Some(claimed) if claimed != package => {
                        return Err(ConsistencyError {
                            name: name.to_string(),
                            package: graph[package].name_ver(),
                            claimed_by: graph[claimed].name_ver(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        self.add_slot(ROOT, name, package);
                    }
                }
            }
        }
        Ok(())
    }

    /// Put nodes that were read from the root table back there while their names are free.
    fn claim_hoisted(&mut self, reachable: &[(PackageId, DependencyKind)]) {
        let graph = self.graph;
        for &(package, _) in reachable {
            let node = &graph[package];
            if node.stash.hoisted && !self.slots[ROOT].children.contains_key(node.name()) {
                trace!(package = %node.name_ver(), "keep hoisted");
                self.add_slot(ROOT, node.name(), package);
            }
        }
    }

    /// Nearest entry named `name` along `chain`: its level in the chain and its slot.
    fn resolve(&self, chain: &[usize], name: &str) -> Option<(usize, usize)> {
        chain.iter().enumerate().rev().find_map(|(level, &owner)| {
            self.slots[owner].children.get(name).map(|&slot| (level, slot))
        })
    }

    /// Record that `name` resolves to `package` from the last slot of `chain`, if it already does.
    fn keep_resolved(&mut self, chain: &[usize], name: &str, package: PackageId) {
        if let Some((level, slot)) = self.resolve(chain, name) {
            if self.slots[slot].package == Some(package) {
                self.rely(&chain[level + 1..], name, package);
            }
        }
    }

    /// Make `name` resolve to `package` from the last slot of `chain`.
    ///
    /// Returns the slot created, if any.
    fn place(&mut self, chain: &[usize], name: &str, package: PackageId) -> Option<usize> {
        let floor = match self.resolve(chain, name) {
            Some((level, slot)) if self.slots[slot].package == Some(package) => {
                self.rely(&chain[level + 1..], name, package);
                return None;
            }
            Some((level, _)) => level + 1,
            None => 0,
        };

        let mut target = chain.len() - 1;
        debug_assert!(floor <= target, "{name:?} is already taken by the table it resolves from");
        for level in (floor..target).rev() {
            let key = (chain[level], name.to_string());
            if self.relied.get(&key).is_some_and(|&relied| relied != package) {
                break;
            }
            target = level;
        }

        if target != ROOT {
            debug!(package = %self.graph[package].name_ver(), depth = target, "nest");
        }
        let slot = self.add_slot(chain[target], name, package);
        self.rely(&chain[target + 1..], name, package);
        Some(slot)
    }

    /// Place the dependencies of every slot, breadth first from the root table.
    ///
    /// Slots are expanded one generation at a time. Before any slot of a generation gets new
    /// entries, every dependency of the generation that already resolves to its node is recorded,
    /// so that no sibling can shadow it.
    fn place_all(&mut self) {
        let graph = self.graph;
        let mut generation: Vec<usize> = self.slots[ROOT].children.values().copied().collect();
        while !generation.is_empty() {
            let expanded: Vec<(Vec<usize>, PackageId)> = generation
                .into_iter()
                .filter_map(|slot| {
                    let package = self.slots[slot].package?;
                    let chain = self.chain(slot);
                    let ancestors = &chain[..chain.len() - 1];
                    if ancestors.iter().any(|&ancestor| self.slots[ancestor].package == Some(package)) {
                        trace!(package = %graph[package].name_ver(), "cycle");
                        return None;
                    }
                    Some((chain, package))
                })
                .collect();

            for (chain, package) in &expanded {
                for (name, child) in graph[*package].children() {
                    self.keep_resolved(chain, name, child);
                }
            }

            generation = Vec::new();
            for (chain, package) in &expanded {
                for (name, child) in graph[*package].children() {
                    generation.extend(self.place(chain, name, child));
                }
            }
        }
    }

    fn table(&self, owner: usize, kinds: &HashMap<PackageId, DependencyKind>) -> RawPackageMap {
        let mut table: RawPackageMap = self.slots[owner]
            .children
            .iter()
            .filter_map(|(name, &slot)| {
                let package = self.slots[slot].package?;
                Some((name.clone(), self.raw_package(slot, package, kinds)))
            })
            .collect();
        table.sort_keys();
        table
    }

    fn raw_package(
        &self,
        slot: usize,
        package: PackageId,
        kinds: &HashMap<PackageId, DependencyKind>,
    ) -> RawPackage {
        let node = &self.graph[package];
        let kind = kinds.get(&package).copied().unwrap_or_default();
        let dependencies = self.table(slot, kinds);
        RawPackage {
            version: node.version().to_string(),
            resolved: node.stash.resolved.clone(),
            integrity: node.stash.integrity.clone(),
            dev: flag(kind == DependencyKind::Dev, node.stash.dev),
            peer: flag(kind == DependencyKind::Peer, node.stash.peer),
            requires: requires(self.graph, node),
            dependencies: (!dependencies.is_empty() || node.stash.empty_dependencies)
                .then_some(dependencies),
            extra: node.stash.extra.clone(),
        }
    }
}

/// Value of a `dev` or `peer` field. An explicit `false` read from the lockfile stays while the
/// flag is unset.
fn flag(set: bool, read: Option<bool>) -> Option<bool> {
    if set {
        Some(true)
    } else {
        read.filter(|&read| !read)
    }
}

/// Ranges for the current dependencies of `node`.
///
/// Ranges read from the lockfile are kept. Dependencies added since are pinned to their version.
fn requires(graph: &ParsedGraph, node: &ParsedPackage) -> Option<RequiresMap> {
    let children: IndexMap<&str, PackageId> = node.children().collect();
    let mut requires: RequiresMap = node
        .stash
        .requires
        .iter()
        .flatten()
        .filter(|(name, _)| children.contains_key(name.as_str()))
        .map(|(name, range)| (name.clone(), range.clone()))
        .collect();
    for (name, child) in children {
        if !requires.contains_key(name) {
            requires.insert(name.to_string(), graph[child].version().to_string());
        }
    }
    let read_empty = node.stash.requires.as_ref().is_some_and(RequiresMap::is_empty);
    (!requires.is_empty() || read_empty).then_some(requires)
}

/// Lay out the nodes reachable from the root buckets of `graph` as a `node_modules` tree.
///
/// Every package goes as high up the tree as it can without changing what any other package
/// resolves to. Packages that are no longer reachable are left out.
#[tracing::instrument(skip_all)]
pub fn synth(graph: &ParsedGraph) -> Result<RawLockfile, ConsistencyError> {
    let mut workbench = SynthWorkbench::new(graph);
    workbench.claim_buckets()?;
    let reachable = graph.reachable();
    workbench.claim_hoisted(&reachable);
    workbench.place_all();
    debug!(packages = reachable.len(), entries = workbench.slots.len() - 1, "laid out lockfile");

    let kinds: HashMap<PackageId, DependencyKind> = reachable.into_iter().collect();
    let stash = &graph.stash;
    Ok(RawLockfile {
        name: stash.name.clone(),
        version: stash.version.clone(),
        lockfile_version: graph.format_version(),
        requires: stash.requires,
        dependencies: workbench.table(ROOT, &kinds),
        extra: stash.extra.clone(),
    })
}

impl ParsedGraph {
    /// Alias of [`synth`].
    pub fn synth(&self) -> Result<RawLockfile, ConsistencyError> {
        synth(self)
    }
}
