use crate::{PkgNameVer, RequiresMap};
use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::{Map, Value};
use std::{
    collections::{HashSet, VecDeque},
    ops::Index,
};

/// Handle of a [`ParsedPackage`] inside the [`ParsedGraph`] that created it.
///
/// Two handles are equal if and only if they denote the same node. Handles are meaningless for
/// any other graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(usize);

impl PackageId {
    pub(crate) fn from_index(index: usize) -> Self {
        PackageId(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Dependency map of the graph: names to nodes.
pub type PackageMap = IndexMap<String, PackageId>;

/// Root dependency group a package is reachable from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    #[default]
    Regular,
    Dev,
    Peer,
}

impl DependencyKind {
    /// Every kind, strongest first.
    pub const ALL: [DependencyKind; 3] =
        [DependencyKind::Regular, DependencyKind::Dev, DependencyKind::Peer];
}

/// Fields of a raw package the graph does not model, carried until the next synth.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct PackageStash {
    pub(crate) resolved: Option<String>,
    pub(crate) integrity: Option<String>,
    pub(crate) requires: Option<RequiresMap>,
    pub(crate) dev: Option<bool>,
    pub(crate) peer: Option<bool>,
    /// The lockfile had an empty `dependencies` table for the package.
    pub(crate) empty_dependencies: bool,
    pub(crate) extra: Map<String, Value>,
    /// The package was found in the root table of the parsed lockfile.
    pub(crate) hoisted: bool,
}

/// Fields of a raw lockfile the graph does not model.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct LockfileStash {
    pub(crate) name: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) requires: Option<bool>,
    pub(crate) extra: Map<String, Value>,
}

/// One node of the dependency graph: a package at one version.
///
/// `name` and `version` are fixed at construction, there are no setters. The graph relies on
/// no two nodes sharing both. Only the dependency maps are meant to be edited.
#[derive(Debug, Clone)]
pub struct ParsedPackage {
    name: String,
    version: String,
    pub dependencies: PackageMap,
    /// Never populated by the parser below the root. Entries added here are written like
    /// [`ParsedPackage::dependencies`].
    pub dev_dependencies: PackageMap,
    pub(crate) stash: PackageStash,
}

impl ParsedPackage {
    pub(crate) fn new(name: String, version: String, stash: PackageStash) -> Self {
        ParsedPackage {
            name,
            version,
            dependencies: PackageMap::new(),
            dev_dependencies: PackageMap::new(),
            stash,
        }
    }

    pub fn name(&self) -> &'_ str {
        &self.name
    }

    pub fn version(&self) -> &'_ str {
        &self.version
    }

    pub fn name_ver(&self) -> PkgNameVer {
        PkgNameVer::new(&self.name, &self.version)
    }

    pub fn resolved(&self) -> Option<&'_ str> {
        self.stash.resolved.as_deref()
    }

    pub fn integrity(&self) -> Option<&'_ str> {
        self.stash.integrity.as_deref()
    }

    /// Outgoing edges: [`ParsedPackage::dependencies`] followed by the entries of
    /// [`ParsedPackage::dev_dependencies`] whose names are not taken already.
    pub fn children(&self) -> impl Iterator<Item = (&'_ str, PackageId)> + '_ {
        let dev_only = self
            .dev_dependencies
            .iter()
            .filter(|(name, _)| !self.dependencies.contains_key(name.as_str()));
        self.dependencies.iter().chain(dev_only).map(|(name, &id)| (name.as_str(), id))
    }
}

/// The in-memory form of a lockfile.
///
/// Nodes live in an arena owned by the graph; every map stores [`PackageId`] handles.
#[derive(Debug, Clone)]
pub struct ParsedGraph {
    format_version: u32,
    pub dependencies: PackageMap,
    pub dev_dependencies: PackageMap,
    pub peer_dependencies: PackageMap,
    packages: Vec<ParsedPackage>,
    pub(crate) stash: LockfileStash,
}

impl ParsedGraph {
    pub(crate) fn new(
        format_version: u32,
        packages: Vec<ParsedPackage>,
        stash: LockfileStash,
    ) -> Self {
        ParsedGraph {
            format_version,
            dependencies: PackageMap::new(),
            dev_dependencies: PackageMap::new(),
            peer_dependencies: PackageMap::new(),
            packages,
            stash,
        }
    }

    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    pub fn package(&self, id: PackageId) -> Option<&'_ ParsedPackage> {
        self.packages.get(id.0)
    }

    /// Mutable access to a node, for editing its dependency maps.
    pub fn package_mut(&mut self, id: PackageId) -> Option<&'_ mut ParsedPackage> {
        self.packages.get_mut(id.0)
    }

    /// Every node created by the parser, reachable or not.
    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &'_ ParsedPackage)> + '_ {
        self.packages.iter().enumerate().map(|(index, package)| (PackageId(index), package))
    }

    /// Find the node of `name` at `version`.
    pub fn find(&self, name: &str, version: &str) -> Option<PackageId> {
        self.packages()
            .find(|(_, package)| package.name == name && package.version == version)
            .map(|(id, _)| id)
    }

    pub fn bucket(&self, kind: DependencyKind) -> &'_ PackageMap {
        match kind {
            DependencyKind::Regular => &self.dependencies,
            DependencyKind::Dev => &self.dev_dependencies,
            DependencyKind::Peer => &self.peer_dependencies,
        }
    }

    pub fn bucket_mut(&mut self, kind: DependencyKind) -> &'_ mut PackageMap {
        match kind {
            DependencyKind::Regular => &mut self.dependencies,
            DependencyKind::Dev => &mut self.dev_dependencies,
            DependencyKind::Peer => &mut self.peer_dependencies,
        }
    }

    /// Entries of a root bucket in ascending order of name.
    pub fn sorted_bucket(&self, kind: DependencyKind) -> Vec<(&'_ str, PackageId)> {
        self.bucket(kind)
            .iter()
            .map(|(name, &id)| (name.as_str(), id))
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .collect()
    }

    /// Remove `name` from every root bucket holding it.
    ///
    /// Returns the first bucket (in [`DependencyKind::ALL`] order) it was removed from.
    pub fn remove_root(&mut self, name: &str) -> Option<(DependencyKind, PackageId)> {
        let mut removed = None;
        for kind in DependencyKind::ALL {
            let Some(id) = self.bucket_mut(kind).shift_remove(name) else {
                continue;
            };
            removed.get_or_insert((kind, id));
        }
        removed
    }

    /// Move the root entry `name` into the bucket of `to`. Returns `false` if there is no such entry.
    pub fn move_root(&mut self, name: &str, to: DependencyKind) -> bool {
        let Some((_, id)) = self.remove_root(name) else {
            return false;
        };
        self.bucket_mut(to).insert(name.to_string(), id);
        true
    }

    /// Every node reachable from the root buckets, breadth first, with the strongest kind it is
    /// reachable from.
    ///
    /// Buckets are visited in [`DependencyKind::ALL`] order, each in ascending order of name.
    pub fn reachable(&self) -> Vec<(PackageId, DependencyKind)> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        for kind in DependencyKind::ALL {
            let mut queue: VecDeque<PackageId> =
                self.sorted_bucket(kind).into_iter().map(|(_, id)| id).collect();
            while let Some(id) = queue.pop_front() {
                if !visited.insert(id) {
                    continue;
                }
                order.push((id, kind));
                queue.extend(self[id].children().map(|(_, child)| child));
            }
        }
        order
    }
}

impl Index<PackageId> for ParsedGraph {
    type Output = ParsedPackage;
    fn index(&self, id: PackageId) -> &Self::Output {
        &self.packages[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn package(name: &str, version: &str) -> ParsedPackage {
        ParsedPackage::new(name.to_string(), version.to_string(), PackageStash::default())
    }

    /// `app -> (a, dev b)`, `a -> c`, `b -> (a, d)`.
    fn graph() -> ParsedGraph {
        let mut packages = vec![package("a", "1.0.0"), package("b", "1.0.0")];
        packages.push(package("c", "1.0.0"));
        packages.push(package("d", "1.0.0"));
        packages[0].dependencies.insert("c".to_string(), PackageId(2));
        packages[1].dependencies.insert("a".to_string(), PackageId(0));
        packages[1].dependencies.insert("d".to_string(), PackageId(3));
        let mut graph = ParsedGraph::new(1, packages, LockfileStash::default());
        graph.dependencies.insert("a".to_string(), PackageId(0));
        graph.dev_dependencies.insert("b".to_string(), PackageId(1));
        graph
    }

    #[test]
    fn reachable_assigns_strongest_kind() {
        let graph = graph();
        let received: Vec<_> = graph
            .reachable()
            .into_iter()
            .map(|(id, kind)| (graph[id].name().to_string(), kind))
            .collect();
        let expected = [
            ("a".to_string(), DependencyKind::Regular),
            ("c".to_string(), DependencyKind::Regular),
            ("b".to_string(), DependencyKind::Dev),
            ("d".to_string(), DependencyKind::Dev),
        ];
        assert_eq!(received, expected);
    }

    #[test]
    fn move_and_remove_root() {
        let mut graph = graph();
        assert!(graph.move_root("b", DependencyKind::Regular));
        assert!(!graph.move_root("z", DependencyKind::Regular));
        assert_eq!(graph.sorted_bucket(DependencyKind::Regular), [("a", PackageId(0)), ("b", PackageId(1))]);
        assert!(graph.dev_dependencies.is_empty());

        assert_eq!(graph.remove_root("a"), Some((DependencyKind::Regular, PackageId(0))));
        assert_eq!(graph.remove_root("a"), None);
    }

    #[test]
    fn remove_root_clears_every_bucket() {
        let mut graph = graph();
        graph.dev_dependencies.insert("a".to_string(), PackageId(0));
        graph.peer_dependencies.insert("a".to_string(), PackageId(0));

        assert_eq!(graph.remove_root("a"), Some((DependencyKind::Regular, PackageId(0))));
        assert!(graph.dependencies.is_empty());
        assert_eq!(graph.sorted_bucket(DependencyKind::Dev), [("b", PackageId(1))]);
        assert!(graph.peer_dependencies.is_empty());
        assert_eq!(graph.remove_root("a"), None);
    }

    #[test]
    fn children_prefer_dependencies_over_dev_dependencies() {
        let mut graph = graph();
        let a = graph.package_mut(PackageId(0)).unwrap();
        a.dev_dependencies.insert("c".to_string(), PackageId(3));
        a.dev_dependencies.insert("d".to_string(), PackageId(3));
        let children: Vec<_> = graph[PackageId(0)].children().collect();
        assert_eq!(children, [("c", PackageId(2)), ("d", PackageId(3))]);
    }

    #[test]
    fn find() {
        let graph = graph();
        assert_eq!(graph.find("c", "1.0.0"), Some(PackageId(2)));
        assert_eq!(graph.find("c", "2.0.0"), None);
        assert_eq!(graph.package(PackageId(9)).map(ParsedPackage::name), None);
    }
}
