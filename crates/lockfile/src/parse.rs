use crate::{
    graph::{LockfileStash, PackageStash},
    LockfileVersionError, LockfileVersionV1, PackageId, PackageMap, ParsedGraph, ParsedPackage,
    PkgNameVer, RawLockfile, RawPackage, RawPackageMap,
};
use derive_more::{Display, Error};
use lockgraph_diagnostics::miette::{self, Diagnostic};
use lockgraph_package_manifest::{DependencyGroup, Manifest};
use std::collections::HashMap;
use tracing::{debug, trace};

/// A required package is missing from every dependency table it could be installed in.
#[derive(Debug, Display, Error, Diagnostic, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncError {
    #[display("Could not find {name:?} in lockfile, package.json may be out of sync")]
    #[diagnostic(
        code(lockgraph_lockfile::out_of_sync),
        help("Run `npm install` to bring package-lock.json up to date with package.json.")
    )]
    Manifest { name: String },

    #[display("Could not find {name:?} required by {required_by} in lockfile, package.json may be out of sync")]
    #[diagnostic(
        code(lockgraph_lockfile::out_of_sync),
        help("Run `npm install` to bring package-lock.json up to date with package.json.")
    )]
    Package { name: String, required_by: PkgNameVer },
}

impl SyncError {
    /// Name of the package that could not be found.
    pub fn name(&self) -> &'_ str {
        match self {
            SyncError::Manifest { name } | SyncError::Package { name, .. } => name,
        }
    }
}

/// Error type of [`parse`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum ParseError {
    #[display("{_0}")]
    #[diagnostic(
        code(lockgraph_lockfile::incompatible_lockfile_version),
        help("Only lockfileVersion 1 is supported, which is written by npm 5 and npm 6.")
    )]
    IncompatibleVersion(#[error(not(source))] LockfileVersionError<1>),

    #[diagnostic(transparent)]
    OutOfSync(#[error(source)] SyncError),
}

/// Tables to look a name up in, the root table first and the nearest override table last.
type Chain<'a> = Vec<&'a RawPackageMap>;

/// Find the nearest table of `chain` that contains `name`.
fn resolve<'a>(chain: &[&'a RawPackageMap], name: &str) -> Option<(usize, &'a RawPackage)> {
    chain
        .iter()
        .enumerate()
        .rev()
        .find_map(|(depth, table)| table.get(name).map(|raw_package| (depth, raw_package)))
}

/// Request-scoped parser state.
struct ParseWorkbench {
    cache: HashMap<PkgNameVer, PackageId>,
    packages: Vec<ParsedPackage>,
}

impl ParseWorkbench {
    fn new() -> Self {
        ParseWorkbench { cache: HashMap::new(), packages: Vec::new() }
    }

    /// Resolve `name` along `chain` and return the node of the package found.
    fn parse_package<'a>(
        &mut self,
        chain: &[&'a RawPackageMap],
        name: &str,
        required_by: Option<&PkgNameVer>,
    ) -> Result<PackageId, SyncError> {
        let Some((depth, raw_package)) = resolve(chain, name) else {
            debug!(?name, ?required_by, "package not found in any dependency table");
            return Err(match required_by {
                None => SyncError::Manifest { name: name.to_string() },
                Some(required_by) => {
                    SyncError::Package { name: name.to_string(), required_by: required_by.clone() }
                }
            });
        };

        let key = PkgNameVer::new(name, &raw_package.version);
        if let Some(&id) = self.cache.get(&key) {
            trace!(%key, "cache hit");
            return Ok(id);
        }

        let id = PackageId::from_index(self.packages.len());
        let stash = stash_package(raw_package, depth == 0);
        self.packages.push(ParsedPackage::new(name.to_string(), raw_package.version.clone(), stash));
        // Inserted before recursing so that requirement cycles end at this node.
        self.cache.insert(key.clone(), id);

        let Some(requires) = &raw_package.requires else {
            return Ok(id);
        };

        let mut nested_chain: Chain<'a> = chain[..=depth].to_vec();
        nested_chain.extend(raw_package.dependencies.as_ref());

        for dependency_name in requires.keys() {
            let dependency = self.parse_package(&nested_chain, dependency_name, Some(&key))?;
            self.packages[id.index()]
                .dependencies
                .insert(dependency_name.clone(), dependency);
        }

        Ok(id)
    }

    fn parse_root(
        &mut self,
        root_chain: &[&RawPackageMap],
        names: impl IntoIterator<Item = impl AsRef<str>>,
        bucket: &mut PackageMap,
    ) -> Result<(), SyncError> {
        for name in names {
            let name = name.as_ref();
            let id = self.parse_package(root_chain, name, None)?;
            bucket.insert(name.to_string(), id);
        }
        Ok(())
    }
}

fn stash_package(raw_package: &RawPackage, hoisted: bool) -> PackageStash {
    let RawPackage { resolved, integrity, dev, peer, requires, dependencies, extra, .. } =
        raw_package;
    PackageStash {
        resolved: resolved.clone(),
        integrity: integrity.clone(),
        requires: requires.clone(),
        dev: *dev,
        peer: *peer,
        empty_dependencies: dependencies.as_ref().is_some_and(RawPackageMap::is_empty),
        extra: extra.clone(),
        hoisted,
    }
}

/// Build the dependency graph of `raw` for the direct dependencies declared by `manifest`.
///
/// `dependencies` and `optionalDependencies` go into [`ParsedGraph::dependencies`],
/// `devDependencies` into [`ParsedGraph::dev_dependencies`]. A `peerDependencies` name is placed in
/// [`ParsedGraph::peer_dependencies`] only when the root table has it and no other group lists it.
#[tracing::instrument(skip_all)]
pub fn parse<M>(raw: &RawLockfile, manifest: &M) -> Result<ParsedGraph, ParseError>
where
    M: Manifest + ?Sized,
{
    let format_version =
        LockfileVersionV1::try_from(raw.lockfile_version).map_err(ParseError::IncompatibleVersion)?;

    let mut workbench = ParseWorkbench::new();
    let root_chain = [&raw.dependencies];
    let mut dependencies = PackageMap::new();
    let mut dev_dependencies = PackageMap::new();
    let mut peer_dependencies = PackageMap::new();

    let prod_names = manifest
        .dependency_names(DependencyGroup::Prod)
        .chain(manifest.dependency_names(DependencyGroup::Optional));
    workbench
        .parse_root(&root_chain, prod_names, &mut dependencies)
        .map_err(ParseError::OutOfSync)?;
    workbench
        .parse_root(&root_chain, manifest.dependency_names(DependencyGroup::Dev), &mut dev_dependencies)
        .map_err(ParseError::OutOfSync)?;

    let peer_names = manifest.dependency_names(DependencyGroup::Peer).filter(|name| {
        if dependencies.contains_key(*name) || dev_dependencies.contains_key(*name) {
            return false;
        }
        let installed = raw.dependencies.contains_key(*name);
        if !installed {
            debug!(?name, "peer dependency is not installed");
        }
        installed
    });
    let peer_names: Vec<&str> = peer_names.collect();
    workbench
        .parse_root(&root_chain, peer_names, &mut peer_dependencies)
        .map_err(ParseError::OutOfSync)?;

    let RawLockfile { name, version, requires, extra, .. } = raw;
    let stash = LockfileStash {
        name: name.clone(),
        version: version.clone(),
        requires: *requires,
        extra: extra.clone(),
    };

    debug!(packages = workbench.packages.len(), "parsed lockfile");
    let mut graph = ParsedGraph::new(*format_version, workbench.packages, stash);
    graph.dependencies = dependencies;
    graph.dev_dependencies = dev_dependencies;
    graph.peer_dependencies = peer_dependencies;
    Ok(graph)
}

impl ParsedGraph {
    /// Alias of [`parse`].
    pub fn parse<M>(raw: &RawLockfile, manifest: &M) -> Result<Self, ParseError>
    where
        M: Manifest + ?Sized,
    {
        parse(raw, manifest)
    }
}
