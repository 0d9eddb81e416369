use crate::{DependencyGroup, PackageManifest};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Direct dependency declarations a lockfile must stay consistent with.
///
/// Only the names matter to the lockfile codec, the version ranges are ignored.
pub trait Manifest {
    /// Names listed under `group`, in declaration order.
    fn dependency_names<'a>(&'a self, group: DependencyGroup) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

impl Manifest for PackageManifest {
    fn dependency_names<'a>(&'a self, group: DependencyGroup) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(self.dependencies([group]).map(|(name, _)| name))
    }
}

/// In-memory dependency declarations, deserializable from the relevant part of a `package.json`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDependencies {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dev_dependencies: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub optional_dependencies: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub peer_dependencies: IndexMap<String, String>,
}

impl ManifestDependencies {
    /// Lookup dependency map according to group.
    pub fn get_map_by_group(&self, group: DependencyGroup) -> &'_ IndexMap<String, String> {
        match group {
            DependencyGroup::Prod => &self.dependencies,
            DependencyGroup::Dev => &self.dev_dependencies,
            DependencyGroup::Optional => &self.optional_dependencies,
            DependencyGroup::Peer => &self.peer_dependencies,
        }
    }
}

impl Manifest for ManifestDependencies {
    fn dependency_names<'a>(&'a self, group: DependencyGroup) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(self.get_map_by_group(group).keys().map(String::as_str))
    }
}
