mod manifest;

pub use manifest::{Manifest, ManifestDependencies};

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use derive_more::{Display, Error};
use miette::Diagnostic;
use serde_json::Value;
use strum::IntoStaticStr;

#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum PackageManifestError {
    #[display("No package.json was found in {_0}")]
    #[diagnostic(
        code(lockgraph_package_manifest::no_importer_manifest_found),
        help("Run the command from a directory containing a package.json, or pass it with --dir.")
    )]
    NoImporterManifestFound(#[error(not(source))] String),

    #[display("Failed to read package.json: {_0}")]
    #[diagnostic(code(lockgraph_package_manifest::read_file))]
    ReadFile(io::Error),

    #[display("Failed to parse package.json as JSON: {_0}")]
    #[diagnostic(code(lockgraph_package_manifest::parse_json))]
    ParseJson(serde_json::Error),

    #[display("Failed to serialize package.json: {_0}")]
    #[diagnostic(code(lockgraph_package_manifest::serialize_json))]
    SerializeJson(serde_json::Error),

    #[display("Failed to write package.json: {_0}")]
    #[diagnostic(code(lockgraph_package_manifest::write_file))]
    WriteFile(io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum DependencyGroup {
    #[strum(serialize = "dependencies")]
    Prod,
    #[strum(serialize = "devDependencies")]
    Dev,
    #[strum(serialize = "optionalDependencies")]
    Optional,
    #[strum(serialize = "peerDependencies")]
    Peer,
}

impl DependencyGroup {
    pub const ALL: [DependencyGroup; 4] =
        [DependencyGroup::Prod, DependencyGroup::Dev, DependencyGroup::Optional, DependencyGroup::Peer];
}

/// Content of the `package.json` files and its path.
pub struct PackageManifest {
    path: PathBuf,
    value: Value, // TODO: convert this into a proper struct + an array of keys order
}

impl PackageManifest {
    pub const FILE_NAME: &'static str = "package.json";

    fn read_from_file(path: &Path) -> Result<Value, PackageManifestError> {
        let contents = fs::read_to_string(path).map_err(PackageManifestError::ReadFile)?;
        serde_json::from_str(&contents).map_err(PackageManifestError::ParseJson)
    }

    pub fn from_path(path: PathBuf) -> Result<PackageManifest, PackageManifestError> {
        if !path.exists() {
            return Err(PackageManifestError::NoImporterManifestFound(path.display().to_string()));
        }

        let value = PackageManifest::read_from_file(&path)?;
        Ok(PackageManifest { path, value })
    }

    /// Load the `package.json` file of a project directory.
    pub fn from_dir(dir: &Path) -> Result<PackageManifest, PackageManifestError> {
        PackageManifest::from_path(dir.join(PackageManifest::FILE_NAME))
    }

    pub fn save(&self) -> Result<(), PackageManifestError> {
        let mut contents =
            serde_json::to_string_pretty(&self.value).map_err(PackageManifestError::SerializeJson)?;
        contents.push('\n');
        fs::write(&self.path, contents).map_err(PackageManifestError::WriteFile)
    }

    pub fn dependencies<'a>(
        &'a self,
        groups: impl IntoIterator<Item = DependencyGroup> + 'a,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        // TODO: add error when `dependencies` is found to not be an object
        groups
            .into_iter()
            .flat_map(|group| self.value.get::<&str>(group.into()))
            .flat_map(|dependencies| dependencies.as_object())
            .flatten()
            .flat_map(|(name, version)| version.as_str().map(|value| (name.as_str(), value)))
    }

    /// Remove `name` from every dependency group that lists it.
    ///
    /// Returns the first group (in [`DependencyGroup::ALL`] order) the name was removed from.
    pub fn remove_dependency(&mut self, name: &str) -> Option<DependencyGroup> {
        let mut removed_from = None;
        for group in DependencyGroup::ALL {
            let dependency_type: &str = group.into();
            let removed = self
                .value
                .get_mut(dependency_type)
                .and_then(Value::as_object_mut)
                .and_then(|dependencies| dependencies.shift_remove(name))
                .is_some();
            if removed && removed_from.is_none() {
                removed_from = Some(group);
            }
        }
        removed_from
    }
}
