use derive_more::{Display, Error};
use lockgraph_lockfile::{LoadLockfileError, ParseError, ParsedGraph, RawLockfile};
use lockgraph_package_manifest::{PackageManifest, PackageManifestError};
use miette::Diagnostic;
use std::path::{Path, PathBuf};

/// Files of the project a command runs in.
pub struct State {
    /// Directory containing `package.json` and `package-lock.json`.
    pub dir: PathBuf,
    /// Data from the `package.json` file.
    pub manifest: PackageManifest,
    /// Data from the `package-lock.json` file.
    pub lockfile: RawLockfile,
}

/// Error type of [`State::init`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum InitStateError {
    #[diagnostic(transparent)]
    LoadManifest(#[error(source)] PackageManifestError),

    #[diagnostic(transparent)]
    LoadLockfile(#[error(source)] LoadLockfileError),

    #[display("No {} was found in {}", RawLockfile::FILE_NAME, _0.display())]
    #[diagnostic(
        code(lockgraph_cli::missing_lockfile),
        help("Run `npm install` with npm 5 or npm 6 to create one.")
    )]
    MissingLockfile(#[error(not(source))] PathBuf),
}

impl State {
    /// Load the manifest and the lockfile of the project at `dir`.
    pub fn init(dir: &Path) -> Result<Self, InitStateError> {
        let manifest = PackageManifest::from_dir(dir).map_err(InitStateError::LoadManifest)?;
        let lockfile = RawLockfile::load_from_dir(dir)
            .map_err(InitStateError::LoadLockfile)?
            .ok_or_else(|| InitStateError::MissingLockfile(dir.to_path_buf()))?;
        Ok(State { dir: dir.to_path_buf(), manifest, lockfile })
    }

    /// Build the dependency graph of the lockfile.
    pub fn graph(&self) -> Result<ParsedGraph, ParseError> {
        ParsedGraph::parse(&self.lockfile, &self.manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockgraph_testing_utils::{bin::write_fixture, fixtures};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn init() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path(), &fixtures::nested());
        let state = State::init(dir.path()).unwrap();
        assert_eq!(state.lockfile.name.as_deref(), Some("nested"));
        assert_eq!(state.graph().unwrap().packages().count(), 2);
    }

    #[test]
    fn missing_lockfile() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let error = State::init(dir.path()).err().expect("package-lock.json is missing");
        dbg!(&error);
        assert!(matches!(&error, InitStateError::MissingLockfile(path) if path == dir.path()));
        assert_eq!(
            error.to_string(),
            format!("No package-lock.json was found in {}", dir.path().display()),
        );
    }

    #[test]
    fn missing_manifest() {
        let dir = tempdir().unwrap();
        let error = State::init(dir.path()).err().expect("package.json is missing");
        assert!(matches!(
            error,
            InitStateError::LoadManifest(PackageManifestError::NoImporterManifestFound(_)),
        ));
    }
}
