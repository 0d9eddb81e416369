use crate::RawLockfile;
use derive_more::{Display, Error};
use lockgraph_diagnostics::miette::{self, Diagnostic};
use pipe_trait::Pipe;
use std::{
    fs,
    io::{self, ErrorKind},
    path::Path,
};

/// Error when reading lockfile from the filesystem.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum LoadLockfileError {
    #[display("Failed to read lockfile content: {_0}")]
    #[diagnostic(code(lockgraph_lockfile::read_file))]
    ReadFile(io::Error),

    #[display("Failed to parse lockfile content as JSON: {_0}")]
    #[diagnostic(code(lockgraph_lockfile::parse_json))]
    ParseJson(serde_json::Error),
}

/// Error when writing lockfile to the filesystem.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum SaveLockfileError {
    #[display("Failed to serialize lockfile: {_0}")]
    #[diagnostic(code(lockgraph_lockfile::serialize_json))]
    SerializeJson(serde_json::Error),

    #[display("Failed to write lockfile: {_0}")]
    #[diagnostic(code(lockgraph_lockfile::write_file))]
    WriteFile(io::Error),
}

impl RawLockfile {
    /// Load the lockfile of the project at `dir`, or `None` if there is none.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>, LoadLockfileError> {
        let file_path = dir.join(RawLockfile::FILE_NAME);
        let content = match fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return error.pipe(LoadLockfileError::ReadFile).pipe(Err),
        };
        content
            .pipe_as_ref(RawLockfile::from_json_str)
            .map(Some)
            .map_err(LoadLockfileError::ParseJson)
    }

    /// Write the lockfile into the project at `dir`.
    pub fn save_to_dir(&self, dir: &Path) -> Result<(), SaveLockfileError> {
        let content = self.to_json_string().map_err(SaveLockfileError::SerializeJson)?;
        fs::write(dir.join(RawLockfile::FILE_NAME), content).map_err(SaveLockfileError::WriteFile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawPackage;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file() {
        let dir = tempdir().unwrap();
        assert!(RawLockfile::load_from_dir(dir.path()).unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let mut lockfile = RawLockfile::new(1);
        lockfile.name = Some("app".to_string());
        lockfile.dependencies.insert("ms".to_string(), RawPackage::new("2.1.3"));
        lockfile.save_to_dir(dir.path()).unwrap();

        let text = fs::read_to_string(dir.path().join("package-lock.json")).unwrap();
        assert!(text.ends_with("}\n"));
        let received = RawLockfile::load_from_dir(dir.path()).unwrap();
        assert_eq!(received, Some(lockfile));
    }

    #[test]
    fn invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package-lock.json"), "{ lockfileVersion: 1 }").unwrap();
        let error = RawLockfile::load_from_dir(dir.path()).unwrap_err();
        dbg!(&error);
        assert!(matches!(error, LoadLockfileError::ParseJson(_)));
        assert!(error.to_string().starts_with("Failed to parse lockfile content as JSON: "));
    }
}
