use crate::fixtures::Fixture;
use assert_cmd::prelude::*;
use command_extra::CommandExtra;
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};
use tempfile::{tempdir, TempDir};

/// A `lockgraph` command whose current directory is a fresh temporary workspace.
#[derive(Debug)]
pub struct CommandTempCwd {
    pub lockgraph: Command,
    pub root: TempDir,
    pub workspace: PathBuf,
}

impl CommandTempCwd {
    /// Create a temporary workspace and a `lockgraph` command running inside it.
    pub fn init() -> Self {
        let root = tempdir().expect("create temporary directory");
        let workspace = root.path().join("workspace");
        fs::create_dir(&workspace).expect("create temporary workspace for lockgraph");
        let lockgraph = Command::cargo_bin("lockgraph")
            .expect("find the lockgraph binary")
            .with_current_dir(&workspace);
        CommandTempCwd { lockgraph, root, workspace }
    }

    /// Same as [`CommandTempCwd::init`] with the files of `fixture` written to the workspace.
    pub fn with_fixture(fixture: &Fixture) -> Self {
        let command = CommandTempCwd::init();
        write_fixture(&command.workspace, fixture);
        command
    }
}

/// Write `package.json` and `package-lock.json` of `fixture` into `dir`.
pub fn write_fixture(dir: &Path, fixture: &Fixture) {
    let write_json = |file_name: &str, value: &serde_json::Value| {
        let mut text = serde_json::to_string_pretty(value).expect("serialize fixture");
        text.push('\n');
        fs::write(dir.join(file_name), text).expect("write fixture file");
    };
    write_json("package.json", &fixture.manifest);
    write_json("package-lock.json", &fixture.lockfile);
}

/// Read and parse a JSON file of the workspace.
pub fn read_json(dir: &Path, file_name: &str) -> serde_json::Value {
    let text = fs::read_to_string(dir.join(file_name)).expect("read workspace file");
    serde_json::from_str(&text).expect("parse workspace file as JSON")
}
