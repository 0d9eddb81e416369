use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Map of installed packages, keyed by package name.
///
/// Equality ignores the order of entries.
pub type RawPackageMap = IndexMap<String, RawPackage>;

/// Value of the `requires` field: package names to version ranges.
pub type RequiresMap = IndexMap<String, String>;

/// Content of a `package-lock.json` file with `lockfileVersion: 1`.
///
/// The order of the fields is the order npm writes them in. Fields this crate does not know about
/// are kept in [`RawLockfile::extra`] and written after the known ones.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLockfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub lockfile_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<bool>,
    /// The root dependency table, holding every package hoisted to the top of `node_modules`.
    #[serde(default)]
    pub dependencies: RawPackageMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One installed package.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawPackage {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    /// npm writes `true` or nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<RequiresMap>,
    /// Shadow overrides: versions of packages this subtree needs that differ from the ones an
    /// ancestor table provides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<RawPackageMap>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawLockfile {
    /// Name of the file in a project directory.
    pub const FILE_NAME: &'static str = "package-lock.json";

    /// Create an empty lockfile of `lockfile_version`.
    pub fn new(lockfile_version: u32) -> Self {
        RawLockfile {
            name: None,
            version: None,
            lockfile_version,
            requires: None,
            dependencies: RawPackageMap::new(),
            extra: Map::new(),
        }
    }

    /// Parse the text of a `package-lock.json` file.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Render the lockfile the way npm writes it: two spaces of indentation and a final newline.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }
}

impl RawPackage {
    /// Create a package entry with nothing but a version.
    pub fn new(version: impl Into<String>) -> Self {
        RawPackage {
            version: version.into(),
            resolved: None,
            integrity: None,
            dev: None,
            peer: None,
            requires: None,
            dependencies: None,
            extra: Map::new(),
        }
    }
}
