use derive_more::Display;

/// Syntax: `{name}@{version}`
///
/// Examples: `ms@2.1.3`, `@types/node@18.7.19`, `my-lib@file:../my-lib`
///
/// The version is kept verbatim, lockfiles may pin non-semver versions such as tarball URLs.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("{name}@{version}")]
pub struct PkgNameVer {
    pub name: String,
    pub version: String,
}

impl PkgNameVer {
    /// Construct a [`PkgNameVer`].
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        PkgNameVer { name: name.into(), version: version.into() }
    }
}
