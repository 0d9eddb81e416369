mod graph;
mod load_lockfile;
mod lockfile_version;
mod parse;
mod pkg_name_ver;
mod raw;
mod synth;

pub use graph::{DependencyKind, PackageId, PackageMap, ParsedGraph, ParsedPackage};
pub use load_lockfile::{LoadLockfileError, SaveLockfileError};
pub use lockfile_version::{LockfileVersion, LockfileVersionError, LockfileVersionV1};
pub use parse::{parse, ParseError, SyncError};
pub use pkg_name_ver::PkgNameVer;
pub use raw::{RawLockfile, RawPackage, RawPackageMap, RequiresMap};
pub use synth::{synth, ConsistencyError};
