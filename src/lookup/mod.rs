//! Strategies that locate a package's `.pc` file and parse it.
//!
//! - `workspace` - `<root>/lib/<os>_<arch>/<pkg>/<pkg>.pc` under every workspace root
//! - `remote` - fetch the release archive of a hosting project, then look in the workspace
//! - `search_path` - `<dir>/<pkg>.pc` for every `PKG_CONFIG_PATH` directory
//! - `registry` - tries strategies in order and aggregates their failures

mod registry;
mod remote;
mod search_path;
mod workspace;

use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::package::{self, PkgConfig, Variables};
use crate::runtime::Runtime;

pub use registry::LookupRegistry;
pub use remote::RemoteLookup;
pub use search_path::{DEFAULT_SEARCH_PATH, SearchPathLookup};
pub use workspace::WorkspaceLookup;

/// A way of resolving a package name to its descriptor.
#[cfg_attr(test, mockall::automock)]
pub trait Lookup {
    /// Identifier used when reporting this strategy's errors.
    fn name(&self) -> &'static str;

    fn lookup(&self, package: &str) -> Result<PkgConfig>;
}

/// Open and parse the `.pc` file at `path`, stamping it with its location.
#[tracing::instrument(skip(runtime, vars))]
pub(crate) fn load_pc<R: Runtime + ?Sized>(
    runtime: &R,
    path: &Path,
    vars: Variables,
) -> Result<PkgConfig> {
    let file = runtime.open(path).map_err(|e| Error::io(path, e))?;
    let mut pc = package::parse_with_vars(BufReader::new(file), vars)?;
    pc.file = Some(path.to_path_buf());
    Ok(pc)
}
