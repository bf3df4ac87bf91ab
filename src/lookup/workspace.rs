use log::debug;
use std::path::{Path, PathBuf};

use super::{Lookup, load_pc};
use crate::error::{Error, Result};
use crate::package::PkgConfig;
use crate::runtime::Runtime;
use crate::workspace::Workspace;

/// Looks for `<pkg>.pc` in the library directory of every workspace root.
pub struct WorkspaceLookup<'a, R: Runtime + ?Sized> {
    runtime: &'a R,
    workspace: &'a Workspace,
}

impl<'a, R: Runtime + ?Sized> WorkspaceLookup<'a, R> {
    pub const NAME: &'static str = "$GOPATH";

    pub fn new(runtime: &'a R, workspace: &'a Workspace) -> Self {
        Self { runtime, workspace }
    }

    /// Roots whose header and library directories for `package` both exist,
    /// paired with those directories.
    fn candidates<'p>(
        &'p self,
        package: &'p str,
    ) -> impl Iterator<Item = (&'a Path, PathBuf, PathBuf)> + 'p {
        self.workspace.roots().iter().filter_map(move |root| {
            let (include, lib) = self.workspace.library_dirs(root, package);
            if self.runtime.is_dir(&include) && self.runtime.is_dir(&lib) {
                Some((root.as_path(), include, lib))
            } else {
                debug!("{} not installed under {:?}", package, root);
                None
            }
        })
    }

    fn not_found(package: &str) -> Error {
        Error::NotFound {
            location: Self::NAME.to_string(),
            package: package.to_string(),
        }
    }

    /// Synthesise a descriptor for a package installed without a `.pc` file.
    ///
    /// The first root holding both directories wins.
    #[tracing::instrument(skip(self))]
    pub fn generate(&self, package: &str) -> Result<PkgConfig> {
        let (_, include, lib) = self
            .candidates(package)
            .next()
            .ok_or_else(|| Self::not_found(package))?;
        let name = package.strip_prefix("lib").unwrap_or(package);

        Ok(PkgConfig {
            name: package.to_string(),
            libs: vec![
                format!("-L{}", lib.display()),
                format!("-l{}", name),
                "-Wl,-rpath".to_string(),
                "-Wl,$ORIGIN".to_string(),
            ],
            cflags: vec![format!("-I{}", include.display())],
            ..Default::default()
        })
    }
}

impl<R: Runtime + ?Sized> Lookup for WorkspaceLookup<'_, R> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[tracing::instrument(skip(self))]
    fn lookup(&self, package: &str) -> Result<PkgConfig> {
        let mut last_error = None;

        for (root, _, lib) in self.candidates(package) {
            let file = lib.join(format!("{package}.pc"));
            match load_pc(self.runtime, &file, self.workspace.variables(root)) {
                Ok(pc) => {
                    debug!("found {} in {:?}", package, file);
                    return Ok(pc);
                }
                Err(e) => {
                    debug!("skipping {:?}: {}", file, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Self::not_found(package)))
    }
}
