use log::debug;
use std::env;
use std::path::PathBuf;

use super::{Lookup, load_pc};
use crate::error::{Error, Result};
use crate::package::{PkgConfig, Variables};
use crate::runtime::Runtime;

/// Directories searched after `PKG_CONFIG_PATH`.
#[cfg(unix)]
pub const DEFAULT_SEARCH_PATH: &[&str] = &[
    "/usr/local/lib/pkgconfig",
    "/usr/local/share/pkgconfig",
    "/usr/lib/pkgconfig",
    "/usr/share/pkgconfig",
];

#[cfg(not(unix))]
pub const DEFAULT_SEARCH_PATH: &[&str] = &[];

/// Looks for `<pkg>.pc` directly in each search-path directory.
pub struct SearchPathLookup<'a, R: Runtime + ?Sized> {
    runtime: &'a R,
    dirs: Vec<PathBuf>,
}

impl<'a, R: Runtime + ?Sized> SearchPathLookup<'a, R> {
    pub const NAME: &'static str = "$PKG_CONFIG_PATH";

    pub fn new(runtime: &'a R, dirs: Vec<PathBuf>) -> Self {
        Self { runtime, dirs }
    }

    /// `PKG_CONFIG_PATH` entries followed by [`DEFAULT_SEARCH_PATH`].
    pub fn from_env(runtime: &'a R) -> Self {
        let mut dirs: Vec<PathBuf> = runtime
            .env_var("PKG_CONFIG_PATH")
            .map(|value| {
                env::split_paths(&value)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        dirs.extend(DEFAULT_SEARCH_PATH.iter().map(PathBuf::from));
        Self::new(runtime, dirs)
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl<R: Runtime + ?Sized> Lookup for SearchPathLookup<'_, R> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[tracing::instrument(skip(self))]
    fn lookup(&self, package: &str) -> Result<PkgConfig> {
        let mut last_error = None;

        for dir in &self.dirs {
            let file = dir.join(format!("{package}.pc"));
            match load_pc(self.runtime, &file, Variables::new()) {
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

        Err(last_error.unwrap_or_else(|| Error::NotFound {
            location: Self::NAME.to_string(),
            package: package.to_string(),
        }))
    }
}
