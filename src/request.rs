//! Resolution of several packages into one line of compiler/linker flags.

use std::collections::HashSet;
use std::io::Write;

use log::debug;

use crate::error::{Error, Result};
use crate::lookup::Lookup;
use crate::package::PkgConfig;

/// Package names and the flag sections requested on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PkgArgs {
    pub packages: Vec<String>,
    pub cflags: bool,
    pub libs: bool,
}

impl PkgArgs {
    /// Classify command-line tokens.
    ///
    /// `--cflags` and `--libs` select output sections, any other token
    /// starting with `-` is ignored, the rest are package names.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = PkgArgs::default();
        for arg in args {
            match arg.as_ref() {
                "--cflags" => parsed.cflags = true,
                "--libs" => parsed.libs = true,
                flag if flag.starts_with('-') => debug!("ignoring flag {}", flag),
                package => parsed.packages.push(package.to_string()),
            }
        }
        parsed
    }
}

/// A multi-package request.
pub struct Request<'a> {
    args: PkgArgs,
    lookup: Box<dyn Lookup + 'a>,
    resolved: Vec<(String, PkgConfig)>,
}

impl<'a> Request<'a> {
    pub fn new(args: PkgArgs, lookup: Box<dyn Lookup + 'a>) -> Self {
        Self {
            args,
            lookup,
            resolved: Vec::new(),
        }
    }

    /// Build a request from command-line tokens, see [`PkgArgs::parse`].
    pub fn from_args<I, S>(args: I, lookup: Box<dyn Lookup + 'a>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(PkgArgs::parse(args), lookup)
    }

    pub fn args(&self) -> &PkgArgs {
        &self.args
    }

    /// Descriptors from the last successful [`resolve`](Self::resolve), in
    /// request order and keyed by package name.
    pub fn resolved(&self) -> &[(String, PkgConfig)] {
        &self.resolved
    }

    /// Look up every distinct package once, in request order.
    ///
    /// The first failure aborts the whole request and nothing is kept.
    #[tracing::instrument(skip(self), fields(packages = ?self.args.packages))]
    pub fn resolve(&mut self) -> Result<()> {
        self.resolved.clear();
        if self.args.packages.is_empty() {
            return Err(Error::NoPackages);
        }

        let mut resolved: Vec<(String, PkgConfig)> = Vec::with_capacity(self.args.packages.len());
        for package in &self.args.packages {
            if resolved.iter().any(|(name, _)| name == package) {
                continue;
            }
            let pc = self.lookup.lookup(package)?;
            debug!("resolved {} from {:?}", package, pc.file);
            resolved.push((package.clone(), pc));
        }

        self.resolved = resolved;
        Ok(())
    }

    /// The merged flag line, without the trailing newline.
    ///
    /// Cflags of every package come first, then libs. A flag already emitted
    /// is skipped.
    pub fn flags(&self) -> Result<String> {
        let cflags = self
            .resolved
            .iter()
            .filter(|_| self.args.cflags)
            .flat_map(|(_, pc)| &pc.cflags);
        let libs = self
            .resolved
            .iter()
            .filter(|_| self.args.libs)
            .flat_map(|(_, pc)| &pc.libs);

        let mut seen = HashSet::new();
        let tokens: Vec<&str> = cflags
            .chain(libs)
            .map(String::as_str)
            .filter(|flag| seen.insert(*flag))
            .collect();

        if tokens.is_empty() {
            return Err(Error::EmptyConfig);
        }
        Ok(tokens.join(" "))
    }

    /// Write the flag line followed by a newline, returning the byte count.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<usize> {
        let mut line = self.flags()?;
        line.push('\n');
        w.write_all(line.as_bytes())?;
        Ok(line.len())
    }
}
