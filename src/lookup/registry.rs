//! Ordered chain of lookup strategies.

use log::debug;

use super::Lookup;
use crate::error::{Error, Result};
use crate::package::PkgConfig;

/// Tries every registered strategy in registration order.
///
/// The first success wins. When several strategies could find a package,
/// callers should not rely on which one does.
#[derive(Default)]
pub struct LookupRegistry<'a> {
    lookups: Vec<Box<dyn Lookup + 'a>>,
}

impl<'a> LookupRegistry<'a> {
    pub fn new() -> Self {
        Self {
            lookups: Vec::new(),
        }
    }

    /// Append a strategy to the end of the chain.
    pub fn register(&mut self, lookup: Box<dyn Lookup + 'a>) {
        self.lookups.push(lookup);
    }

    pub fn with(mut self, lookup: impl Lookup + 'a) -> Self {
        self.register(Box::new(lookup));
        self
    }

    /// Names of the registered strategies, in try order.
    pub fn names(&self) -> Vec<&'static str> {
        self.lookups.iter().map(|l| l.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }
}

impl Lookup for LookupRegistry<'_> {
    fn name(&self) -> &'static str {
        "default"
    }

    /// Returns the first success, or every strategy's error keyed by its name.
    #[tracing::instrument(skip(self))]
    fn lookup(&self, package: &str) -> Result<PkgConfig> {
        let mut errors = Vec::with_capacity(self.lookups.len());
        for lookup in &self.lookups {
            match lookup.lookup(package) {
                Ok(pc) => return Ok(pc),
                Err(e) => {
                    debug!("{} lookup for {} failed: {}", lookup.name(), package, e);
                    errors.push((lookup.name().to_string(), e));
                }
            }
        }
        Err(Error::Lookup(errors))
    }
}
