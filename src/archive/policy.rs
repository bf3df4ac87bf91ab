//! Layout that release archives must follow.
//!
//! Every file of an archive for `<pkg>` lives either under `include/<pkg>/`
//! or under `lib/<os>_<arch>/<pkg>/`, with `<os>_<arch>` one of
//! [`SUPPORTED_TARGETS`](crate::platform::SUPPORTED_TARGETS).

use crate::error::{Error, Result};
use crate::platform;

/// Whether the archive entry `entry` may be installed for `package`.
pub fn is_valid_entry(entry: &str, package: &str) -> bool {
    if package.is_empty() {
        return false;
    }
    let rest = if let Some(rest) = entry.strip_prefix("include/") {
        rest
    } else if let Some(rest) = entry.strip_prefix("lib/") {
        match rest.split_once('/') {
            Some((triple, rest)) if platform::is_supported(triple) => rest,
            _ => return false,
        }
    } else {
        return false;
    };

    match rest.split_once('/') {
        Some((pkg, file)) if pkg == package => {
            !file.is_empty()
                && !file.contains('\\')
                && file.split('/').all(|c| !c.is_empty() && c != "." && c != "..")
        }
        _ => false,
    }
}

/// Like [`is_valid_entry`], reporting the offending entry.
pub fn validate_entry(entry: &str, package: &str) -> Result<()> {
    if is_valid_entry(entry, package) {
        Ok(())
    } else {
        Err(Error::UnexpectedEntry {
            package: package.to_string(),
            entry: entry.to_string(),
        })
    }
}
