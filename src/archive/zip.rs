use log::{debug, info};
use std::io::{self, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use super::policy;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Extractor for .zip release archives
pub struct ZipExtractor;

impl ZipExtractor {
    /// Unpack the files of `archive` into `extract_to`.
    ///
    /// Directory entries are skipped. Every file entry must satisfy the
    /// layout policy for `package`; the first one that does not aborts the
    /// extraction, and files written before it are left in place.
    ///
    /// Returns the number of files written.
    #[tracing::instrument(skip(self, runtime, archive))]
    pub fn extract<R, S>(
        &self,
        runtime: &R,
        archive: S,
        extract_to: &Path,
        package: &str,
    ) -> Result<usize>
    where
        R: Runtime + ?Sized,
        S: Read + Seek,
    {
        debug!("Extracting zip archive to {:?}...", extract_to);
        let mut archive = ZipArchive::new(archive)?;
        let mut written = 0;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;

            if entry.is_dir() {
                debug!("Skipping directory {}", entry.name());
                continue;
            }

            let name = entry.name().to_string();
            policy::validate_entry(&name, package)?;
            let relative = entry
                .enclosed_name()
                .ok_or_else(|| Error::UnexpectedEntry {
                    package: package.to_string(),
                    entry: name.clone(),
                })?;

            let full_path = extract_to.join(relative);
            if let Some(parent) = full_path.parent() {
                runtime
                    .create_dir_all(parent)
                    .map_err(|e| Error::io(parent, e))?;
            }
            let mut dest_file = runtime
                .create_file(&full_path)
                .map_err(|e| Error::io(&full_path, e))?;
            io::copy(&mut entry, &mut dest_file).map_err(|e| Error::io(&full_path, e))?;

            debug!("Installed {:?}", full_path);
            written += 1;
        }

        info!("Extracted {} files for {}.", written, package);
        Ok(written)
    }
}
