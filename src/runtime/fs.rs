//! File system operations (open, create, directories).

use std::fs;
use std::io;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn open_impl(&self, path: &Path) -> io::Result<Box<dyn io::Read + Send>> {
        let file = fs::File::open(path)?;
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_file_impl(&self, path: &Path) -> io::Result<Box<dyn io::Write + Send>> {
        let file = fs::File::create(path)?;
        Ok(Box::new(file))
    }
}
