use log::{debug, info};
use std::env;
use std::io::{Seek, SeekFrom};
use std::path::PathBuf;

use super::{Lookup, WorkspaceLookup};
use crate::archive::ZipExtractor;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::package::PkgConfig;
use crate::runtime::Runtime;
use crate::workspace::{ProjectId, Workspace};

/// Installs a package from its hosting project's release archive, then
/// finds it in the workspace.
pub struct RemoteLookup<'a, R: Runtime + ?Sized> {
    runtime: &'a R,
    workspace: &'a Workspace,
    client: HttpClient,
    project: Option<ProjectId>,
    base_url: Option<String>,
    temp_dir: PathBuf,
}

impl<'a, R: Runtime + ?Sized> RemoteLookup<'a, R> {
    pub const NAME: &'static str = "github.com";

    /// A lookup fetching from the project inferred for `workspace`.
    pub fn new(runtime: &'a R, workspace: &'a Workspace, client: HttpClient) -> Self {
        Self {
            runtime,
            workspace,
            client,
            project: workspace.project().cloned(),
            base_url: None,
            temp_dir: env::temp_dir(),
        }
    }

    /// Fetch from `project` instead of the inferred one.
    pub fn with_project(mut self, project: ProjectId) -> Self {
        self.project = Some(project);
        self
    }

    /// Replace `http://<host>` in archive URLs.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Download archives into `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Download the archive of `package` and unpack it into the install root.
    ///
    /// Returns the number of files written.
    #[tracing::instrument(skip(self))]
    pub fn fetch(&self, package: &str) -> Result<usize> {
        let project = self.project.as_ref().ok_or(Error::NoProject)?;
        let root = self.workspace.install_root()?;
        let url = project.archive_url(self.base_url.as_deref(), package);
        info!("fetching {} from {}", package, url);

        // Removed on drop, whatever happens below.
        let mut archive = tempfile::Builder::new()
            .prefix(package)
            .suffix(".zip")
            .tempfile_in(&self.temp_dir)
            .map_err(|e| Error::io(&self.temp_dir, e))?;
        self.client.download(&url, archive.as_file_mut())?;
        archive
            .as_file_mut()
            .seek(SeekFrom::Start(0))
            .map_err(|e| Error::io(archive.path(), e))?;
        debug!("downloaded {} to {:?}", url, archive.path());

        ZipExtractor.extract(self.runtime, archive.as_file(), root, package)
    }
}

impl<R: Runtime + ?Sized> Lookup for RemoteLookup<'_, R> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[tracing::instrument(skip(self))]
    fn lookup(&self, package: &str) -> Result<PkgConfig> {
        self.fetch(package)?;
        WorkspaceLookup::new(self.runtime, self.workspace).lookup(package)
    }
}
