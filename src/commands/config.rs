use anyhow::{Context, Result};
use log::debug;
use reqwest::blocking::Client;
use std::path::PathBuf;

use crate::{
    http::HttpClient,
    lookup::{LookupRegistry, RemoteLookup, SearchPathLookup, WorkspaceLookup},
    runtime::Runtime,
    workspace::Workspace,
};

/// Everything a command needs, read once from the environment.
pub struct Config<R: Runtime> {
    pub runtime: R,
    pub workspace: Workspace,
    pub search_path: Vec<PathBuf>,
    pub client: HttpClient,
    /// Replaces `http://<host>` in release archive URLs.
    pub release_url: Option<String>,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R) -> Result<Self> {
        let workspace = Workspace::detect(&runtime);
        let search_path = SearchPathLookup::from_env(&runtime).dirs().to_vec();
        let release_url = runtime
            .env_var("PKG_CONFIG_RELEASE_URL")
            .ok()
            .filter(|url| !url.is_empty());
        if let Some(url) = &release_url {
            debug!("Using release URL {}", url);
        }

        let client = Client::builder()
            .user_agent(concat!("pcfind/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            runtime,
            workspace,
            search_path,
            client: HttpClient::new(client),
            release_url,
        })
    }

    pub fn workspace_lookup(&self) -> WorkspaceLookup<'_, R> {
        WorkspaceLookup::new(&self.runtime, &self.workspace)
    }

    pub fn remote_lookup(&self) -> RemoteLookup<'_, R> {
        RemoteLookup::new(&self.runtime, &self.workspace, self.client.clone())
            .with_base_url(self.release_url.clone())
    }

    /// Workspace, then the inferred project's releases, then the search path.
    pub fn default_lookup(&self) -> LookupRegistry<'_> {
        LookupRegistry::new()
            .with(self.workspace_lookup())
            .with(self.remote_lookup())
            .with(SearchPathLookup::new(&self.runtime, self.search_path.clone()))
    }
}
