//! Blocking HTTP client used to fetch release archives.

use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::io::Write;

use crate::error::{Error, Result};

/// HTTP client for downloading release archives.
#[derive(Clone, Default)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Downloads `url` into `writer`, returning the number of bytes written.
    ///
    /// A 404 answer maps to [`Error::RemoteNotFound`]; any other non-success
    /// status to [`Error::HttpStatus`]. Nothing is written in either case.
    #[tracing::instrument(skip(self, writer))]
    pub fn download<W: Write>(&self, url: &str, writer: &mut W) -> Result<u64> {
        debug!("Downloading {}...", url);

        let transport = |source| Error::Transport {
            url: url.to_string(),
            source,
        };

        let mut response = self.client.get(url).send().map_err(transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::RemoteNotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.copy_to(writer).map_err(transport)?;
        debug!("Downloaded {:.2} KB", bytes as f64 / 1024.0);

        Ok(bytes)
    }
}
