//! Error types shared by the parser, the lookup strategies and the request.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for pcfind operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The two sections of a `.pc` file, named in parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// `name=value` lines before the first blank line.
    Variable,
    /// `Name: value` lines after the first blank line.
    Keyword,
}

impl ParseState {
    /// Separator a line must contain in this state.
    pub fn separator(self) -> u8 {
        match self {
            ParseState::Variable => b'=',
            ParseState::Keyword => b':',
        }
    }
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseState::Variable => write!(f, "variable"),
            ParseState::Keyword => write!(f, "keyword"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A line lacks the separator of the current section or has an empty name.
    #[error("malformed {state} line: {line:?}")]
    Malformed { state: ParseState, line: String },

    /// The input ended before a keyword section was reached.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Nothing to emit: no flags of the requested kind.
    #[error("the package configuration is empty")]
    EmptyConfig,

    /// No candidate directory or file was found for the package.
    #[error("no library found in {location}: {package}")]
    NotFound { location: String, package: String },

    /// The release archive does not exist (HTTP 404).
    #[error("not found: {url}")]
    RemoteNotFound { url: String },

    /// The request could not be sent or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status other than 404.
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// An archive entry falls outside the allowed layout.
    #[error("unexpected file {entry:?} in archive for {package}")]
    UnexpectedEntry { package: String, entry: String },

    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing an anonymous stream failed.
    #[error("stream error: {0}")]
    Stream(#[from] io::Error),

    /// Every strategy of a composite lookup failed; errors are kept in try order.
    #[error("{}", format_named(.0))]
    Lookup(Vec<(String, Error)>),

    #[error("unable to guess project's URL from the current directory")]
    NoProject,

    #[error("invalid project {0:?}, expected HOST/OWNER/REPO")]
    InvalidProject(String),

    #[error("no workspace root is configured")]
    NoWorkspace,

    #[error("please specify at least one package name")]
    NoPackages,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error means "nothing there" rather than a broken lookup.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } | Error::RemoteNotFound { .. } => true,
            Error::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Error::Lookup(errors) => errors.iter().all(|(_, e)| e.is_not_found()),
            _ => false,
        }
    }
}

fn format_named(errors: &[(String, Error)]) -> String {
    errors
        .iter()
        .map(|(name, e)| format!("error {name}: {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
