pub mod archive;
pub mod commands;
pub mod error;
pub mod http;
pub mod lookup;
pub mod package;
pub mod platform;
pub mod request;
pub mod runtime;
pub mod workspace;

pub use error::{Error, Result};
pub use package::PkgConfig;
