//! Runtime abstraction for system operations.
//!
//! Lookups reach the environment and the file system only through the
//! [`Runtime`] trait, so they can be tested against a mock.
//!
//! # Structure
//!
//! - `env` - Environment variables, working and home directories
//! - `fs` - File system operations (open, create, directory checks)

mod env;
mod fs;

use std::env as std_env;
use std::io;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn current_dir(&self) -> io::Result<PathBuf>;
    fn home_dir(&self) -> Option<PathBuf>;

    // File System
    fn is_dir(&self, path: &Path) -> bool;
    fn open(&self, path: &Path) -> io::Result<Box<dyn io::Read + Send>>;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn create_file(&self, path: &Path) -> io::Result<Box<dyn io::Write + Send>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        self.current_dir_impl()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn io::Read + Send>> {
        self.open_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.create_dir_all_impl(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<Box<dyn io::Write + Send>> {
        self.create_file_impl(path)
    }
}
