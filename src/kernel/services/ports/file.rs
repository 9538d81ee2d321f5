//! 文件系统 Provider trait
//!
//! The search core only needs ordered listings and whole-file reads; writes,
//! renames and deletes belong to the host editor.

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug)]
pub enum FileError {
    Io(io::Error),
    NotFound(PathBuf),
    PermissionDenied(PathBuf),
    NotADirectory(PathBuf),
    NotAFile(PathBuf),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "IO error: {}", e),
            FileError::NotFound(p) => write!(f, "Not found: {}", p.display()),
            FileError::PermissionDenied(p) => write!(f, "Permission denied: {}", p.display()),
            FileError::NotADirectory(p) => write!(f, "Not a directory: {}", p.display()),
            FileError::NotAFile(p) => write!(f, "Not a file: {}", p.display()),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Self { path, name, is_dir }
    }
}

pub trait FileProvider: Send + Sync {
    fn scheme(&self) -> &'static str;

    /// Entries of `path` in the order the search should visit them.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Whole file as UTF-8 text; invalid UTF-8 is an error.
    fn read_file(&self, path: &Path) -> Result<String>;

    fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/file.rs"]
mod tests;
