//! 本地文件系统 Provider
//!
//! 实现 FileProvider trait，操作本地文件系统

use crate::kernel::services::ports::file::{DirEntry, FileError, FileProvider, Result};
use std::fs;
use std::io;
use std::path::Path;

pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn map_io(path: &Path, e: io::Error) -> FileError {
    match e.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
        _ => FileError::Io(e),
    }
}

impl FileProvider for LocalFileProvider {
    fn scheme(&self) -> &'static str {
        "file"
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !path.is_dir() {
            return Err(FileError::NotADirectory(path.to_path_buf()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| map_io(path, e))? {
            let entry = entry?;
            // 符号链接按目标类型处理，悬空链接当作普通文件
            let is_dir = entry.path().is_dir();
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path(),
                is_dir,
            });
        }

        entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });

        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::read_to_string(path).map_err(|e| map_io(path, e))
    }

    fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::read(path).map_err(|e| map_io(path, e))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/local.rs"]
mod tests;
