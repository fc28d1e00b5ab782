//! Filesystem access used by the emission driver.
//!
//! Everything that touches the disk goes through [`OutputFs`], so the
//! destructive parts of emission (cleaning a directory, overwriting files) can
//! be exercised against an in-memory tree.

use std::io;
use std::path::{Path, PathBuf};

/// What a path currently points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Nothing exists at the path.
    Missing,
    /// A regular file (or anything that is not a directory).
    File,
    /// A directory.
    Directory,
}

/// Filesystem operations needed to emit generated files.
pub trait OutputFs {
    /// Returns what `path` points to.
    fn kind(&self, path: &Path) -> PathKind;

    /// Lists the direct entries of a directory, sorted by path.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Creates a directory and its missing parents.
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;

    /// Removes a file, or a directory with all of its contents.
    fn remove_entry(&mut self, path: &Path) -> io::Result<()>;

    /// Creates or truncates a file with the given contents.
    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl OutputFs for DiskFs {
    fn kind(&self, path: &Path) -> PathKind {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => PathKind::Directory,
            Ok(_) => PathKind::File,
            Err(_) => PathKind::Missing,
        }
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_entry(&mut self, path: &Path) -> io::Result<()> {
        let meta = std::fs::symlink_metadata(path)?;
        if meta.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}
