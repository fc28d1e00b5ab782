//! Writing generated trees to an output directory.
//!
//! The emitter confirms before touching the disk, optionally empties each
//! target directory, then writes every file. Every cleanup confirmation is
//! asked before the first entry is removed.

use crate::fs::{OutputFs, PathKind};
use crate::prompt::Confirm;
use astgen_codegen::GeneratedTree;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Error type for emission.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The output directory does not exist.
    #[error("the output directory {} does not exist", path.display())]
    OutputMissing {
        /// Output directory.
        path: PathBuf,
    },

    /// The output path is not a directory.
    #[error("the output path {} is not a directory", path.display())]
    NotADirectory {
        /// Output path.
        path: PathBuf,
    },

    /// The user declined a confirmation.
    #[error("aborted")]
    Aborted,

    /// A tree directory escapes the output directory.
    #[error("tree directory '{directory}' must be a relative path inside the output directory")]
    InvalidDirectory {
        /// Offending directory.
        directory: String,
    },

    /// Two trees resolve to the same target directory.
    #[error("trees '{first}' and '{second}' both write to {}", path.display())]
    OverlappingTrees {
        /// Shared target directory.
        path: PathBuf,
        /// Base class of the first tree.
        first: String,
        /// Base class of the second tree.
        second: String,
    },

    /// Reading the confirmation failed.
    #[error("prompt failed: {0}")]
    Prompt(#[source] io::Error),

    /// A filesystem operation failed.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl EmitError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Summary of a completed emission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Paths written, in order.
    pub written: Vec<PathBuf>,
    /// Entries removed while cleaning.
    pub removed: Vec<PathBuf>,
}

/// Writes generated trees below an output root.
pub struct Emitter<'a, F> {
    fs: F,
    prompt: &'a mut dyn Confirm,
    clean: bool,
}

impl<'a, F: OutputFs> Emitter<'a, F> {
    /// Creates an emitter that writes through `fs` and asks `prompt`.
    #[must_use]
    pub fn new(fs: F, prompt: &'a mut dyn Confirm) -> Self {
        Self {
            fs,
            prompt,
            clean: false,
        }
    }

    /// Empties each target directory before writing.
    #[must_use]
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Returns the filesystem.
    #[must_use]
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Writes `trees` below `root`.
    ///
    /// # Errors
    /// Returns `EmitError` if `root` is not an existing directory, a
    /// confirmation is declined, or a filesystem operation fails. Nothing is
    /// written unless the first confirmation is accepted.
    pub fn emit(&mut self, trees: &[GeneratedTree], root: &Path) -> Result<EmitReport, EmitError> {
        match self.fs.kind(root) {
            PathKind::Missing => {
                return Err(EmitError::OutputMissing {
                    path: root.to_path_buf(),
                });
            }
            PathKind::File => {
                return Err(EmitError::NotADirectory {
                    path: root.to_path_buf(),
                });
            }
            PathKind::Directory => {}
        }

        let targets = trees
            .iter()
            .map(|tree| target_dir(root, tree))
            .collect::<Result<Vec<_>, _>>()?;
        check_overlap(trees, &targets)?;

        let file_count: usize = trees.iter().map(|t| t.files.len()).sum();
        let question = format!("Writing {} files to {}. OK?", file_count, root.display());
        if !self.ask(&question)? {
            return Err(EmitError::Aborted);
        }

        let mut report = EmitReport::default();

        if self.clean {
            let stale = self.plan_clean(&targets)?;
            self.remove_all(stale, &mut report)?;
        }

        for (tree, dir) in trees.iter().zip(&targets) {
            self.fs
                .create_dir_all(dir)
                .map_err(|e| EmitError::io(dir, e))?;

            for file in &tree.files {
                let path = dir.join(&file.file_name);
                self.fs
                    .write_file(&path, &file.contents)
                    .map_err(|e| EmitError::io(&path, e))?;
                tracing::debug!("wrote {}", path.display());
                report.written.push(path);
            }

            tracing::info!(
                "Wrote {} files for {} to {}",
                tree.files.len(),
                tree.base_class_name,
                dir.display()
            );
        }

        Ok(report)
    }

    /// Lists the entries of every existing target directory, asking once per
    /// non-empty directory. Nothing is removed here.
    fn plan_clean(&mut self, targets: &[PathBuf]) -> Result<Vec<PathBuf>, EmitError> {
        let mut stale = Vec::new();

        for dir in targets {
            if self.fs.kind(dir) != PathKind::Directory {
                continue;
            }

            let entries = self.fs.list_dir(dir).map_err(|e| EmitError::io(dir, e))?;
            if entries.is_empty() {
                continue;
            }

            let question = format!(
                "Delete {} existing entries in {}?",
                entries.len(),
                dir.display()
            );
            if !self.ask(&question)? {
                return Err(EmitError::Aborted);
            }
            stale.extend(entries);
        }

        Ok(stale)
    }

    /// Removes the planned entries.
    ///
    /// An entry may already be gone when a parent target directory was
    /// cleaned first.
    fn remove_all(
        &mut self,
        stale: Vec<PathBuf>,
        report: &mut EmitReport,
    ) -> Result<(), EmitError> {
        for entry in stale {
            if self.fs.kind(&entry) == PathKind::Missing {
                continue;
            }
            self.fs
                .remove_entry(&entry)
                .map_err(|e| EmitError::io(&entry, e))?;
            tracing::warn!("Removed {}", entry.display());
            report.removed.push(entry);
        }

        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<bool, EmitError> {
        self.prompt.confirm(question).map_err(EmitError::Prompt)
    }
}

/// Resolves the directory a tree is written to. `.` components are dropped.
fn target_dir(root: &Path, tree: &GeneratedTree) -> Result<PathBuf, EmitError> {
    let Some(directory) = tree.directory.as_deref() else {
        return Ok(root.to_path_buf());
    };

    let mut target = root.to_path_buf();
    for component in Path::new(directory).components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::CurDir => {}
            _ => {
                return Err(EmitError::InvalidDirectory {
                    directory: directory.to_string(),
                });
            }
        }
    }

    Ok(target)
}

/// Rejects trees that resolve to the same directory, ignoring case.
fn check_overlap(trees: &[GeneratedTree], targets: &[PathBuf]) -> Result<(), EmitError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (tree, dir) in trees.iter().zip(targets) {
        let key = dir.to_string_lossy().to_lowercase();
        if let Some(first) = seen.insert(key, &tree.base_class_name) {
            return Err(EmitError::OverlappingTrees {
                path: dir.clone(),
                first: first.to_string(),
                second: tree.base_class_name.clone(),
            });
        }
    }

    Ok(())
}
