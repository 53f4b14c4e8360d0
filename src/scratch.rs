//! Scratch directory lifecycle — create, reset, and recursively remove the
//! working directory handed to the configuration tool.

use std::io;
use std::path::{Component, PathBuf};

use tracing::debug;

/// A scratch directory name that could reach outside the source tree.
///
/// The scratch directory is destroyed with a recursive delete, so an
/// absolute name or one containing `..` segments could point that delete
/// at unrelated filesystem state.  Such names are rejected before any
/// mutation, and the rejection always aborts the run.
#[derive(Debug, thiserror::Error)]
#[error("unsafe scratch directory name `{name}`: {reason}")]
pub struct UnsafePathError {
    /// The offending configured name.
    pub name: String,
    /// Which rule the name broke.
    pub reason: &'static str,
}

/// Errors from scratch directory operations.
#[derive(Debug, thiserror::Error)]
pub enum ScratchDirError {
    #[error(transparent)]
    UnsafePath(#[from] UnsafePathError),

    /// A filesystem mutation failed.
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A disposable working directory at `<base>/<name>`.
///
/// `name` is re-validated on every mutating call — the recursive delete
/// must never run against an unchecked path, so no previous validation is
/// trusted.
#[derive(Debug)]
pub struct ScratchDir {
    base: PathBuf,
    name: PathBuf,
}

impl ScratchDir {
    pub fn new(base: impl Into<PathBuf>, name: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            name: name.into(),
        }
    }

    /// Full path of the scratch directory.
    pub fn path(&self) -> PathBuf {
        self.base.join(&self.name)
    }

    /// Whether the scratch directory currently exists on disk.
    pub fn exists(&self) -> bool {
        self.path().is_dir()
    }

    /// Check that the configured name is safe to hand to a recursive
    /// delete: relative, no `..` segments, at least one real component.
    pub fn validate(&self) -> Result<(), UnsafePathError> {
        if self.name.as_os_str().is_empty() {
            return Err(self.unsafe_name("empty name"));
        }
        if self.name.is_absolute() {
            return Err(self.unsafe_name("absolute path"));
        }
        let mut normal = 0usize;
        for component in self.name.components() {
            match component {
                Component::ParentDir => {
                    return Err(self.unsafe_name("contains a parent-directory segment"));
                }
                Component::Prefix(_) | Component::RootDir => {
                    return Err(self.unsafe_name("absolute path"));
                }
                Component::Normal(_) => normal += 1,
                Component::CurDir => {}
            }
        }
        if normal == 0 {
            return Err(self.unsafe_name("no directory component"));
        }
        Ok(())
    }

    /// Recursively delete the directory if it exists; no-op otherwise.
    pub fn ensure_absent(&self) -> Result<(), ScratchDirError> {
        self.validate()?;
        let path = self.path();
        if path.is_dir() {
            debug!(path = %path.display(), "removing scratch directory");
            std::fs::remove_dir_all(&path).map_err(|source| ScratchDirError::Io {
                action: "remove",
                path,
                source,
            })?;
        }
        Ok(())
    }

    /// Create the directory if absent; no-op if already present.
    pub fn ensure_present(&self) -> Result<(), ScratchDirError> {
        self.validate()?;
        let path = self.path();
        if !path.is_dir() {
            debug!(path = %path.display(), "creating scratch directory");
            std::fs::create_dir_all(&path).map_err(|source| ScratchDirError::Io {
                action: "create",
                path,
                source,
            })?;
        }
        Ok(())
    }

    fn unsafe_name(&self, reason: &'static str) -> UnsafePathError {
        UnsafePathError {
            name: self.name.display().to_string(),
            reason,
        }
    }
}
