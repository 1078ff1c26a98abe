//! Working directory validation against the configured allow-list
//!
//! Requested paths are canonicalized before any comparison, so `..`
//! segments and symlinks cannot escape an allowed directory.

use std::path::PathBuf;

use crate::types::{Config, ExecError, ExecResult};

/// Admits or denies requested working directories
#[derive(Debug, Clone)]
pub struct PathAuthorizer {
    default_dir: PathBuf,
    allowed_dirs: Vec<PathBuf>,
}

impl PathAuthorizer {
    pub fn new(config: &Config) -> Self {
        Self {
            default_dir: config.default_dir.clone(),
            allowed_dirs: config.allowed_dirs.clone(),
        }
    }

    /// Resolve a requested directory and check it against the allow-list.
    ///
    /// An absent request falls back to the configured default directory,
    /// which goes through the same existence and allow-list checks.
    pub fn authorize(&self, requested: Option<&str>) -> ExecResult<PathBuf> {
        let candidate = match requested {
            Some(dir) => PathBuf::from(dir),
            None => self.default_dir.clone(),
        };

        let resolved = candidate
            .canonicalize()
            .map_err(|_| ExecError::DirNotFound(candidate.display().to_string()))?;

        if !resolved.is_dir() {
            return Err(ExecError::NotADirectory(resolved.display().to_string()));
        }

        if self.allowed_dirs.is_empty() {
            return Ok(resolved);
        }

        // Compare canonical paths on both sides; starts_with covers both
        // "equal to" and "descendant of".
        let admitted = self.allowed_dirs.iter().any(|allowed| {
            let Ok(allowed_canonical) = allowed.canonicalize() else {
                return false;
            };
            resolved.starts_with(&allowed_canonical)
        });

        if !admitted {
            return Err(ExecError::DirNotAllowed(resolved.display().to_string()));
        }

        Ok(resolved)
    }
}
