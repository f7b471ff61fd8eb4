// src/exec/working_dir.rs

use std::path::{Path, PathBuf};

use crate::errors::{ProcExecError, Result};

/// Resolve the directory a process will start in.
///
/// `None` means the caller's current directory. A given path must be absolute
/// and must name an existing directory; either failure is an
/// `InvalidArgument` and is reported before anything is spawned.
pub fn resolve_working_dir(dir: Option<&Path>) -> Result<PathBuf> {
    let Some(dir) = dir else {
        return Ok(std::env::current_dir()?);
    };

    if !dir.is_absolute() {
        return Err(ProcExecError::invalid_argument(
            "working_dir",
            format!("specified working directory is not an absolute path: {dir:?}"),
        ));
    }

    if !dir.is_dir() {
        return Err(ProcExecError::invalid_argument(
            "working_dir",
            format!("specified working directory doesn't exist: {dir:?}"),
        ));
    }

    Ok(dir.to_path_buf())
}
