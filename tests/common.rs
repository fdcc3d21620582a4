//! Shared test utilities for integration tests.
//!
//! Provides helpers for writing temporary input files and running the
//! typeset binary used across multiple test files.

#![allow(dead_code)]

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Writes markdown into a fresh temporary directory.
///
/// # Arguments
///
/// * `name`: File name inside the temporary directory
/// * `content`: File content
///
/// # Returns
///
/// Temporary directory (kept alive by the caller) and the file path
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_input(name: &str, content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok((dir, path))
}

/// Runs the typeset binary with arguments.
///
/// # Errors
///
/// Returns error if the binary cannot be spawned
pub fn typeset(args: &[&str], current_dir: &Path) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_typeset"))
        .args(args)
        .current_dir(current_dir)
        .output()?;
    Ok(output)
}

/// Returns stdout of a successful run.
///
/// # Errors
///
/// Returns error with stderr if the process failed
pub fn stdout(output: Output) -> Result<String> {
    if !output.status.success() {
        bail!(
            "typeset failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8(output.stdout)?)
}
