// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine the default directories that dotlink links from and into. Both
//! are resolved once at start up and handed to the linker as plain values.

use std::{
    env,
    ffi::{OsStr, OsString},
    io,
    path::{Path, PathBuf},
};

/// Determine absolute path to user's home directory.
///
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if home directory path cannot be
///   determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(PathError::NoWayHome)
}

/// Determine absolute path to the current working directory.
///
/// # Errors
///
/// - Return [`PathError::CurrentDir`] if the working directory is gone, or
///   cannot be accessed.
pub fn current_dir() -> Result<PathBuf> {
    env::current_dir().map_err(PathError::CurrentDir)
}

/// Make path absolute without resolving symlinks along the way.
///
/// # Errors
///
/// - Return [`PathError::CurrentDir`] if a relative path needs the working
///   directory and it cannot be determined.
pub fn absolute(path: impl AsRef<Path>) -> Result<PathBuf> {
    std::path::absolute(path.as_ref()).map_err(PathError::CurrentDir)
}

/// Prefix basename with a dot, e.g., "zshrc" becomes ".zshrc".
pub fn dotted(basename: impl AsRef<OsStr>) -> OsString {
    let mut name = OsString::from(".");
    name.push(basename.as_ref());
    name
}

/// Check if basename names a hidden entry.
pub fn is_hidden(basename: impl AsRef<OsStr>) -> bool {
    basename.as_ref().as_encoded_bytes().starts_with(b".")
}

/// Path resolution error types.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// No way to determine user's home directory.
    ///
    /// # See Also
    ///
    /// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
    #[error("cannot determine absolute path to user's home directory")]
    NoWayHome,

    /// Current working directory is not accessible.
    #[error("cannot determine current working directory")]
    CurrentDir(#[source] io::Error),
}

/// Friendly result alias :3
pub type Result<T, E = PathError> = std::result::Result<T, E>;
