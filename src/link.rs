// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Dotfile linking.
//!
//! A dotfiles directory keeps its entries without the leading dot, e.g.,
//! "zshrc" or "vim". Linking makes each entry visible to the programs that
//! read it by placing a symbolic link to it in the destination directory
//! under a dotted name:
//!
//! ```text
//! ~/dotfiles/zshrc  <-  ~/.zshrc
//! ~/dotfiles/vim/   <-  ~/.vim
//! ```
//!
//! # Linking Rules
//!
//! Only the top-level of the source directory is evaluated. Files and
//! directories are treated alike. Hidden entries are never linked, because
//! a dotfiles directory tends to carry a ".git" directory that has no
//! business ending up as "~/..git". Entries whose basename is listed in the
//! [`IgnoreSet`] are skipped as well.
//!
//! Whatever already exists at a link target gets replaced without being
//! followed: a regular file, any symlink, or an empty directory. A link that
//! already points at the right entry is left alone, so running the linker
//! twice changes nothing the second time around.
//!
//! # Failure Policy
//!
//! Failing to list the source directory aborts the whole run before any link
//! is touched. Failing to link one entry does not: the failure is logged,
//! recorded in the [`LinkReport`], and the next entry is processed.

use crate::path::{self, dotted, is_hidden, PathError};

use std::{
    collections::HashSet,
    ffi::{OsStr, OsString},
    fs, io,
    os::unix::fs::symlink,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

/// Basenames skipped by default.
///
/// The README, and the installer scripts that historically shipped beside
/// the dotfiles themselves.
pub const DEFAULT_IGNORE: [&str; 4] = [
    "README",
    "install-zsh-environment.rb",
    "install-environment.rb",
    "install-environment.py",
];

/// Set of basenames to exclude from linking.
///
/// Matching is exact and case-sensitive against the basename of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet(HashSet<OsString>);

impl IgnoreSet {
    /// Construct new ignore set from listing of basenames.
    pub fn new(names: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Check if basename is ignored.
    pub fn contains(&self, basename: impl AsRef<OsStr>) -> bool {
        self.0.contains(basename.as_ref())
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE)
    }
}

/// Single link to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Absolute path of the entry in the source directory.
    pub source: PathBuf,

    /// Dotted path in the destination directory that links to the source.
    pub target: PathBuf,
}

/// What happened at a link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Nothing existed at the target.
    Created,

    /// Something else existed at the target and got replaced.
    Replaced,

    /// Target already linked to the source.
    Unchanged,
}

/// Links computed from one listing of the source directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkPlan {
    /// Links to create, in directory listing order.
    pub entries: Vec<LinkEntry>,

    /// Basenames left out, either hidden or ignored.
    pub skipped: Vec<OsString>,
}

/// Result of a full linking run.
#[derive(Debug, Default)]
pub struct LinkReport {
    /// Entries that are linked now, with what it took to get there.
    pub linked: Vec<(LinkEntry, LinkOutcome)>,

    /// Basenames left out, either hidden or ignored.
    pub skipped: Vec<OsString>,

    /// Entries that could not be linked.
    pub failures: Vec<LinkFailure>,
}

impl LinkReport {
    /// Check if every planned entry got linked.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of links that had to be created or replaced.
    pub fn changed(&self) -> usize {
        self.linked
            .iter()
            .filter(|(_, outcome)| *outcome != LinkOutcome::Unchanged)
            .count()
    }
}

/// Dotfile linker.
///
/// Links every entry of a source directory into a destination directory
/// under a dotted name. Both directories are explicit, see
/// [`Linker::from_env`] for the usual current directory to home directory
/// setup.
#[derive(Debug, Clone)]
pub struct Linker {
    source_dir: PathBuf,
    destination_dir: PathBuf,
    ignore: IgnoreSet,
}

impl Linker {
    /// Construct new linker.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        destination_dir: impl Into<PathBuf>,
        ignore: IgnoreSet,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
            ignore,
        }
    }

    /// Construct new linker from the current working directory to the user's
    /// home directory.
    ///
    /// # Errors
    ///
    /// - Return [`LinkError::Path`] if either directory cannot be determined.
    pub fn from_env(ignore: IgnoreSet) -> Result<Self> {
        Ok(Self::new(path::current_dir()?, path::home_dir()?, ignore))
    }

    /// Directory whose entries get linked.
    pub fn source_dir(&self) -> &Path {
        self.source_dir.as_path()
    }

    /// Directory that receives the dotted links.
    pub fn destination_dir(&self) -> &Path {
        self.destination_dir.as_path()
    }

    /// Compute links to create without touching the destination directory.
    ///
    /// # Errors
    ///
    /// - Return [`LinkError::Enumerate`] if the source directory, or one of
    ///   its entries, cannot be read.
    /// - Return [`LinkError::Path`] if the source directory is relative and
    ///   the current working directory cannot be determined.
    #[instrument(skip(self), level = "debug")]
    pub fn plan(&self) -> Result<LinkPlan> {
        let source_dir = path::absolute(&self.source_dir)?;
        let enumerate = |error: io::Error| LinkError::Enumerate {
            path: source_dir.clone(),
            source: error,
        };

        let mut plan = LinkPlan::default();
        for entry in fs::read_dir(&source_dir).map_err(enumerate)? {
            let entry = entry.map_err(enumerate)?;
            let basename = entry.file_name();

            if is_hidden(&basename) {
                debug!("skip hidden entry {basename:?}");
                plan.skipped.push(basename);
                continue;
            }

            if self.ignore.contains(&basename) {
                debug!("skip ignored entry {basename:?}");
                plan.skipped.push(basename);
                continue;
            }

            plan.entries.push(LinkEntry {
                source: entry.path(),
                target: self.destination_dir.join(dotted(&basename)),
            });
        }

        Ok(plan)
    }

    /// Link every planned entry into the destination directory.
    ///
    /// Link failures do not stop the run, they are collected into the
    /// returned report instead.
    ///
    /// # Errors
    ///
    /// - Return [`LinkError`] if planning fails, see [`Linker::plan`].
    #[instrument(
        skip(self),
        fields(
            source = %self.source_dir.display(),
            destination = %self.destination_dir.display()
        )
    )]
    pub fn run(&self) -> Result<LinkReport> {
        let plan = self.plan()?;
        let mut report = LinkReport {
            skipped: plan.skipped,
            ..LinkReport::default()
        };

        for entry in plan.entries {
            match force_symlink(&entry.source, &entry.target) {
                Ok(LinkOutcome::Unchanged) => {
                    debug!("{} already linked", entry.target.display());
                    report.linked.push((entry, LinkOutcome::Unchanged));
                }
                Ok(outcome) => {
                    info!(
                        "link {} -> {}",
                        entry.target.display(),
                        entry.source.display()
                    );
                    report.linked.push((entry, outcome));
                }
                Err(error) => {
                    let failure = LinkFailure {
                        entry,
                        source: error,
                    };
                    warn!("{failure}: {}", failure.source);
                    report.failures.push(failure);
                }
            }
        }

        info!(
            "{} linked ({} changed), {} skipped, {} failed",
            report.linked.len(),
            report.changed(),
            report.skipped.len(),
            report.failures.len()
        );

        Ok(report)
    }
}

/// Force symlink at target to point at source.
///
/// Behaves like `ln -nfs`: anything at target is replaced without being
/// dereferenced. A symlink to a directory is removed as a link, never
/// descended into. A real directory is only replaced when empty.
///
/// # Errors
///
/// - Return [`io::Error`] if target cannot be inspected, removed, or
///   linked.
pub fn force_symlink(source: &Path, target: &Path) -> io::Result<LinkOutcome> {
    let outcome = match fs::symlink_metadata(target) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            if fs::read_link(target)? == source {
                return Ok(LinkOutcome::Unchanged);
            }
            fs::remove_file(target)?;
            LinkOutcome::Replaced
        }
        Ok(metadata) if metadata.is_dir() => {
            fs::remove_dir(target)?;
            LinkOutcome::Replaced
        }
        Ok(_) => {
            fs::remove_file(target)?;
            LinkOutcome::Replaced
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => LinkOutcome::Created,
        Err(error) => return Err(error),
    };

    symlink(source, target)?;
    Ok(outcome)
}

/// Entry that could not be linked.
#[derive(Debug, thiserror::Error)]
#[error(
    "failed to link {} -> {}",
    .entry.target.display(),
    .entry.source.display()
)]
pub struct LinkFailure {
    /// Entry that failed.
    pub entry: LinkEntry,

    /// Underlying file system error.
    #[source]
    pub source: io::Error,
}

/// Linking error types.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Source directory cannot be listed.
    #[error("cannot list entries of {}", .path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Default directory cannot be resolved.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Friendly result alias :3
pub type Result<T, E = LinkError> = std::result::Result<T, E>;
