// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Link dotfiles into the home directory.
//!
//! Dotlink takes a directory of dotfiles stored without their leading dot,
//! and symlinks every entry into the user's home directory under a dotted
//! name, e.g., `~/dotfiles/zshrc` becomes reachable as `~/.zshrc`. See
//! [`link`] for the exact linking rules.

pub mod link;
pub mod path;

pub use link::{IgnoreSet, LinkError, LinkOutcome, LinkReport, Linker};
