// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use dotlink::{
    path::{current_dir, home_dir},
    IgnoreSet, Linker,
};

use anyhow::{bail, Result};
use clap::Parser;
use std::{path::PathBuf, process::exit};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Symlink every entry of a dotfiles directory into the home directory under
/// a dotted name.
#[derive(Debug, Clone, Parser)]
#[command(about, override_usage = "dotlink [options]", version)]
struct Cli {
    /// Directory to link entries from [default: current directory].
    #[arg(short, long, value_name = "path")]
    pub source: Option<PathBuf>,

    /// Directory to place links into [default: home directory].
    #[arg(short, long, value_name = "path")]
    pub destination: Option<PathBuf>,
}

impl Cli {
    fn run(self) -> Result<()> {
        let source = match self.source {
            Some(path) => path,
            None => current_dir()?,
        };
        let destination = match self.destination {
            Some(path) => path,
            None => home_dir()?,
        };

        let report = Linker::new(source, destination, IgnoreSet::default()).run()?;
        if !report.is_success() {
            bail!(
                "failed to link {} of {} entries",
                report.failures.len(),
                report.failures.len() + report.linked.len()
            );
        }

        Ok(())
    }
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    Cli::parse().run()
}
