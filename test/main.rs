// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use anyhow::Result;
use assert_cmd::Command;
use pretty_assertions::assert_eq;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

struct DotfilesFixture {
    _root: TempDir,
    source: PathBuf,
    home: PathBuf,
}

impl DotfilesFixture {
    fn new(entries: &[&str]) -> Result<Self> {
        let root = TempDir::new()?;
        let source = root.path().join("dotfiles");
        let home = root.path().join("home");
        fs::create_dir_all(&source)?;
        fs::create_dir_all(&home)?;

        for entry in entries {
            fs::write(source.join(entry), format!("# {entry}\n"))?;
        }

        Ok(Self {
            _root: root,
            source,
            home,
        })
    }

    fn source(&self) -> &Path {
        self.source.as_path()
    }

    fn home(&self) -> &Path {
        self.home.as_path()
    }
}

fn dotlink() -> Result<Command> {
    Ok(Command::cargo_bin("dotlink")?)
}

#[test]
fn links_current_dir_into_home_without_arguments() -> Result<()> {
    let fixture = DotfilesFixture::new(&["README", "zshrc", "vimrc"])?;

    dotlink()?
        .current_dir(fixture.source())
        .env("HOME", fixture.home())
        .assert()
        .success();

    for name in ["zshrc", "vimrc"] {
        assert_eq!(
            fs::read_link(fixture.home().join(format!(".{name}")))?,
            fixture.source().join(name)
        );
    }
    assert!(fs::symlink_metadata(fixture.home().join(".README")).is_err());

    Ok(())
}

#[test]
fn explicit_directories_override_defaults() -> Result<()> {
    let fixture = DotfilesFixture::new(&["gitconfig", "install-environment.rb"])?;

    dotlink()?
        .arg("--source")
        .arg(fixture.source())
        .arg("--destination")
        .arg(fixture.home())
        .env("HOME", "/nonexistent")
        .assert()
        .success();

    assert_eq!(
        fs::read_link(fixture.home().join(".gitconfig"))?,
        fixture.source().join("gitconfig")
    );
    assert!(fs::symlink_metadata(fixture.home().join(".install-environment.rb")).is_err());

    Ok(())
}

#[test]
fn rerun_keeps_links_intact() -> Result<()> {
    let fixture = DotfilesFixture::new(&["zshrc"])?;

    for _ in 0..2 {
        dotlink()?
            .arg("-s")
            .arg(fixture.source())
            .arg("-d")
            .arg(fixture.home())
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_link(fixture.home().join(".zshrc"))?,
        fixture.source().join("zshrc")
    );
    assert_eq!(fs::read_dir(fixture.home())?.count(), 1);

    Ok(())
}

#[test]
fn missing_source_fails() -> Result<()> {
    let fixture = DotfilesFixture::new(&[])?;

    dotlink()?
        .arg("--source")
        .arg(fixture.source().join("missing"))
        .arg("--destination")
        .arg(fixture.home())
        .assert()
        .failure()
        .code(1);

    assert_eq!(fs::read_dir(fixture.home())?.count(), 0);

    Ok(())
}

#[test]
fn link_failures_complete_run_then_fail() -> Result<()> {
    let fixture = DotfilesFixture::new(&["zshrc", "vimrc"])?;
    fs::create_dir(fixture.home().join(".vimrc"))?;
    fs::write(fixture.home().join(".vimrc").join("keep"), "")?;

    dotlink()?
        .arg("--source")
        .arg(fixture.source())
        .arg("--destination")
        .arg(fixture.home())
        .assert()
        .failure()
        .code(1);

    // The failing entry does not stop the other one from being linked.
    assert_eq!(
        fs::read_link(fixture.home().join(".zshrc"))?,
        fixture.source().join("zshrc")
    );
    assert!(fixture.home().join(".vimrc").join("keep").exists());

    Ok(())
}
