//! `termout scan` – list a directory tree, one producer per top-level entry.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use termout_core::Console;

use super::join_all;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanCounts {
    pub files: u64,
    pub dirs: u64,
}

impl ScanCounts {
    fn merge(&mut self, other: ScanCounts) {
        self.files += other.files;
        self.dirs += other.dirs;
    }
}

pub async fn run_scan(console: &Console, dir: &Path) -> Result<ScanCounts> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }
    let entries: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("cannot read {}", dir.display()))?
        .map(|e| e.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("cannot read {}", dir.display()))?;

    console.init_bar(entries.len() as u64, false);
    let mut tasks = Vec::with_capacity(entries.len());
    for entry in entries {
        let console = console.clone();
        tasks.push(tokio::task::spawn_blocking(move || {
            let counts = walk(&console, &entry);
            console.add_bar(1);
            counts
        }));
    }

    let mut counts = ScanCounts::default();
    for walked in join_all(tasks).await? {
        counts.merge(walked);
    }
    console.shutdown_bar();
    console.printf(format_args!(
        "{} file(s), {} dir(s) under {}\n",
        counts.files,
        counts.dirs,
        dir.display()
    ));
    tracing::info!(files = counts.files, dirs = counts.dirs, "scan finished");
    Ok(counts)
}

fn walk(console: &Console, path: &Path) -> Result<ScanCounts> {
    let meta = fs::symlink_metadata(path).with_context(|| format!("cannot stat {}", path.display()))?;
    console.printf(format_args!("{}\n", path.display()));
    let mut counts = ScanCounts::default();
    if !meta.is_dir() {
        counts.files = 1;
        return Ok(counts);
    }
    counts.dirs = 1;
    for entry in fs::read_dir(path).with_context(|| format!("cannot read {}", path.display()))? {
        let entry = entry.with_context(|| format!("cannot read {}", path.display()))?;
        counts.merge(walk(console, &entry.path())?);
    }
    Ok(counts)
}
