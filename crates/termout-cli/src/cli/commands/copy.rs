//! `termout copy` – copy files concurrently, driving a byte bar through `ProgressWriter`.

use anyhow::{anyhow, bail, Context, Result};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use termout_core::bar::human_bytes;
use termout_core::{Console, ProgressWriter};

pub async fn run_copy(console: &Console, dest: &Path, files: &[PathBuf]) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("failed to create destination: {}", dest.display()))?;

    let mut total_bytes = 0u64;
    let mut plan = Vec::with_capacity(files.len());
    let mut targets = HashSet::with_capacity(files.len());
    for src in files {
        let name = src
            .file_name()
            .ok_or_else(|| anyhow!("not a file name: {}", src.display()))?;
        let meta = fs::metadata(src).with_context(|| format!("cannot stat {}", src.display()))?;
        if !meta.is_file() {
            bail!("not a regular file: {}", src.display());
        }
        let dst = dest.join(name);
        if !targets.insert(dst.clone()) {
            bail!("duplicate destination: {}", dst.display());
        }
        total_bytes += meta.len();
        plan.push((src.clone(), dst));
    }

    console.init_bar(total_bytes, true);
    let mut tasks = Vec::with_capacity(plan.len());
    for (src, dst) in plan {
        let console = console.clone();
        tasks.push(tokio::task::spawn_blocking(move || {
            copy_one(&console, &src, &dst)
        }));
    }

    let mut copied = 0usize;
    let mut bytes = 0u64;
    let mut first_error: Option<anyhow::Error> = None;
    for task in tasks {
        match task.await.context("copy task panicked")? {
            Ok(n) => {
                copied += 1;
                bytes += n;
            }
            Err(e) => {
                console.printf(format_args!("failed: {:#}\n", e));
                first_error.get_or_insert(e);
            }
        }
    }
    console.shutdown_bar();
    console.printf(format_args!(
        "copied {} of {} file(s), {}\n",
        copied,
        files.len(),
        human_bytes(bytes as f64)
    ));
    tracing::info!(copied, bytes, "copy finished");

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn copy_one(console: &Console, src: &Path, dst: &Path) -> Result<u64> {
    let mut input = File::open(src).with_context(|| format!("cannot open {}", src.display()))?;
    let output = File::create(dst).with_context(|| format!("cannot create {}", dst.display()))?;
    let mut writer = ProgressWriter::new(output, console.clone());
    let n = io::copy(&mut input, &mut writer)
        .with_context(|| format!("copy {} -> {} failed", src.display(), dst.display()))?;
    writer.flush()?;
    console.printf(format_args!("{} -> {}\n", src.display(), dst.display()));
    tracing::debug!(src = %src.display(), bytes = n, "copied file");
    Ok(n)
}
