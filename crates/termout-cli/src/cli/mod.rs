//! CLI for termout: small producers that exercise the console coordinator.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use termout_core::config;
use termout_core::{ConsoleSession, Output};

use commands::{run_copy, run_demo, run_scan};

/// Top-level CLI for termout.
#[derive(Debug, Parser)]
#[command(name = "termout")]
#[command(about = "termout: serialized terminal output with a progress bar", long_about = None)]
pub struct Cli {
    /// Never draw the progress bar, even on a terminal.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy files into a directory concurrently, with a byte progress bar.
    Copy {
        /// Destination directory (created if missing).
        dest: PathBuf,
        /// Files to copy.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Walk a directory tree and list every entry.
    Scan {
        /// Directory to scan.
        dir: PathBuf,
    },

    /// Print status lines around a bar driven by a concurrent producer.
    Demo {
        /// Number of 50-byte steps to add to a 100-byte bar.
        #[arg(long, default_value = "5", value_name = "N")]
        steps: u32,
        /// Delay between steps in milliseconds.
        #[arg(long, default_value = "200", value_name = "MS")]
        delay_ms: u64,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        cfg.plain |= cli.plain;
        tracing::debug!("loaded config: {:?}", cfg);

        let session = ConsoleSession::start(Output::stdout(), &cfg);
        let console = session.console();
        match cli.command {
            CliCommand::Copy { dest, files } => run_copy(console, &dest, &files).await?,
            CliCommand::Scan { dir } => {
                run_scan(console, &dir).await?;
            }
            CliCommand::Demo { steps, delay_ms } => run_demo(console, steps, delay_ms).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
