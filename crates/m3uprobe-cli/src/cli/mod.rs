//! CLI for the m3uprobe HLS playlist liveness checker.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use m3uprobe_core::config;
use std::path::PathBuf;

use commands::{run_check, run_gen, run_probe};

/// Top-level CLI for the m3uprobe liveness checker.
#[derive(Debug, Parser)]
#[command(name = "m3uprobe")]
#[command(about = "m3uprobe: HLS playlist liveness checker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Probe every URL in a JSON list and write the working subset.
    Check {
        /// Input file: a JSON array of playlist URLs.
        input: PathBuf,

        /// Output file for the working subset (JSON array).
        output: PathBuf,

        /// Probe one URL at a time instead of using the worker pool.
        #[arg(long)]
        sequential: bool,

        /// Worker pool size (overrides the config file).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,

        /// Master playlist timeout in seconds (overrides the config file).
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Nested candidate timeout in seconds (overrides the config file).
        #[arg(long, value_name = "SECS")]
        nested_timeout: Option<u64>,
    },

    /// Probe a single playlist URL; exits 0 if live, 3 if not.
    Probe {
        /// Playlist URL to probe.
        url: String,

        /// Master playlist timeout in seconds (overrides the config file).
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Generate a numbered input list from a URL template containing `{}`.
    Gen {
        /// URL template, e.g. "https://host/live/{}/master.m3u8".
        template: String,

        /// First number substituted into the template (inclusive).
        start: u64,

        /// Last number substituted into the template (inclusive).
        end: u64,

        /// Output file for the generated JSON array.
        output: PathBuf,
    },

    /// Print a shell completion script to stdout.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    /// Dispatches the parsed command and returns the process exit code.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Check {
                input,
                output,
                sequential,
                workers,
                timeout,
                nested_timeout,
            } => {
                let mut cfg = cfg;
                if let Some(n) = workers {
                    cfg.workers = n;
                }
                if let Some(secs) = timeout {
                    cfg.master_timeout_secs = secs;
                }
                if let Some(secs) = nested_timeout {
                    cfg.nested_timeout_secs = secs;
                }
                run_check(&input, &output, &cfg, sequential)?;
                Ok(0)
            }
            CliCommand::Probe { url, timeout } => {
                let mut cfg = cfg;
                if let Some(secs) = timeout {
                    cfg.master_timeout_secs = secs;
                }
                Ok(run_probe(&url, &cfg))
            }
            CliCommand::Gen {
                template,
                start,
                end,
                output,
            } => {
                run_gen(&template, start, end, &output)?;
                Ok(0)
            }
            CliCommand::Completions { shell } => {
                let mut cmd = Cli::command();
                clap_complete::generate(shell, &mut cmd, "m3uprobe", &mut std::io::stdout());
                Ok(0)
            }
        }
    }
}
