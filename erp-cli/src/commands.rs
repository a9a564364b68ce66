use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a job document and print the final state.
    Run {
        path: PathBuf,
        /// JSON or YAML file merged over the job's `state`.
        #[arg(long)]
        state: Option<PathBuf>,
        /// Set a `configuration` key, e.g. `--set accessToken=...`.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        #[arg(long, value_enum, default_value_t = EventsTarget::None)]
        events: EventsTarget,
        /// Per-request timeout in milliseconds.
        #[arg(long, default_value_t = 30000)]
        timeout: u64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check a job document without running it.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}
