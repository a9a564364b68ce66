use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Where pipeline events go while a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventsTarget {
    None,
    /// JSON lines on stdout, before the final state.
    Stdout,
    /// `tracing` records on stderr, filtered by `RUST_LOG`.
    Tracing,
}
