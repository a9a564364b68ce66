use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "erp-adaptor", version, about = "Run ERP adaptor jobs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Run {
            path,
            state,
            set,
            events,
            timeout,
            output,
        } => cmd::run::run_cmd(&path, state.as_deref(), &set, events, timeout, output).await,
        Command::Validate { path, output } => cmd::validate::validate_cmd(&path, output).await,
    }
}
