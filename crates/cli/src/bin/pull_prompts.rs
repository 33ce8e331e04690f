//! pull-prompts
//!
//! Pulls a prompt from the LangSmith Prompt Hub and saves it under
//! `prompts/` as a YAML document.

use clap::Parser;
use prompthub::commands::PullCommand;
use prompthub::{bootstrap, print_section_header, report, GlobalArgs};
use prompthub_client::create_client;
use prompthub_core::AppResult;
use std::process::ExitCode;

/// Pull a prompt from the LangSmith Prompt Hub
#[derive(Parser, Debug)]
#[command(name = "pull-prompts")]
#[command(about = "Pull a prompt from the LangSmith Prompt Hub", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    command: PullCommand,
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = bootstrap(&cli.global)?;
    let _span = tracing::info_span!("command", name = "pull").entered();

    // Fails on a missing credential before any network call.
    let client = create_client(&config)?;

    let path = cli.command.execute(&config, client.as_ref()).await?;
    println!("Prompt saved to: {}", path.display());

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    print_section_header("Pull prompts from the LangSmith Prompt Hub");

    report(run(cli).await)
}
