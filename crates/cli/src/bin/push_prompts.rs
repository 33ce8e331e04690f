//! push-prompts
//!
//! Validates a prompt document and publishes it to the LangSmith Prompt Hub
//! with its tags, description and techniques.

use clap::Parser;
use prompthub::commands::PushCommand;
use prompthub::{bootstrap, print_section_header, report, GlobalArgs};
use prompthub_client::create_client;
use prompthub_core::AppResult;
use std::process::ExitCode;

/// Publish a prompt to the LangSmith Prompt Hub
#[derive(Parser, Debug)]
#[command(name = "push-prompts")]
#[command(about = "Validate and publish a prompt to the LangSmith Prompt Hub", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    command: PushCommand,
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = bootstrap(&cli.global)?;
    let _span = tracing::info_span!("command", name = "push").entered();

    let client = create_client(&config)?;

    let url = cli.command.execute(&config, client.as_ref()).await?;
    println!("Prompt published: {}", url);

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    print_section_header("Push prompts to the LangSmith Prompt Hub");

    report(run(cli).await)
}
