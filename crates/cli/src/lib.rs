//! Prompthub CLI
//!
//! Shared plumbing for the `pull-prompts` and `push-prompts` binaries:
//! global options, configuration bootstrap and exit-status reporting.

pub mod commands;

use clap::builder::FalseyValueParser;
use clap::Args;
use prompthub_core::{config::AppConfig, logging, AppError, AppResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// Options shared by both binaries.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, env = "PROMPTHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, env = "PROMPTHUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,
}

/// Load configuration, apply CLI overrides and start logging.
pub fn bootstrap(global: &GlobalArgs) -> AppResult<AppConfig> {
    let config = AppConfig::load_with(global.workspace.clone(), global.config.clone())?
        .with_overrides(global.log_level.clone(), global.verbose, global.no_color);

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Hub API: {}", config.api_url);

    Ok(config)
}

/// Print the banner shown at the start of each run.
pub fn print_section_header(title: &str) {
    let rule = "=".repeat(title.chars().count());
    println!("{}\n{}\n{}", rule, title, rule);
}

/// Turn a command outcome into a process exit status.
///
/// Failures print a diagnostic to stderr; lists (missing variables,
/// validation violations) are printed one item per line.
pub fn report(result: AppResult<()>) -> ExitCode {
    match result {
        Ok(()) => {
            tracing::info!("Command completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            for line in detail_lines(&e) {
                eprintln!("  - {}", line);
            }
            ExitCode::FAILURE
        }
    }
}

fn detail_lines(error: &AppError) -> &[String] {
    match error {
        AppError::MissingConfiguration(vars) => vars.as_slice(),
        AppError::Validation(violations) => violations.as_slice(),
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        global: GlobalArgs,
    }

    #[test]
    fn test_no_color_flag_and_env() {
        let cli = TestCli::try_parse_from(["test", "--no-color"]).unwrap();
        assert!(cli.global.no_color);

        std::env::set_var("NO_COLOR", "1");
        let with_env = TestCli::try_parse_from(["test"]);
        std::env::remove_var("NO_COLOR");

        assert!(with_env.unwrap().global.no_color);
    }

    #[test]
    fn test_detail_lines() {
        let err = AppError::Validation(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(detail_lines(&err), ["one".to_string(), "two".to_string()]);

        let err = AppError::Remote("down".to_string());
        assert!(detail_lines(&err).is_empty());
    }
}
