use anyhow::Result;
use std::process::ExitCode;

use docdrift::cli::{self, Commands};
use docdrift::commands::{self, CheckConfig};

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = cli::parse_args();

    match cli.command {
        Commands::Check {
            path,
            format,
            output,
            disable,
            no_parallel,
            jobs,
        } => {
            let config = CheckConfig {
                path,
                format,
                output,
                disable: disable.unwrap_or_default(),
                no_parallel,
                jobs,
            };
            let clean = commands::run_check(config)?;
            // Like any linter: findings are a failing exit status, not an error.
            Ok(if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Rules => {
            commands::run_rules();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init_config(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
