mod cli;
mod commands;
mod input;
mod report;
mod report_helpers;

use clap::{CommandFactory, Parser};
use taskscore::GoalProgress;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::ScoreArgs;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            records,
            history,
            config,
            formula,
            tenant,
            goal_target,
            goal_achieved,
            breakdown,
            json,
            top,
        } => {
            let goal = goal_target
                .zip(goal_achieved)
                .map(|(target_minutes, achieved_minutes)| GoalProgress {
                    target_minutes,
                    achieved_minutes,
                });
            commands::run_score(ScoreArgs {
                records,
                history,
                config,
                formula,
                tenant,
                goal,
                breakdown,
                json,
                top,
            })
        }
        Commands::Stats {
            records,
            factor,
            config,
            json,
        } => commands::run_stats(&records, factor, config.as_deref(), json),
        Commands::Formulas => {
            report::print_formulas();
            Ok(())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tks", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
