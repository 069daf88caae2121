use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use taskrank_core::{
    Strategy, TimeError, UnknownStrategy, ValidationError, parse_date, rank_with, suggest,
    today_in, validate_tasks,
};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod input;
mod report;
mod sample;
mod state;

use config::Config;
use input::{InputError, parse_batch, read_input};
use report::Format;

#[derive(Parser, Debug)]
#[command(name = "taskrank", version, about = "Rank tasks by computed priority")]
struct Cli {
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a batch of tasks and print it ranked
    Analyze {
        #[command(flatten)]
        run: RunArgs,

        /// Include per-factor sub-scores
        #[arg(long)]
        breakdown: bool,

        /// Only print the first N tasks
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the top few tasks (uses a demo batch when --input is omitted)
    Suggest {
        #[command(flatten)]
        run: RunArgs,

        /// Number of suggestions (default: config `suggest.limit`)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the weight profile of every strategy
    Strategies,

    /// Manage ~/.taskrank/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// JSON batch: an array of tasks or {"tasks": [...], "strategy": "..."}; "-" reads stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// fastest_wins | high_impact | deadline_driven | smart_balance
    #[arg(long, value_parser = parse_strategy)]
    strategy: Option<Strategy>,

    /// Evaluation date (YYYY-MM-DD); defaults to today in the configured timezone
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn parse_strategy(s: &str) -> Result<Strategy, UnknownStrategy> {
    s.parse()
}

fn parse_today(s: &str) -> Result<NaiveDate, TimeError> {
    parse_date(s)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_client_error(&e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "taskrank=debug,taskrank_core=debug"
    } else {
        "taskrank=info,taskrank_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .with(filter)
        .init();
}

/// Malformed input from the caller, as opposed to a fault on our side.
fn is_client_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<ValidationError>().is_some()
        || e.downcast_ref::<InputError>().is_some()
        || e.downcast_ref::<UnknownStrategy>().is_some()
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze {
            run,
            breakdown,
            limit,
        } => {
            let cfg = config::load_config()?;
            analyze(run, breakdown, limit, &cfg).await?;
        }

        Command::Suggest { run, limit } => {
            let cfg = config::load_config()?;
            suggest_tasks(run, limit, &cfg).await?;
        }

        Command::Strategies => report::print_strategies(),

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

async fn analyze(args: RunArgs, breakdown: bool, limit: Option<usize>, cfg: &Config) -> Result<()> {
    let path = args.input.clone().unwrap_or_else(|| PathBuf::from("-"));
    let batch = parse_batch(&read_input(&path).await?)?;
    validate_tasks(&batch.tasks)?;

    let strategy = pick_strategy(args.strategy, batch.strategy.as_deref(), cfg)?;
    let today = pick_today(args.today, cfg)?;
    debug!(tasks = batch.tasks.len(), %strategy, %today, "analyzing batch");

    let ranked = rank_with(&batch.tasks, strategy, today);
    let mut breakdowns = breakdown.then(|| report::breakdowns(&ranked, strategy, today));

    let shown = limit.map_or(ranked.len(), |n| n.min(ranked.len()));
    if let Some(b) = breakdowns.as_mut() {
        b.truncate(shown);
    }
    report::print_analysis(strategy, &ranked[..shown], breakdowns.as_deref(), args.format)
}

async fn suggest_tasks(args: RunArgs, limit: Option<usize>, cfg: &Config) -> Result<()> {
    let today = pick_today(args.today, cfg)?;

    let (tasks, payload_strategy) = match &args.input {
        Some(path) => {
            let batch = parse_batch(&read_input(path).await?)?;
            validate_tasks(&batch.tasks)?;
            (batch.tasks, batch.strategy)
        }
        None => {
            info!("no --input given; using the demo batch");
            (sample::demo_tasks(today), None)
        }
    };

    let strategy = pick_strategy(args.strategy, payload_strategy.as_deref(), cfg)?;
    let limit = limit.unwrap_or(cfg.suggest.limit);
    let top = suggest(&tasks, strategy, today, limit);
    report::print_suggestions(strategy, &top, args.format)
}

/// Flag, then payload, then config. Unknown names are rejected here rather
/// than silently falling back.
fn pick_strategy(flag: Option<Strategy>, payload: Option<&str>, cfg: &Config) -> Result<Strategy> {
    if let Some(strategy) = flag {
        return Ok(strategy);
    }
    if let Some(name) = payload {
        return Ok(name.parse::<Strategy>()?);
    }
    cfg.scoring
        .strategy
        .parse::<Strategy>()
        .map_err(|e| anyhow::anyhow!("config scoring.strategy: {e}"))
}

fn pick_today(flag: Option<NaiveDate>, cfg: &Config) -> Result<NaiveDate> {
    match flag {
        Some(day) => Ok(day),
        None => today_in(&cfg.scoring.timezone).context("config scoring.timezone"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "taskrank",
            "analyze",
            "--input",
            "tasks.json",
            "--strategy",
            "high_impact",
            "--today",
            "2025-11-26",
            "--format",
            "table",
            "--breakdown",
        ])
        .unwrap();

        match cli.command {
            Command::Analyze { run, breakdown, limit } => {
                assert_eq!(run.strategy, Some(Strategy::HighImpact));
                assert_eq!(run.today, NaiveDate::from_ymd_opt(2025, 11, 26));
                assert_eq!(run.format, Format::Table);
                assert!(breakdown);
                assert_eq!(limit, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["taskrank", "analyze", "--strategy", "yolo"]).is_err());
    }

    #[test]
    fn test_strategy_precedence() {
        let cfg = Config::default();
        assert_eq!(
            pick_strategy(Some(Strategy::FastestWins), Some("high_impact"), &cfg).unwrap(),
            Strategy::FastestWins
        );
        assert_eq!(pick_strategy(None, Some("high_impact"), &cfg).unwrap(), Strategy::HighImpact);
        assert_eq!(pick_strategy(None, None, &cfg).unwrap(), Strategy::SmartBalance);
    }

    #[test]
    fn test_unknown_payload_strategy_is_client_error() {
        let err = pick_strategy(None, Some("yolo"), &Config::default()).unwrap_err();
        assert!(is_client_error(&err));
    }

    #[test]
    fn test_validation_failure_is_client_error() {
        let batch = parse_batch(r#"[{"title": ""}]"#).unwrap();
        let err = anyhow::Error::from(validate_tasks(&batch.tasks).unwrap_err());
        assert!(is_client_error(&err));
        assert!(!is_client_error(&anyhow::anyhow!("disk on fire")));
    }
}
