#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::Session;
use output::{CliError, OutputMode, render_error};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "orgchart: reporting-line queries over member snapshots",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Member snapshot (JSON array, or an object with a `members` array).
    /// Defaults to `[snapshot] path` from orgchart.toml.
    #[arg(long, global = true, value_name = "FILE")]
    members: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "Render the management forest",
        after_help = "EXAMPLES:\n    orgchart --members members.json tree\n    orgchart tree --root 10 --json"
    )]
    Tree(cmd::tree::TreeArgs),

    #[command(
        next_help_heading = "Read",
        about = "List user ids of everyone reporting (transitively) to a member"
    )]
    Subordinates(cmd::subordinates::SubordinatesArgs),

    #[command(next_help_heading = "Read", about = "List a member's direct reports")]
    Reports(cmd::reports::ReportsArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show a member's management chain up to the root"
    )]
    Chain(cmd::chain::ChainArgs),

    #[command(
        next_help_heading = "Read",
        about = "Check whether one member is above another"
    )]
    IsManager(cmd::is_manager::IsManagerArgs),

    #[command(
        next_help_heading = "Validate",
        about = "Check a manager change; exits non-zero when it would create a cycle",
        after_help = "EXAMPLES:\n    # Gate a write on the verdict\n    orgchart check-reparent 21 30 && ./apply-change.sh 21 30"
    )]
    CheckReparent(cmd::check_reparent::CheckReparentArgs),

    #[command(
        next_help_heading = "Validate",
        about = "List members that can become a member's manager"
    )]
    Eligible(cmd::eligible::EligibleArgs),

    #[command(
        next_help_heading = "Diagnose",
        about = "List manager cycles already stored in the snapshot"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        next_help_heading = "Diagnose",
        about = "Summary statistics and structural fingerprint"
    )]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ORGCHART_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "orgchart=debug,info"
        } else {
            "orgchart=info,warn"
        })
    });

    let format = env::var("ORGCHART_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

impl Cli {
    /// Explicit flag wins; otherwise use what config resolution settled on.
    fn output_mode(&self, resolved: &str) -> OutputMode {
        match self.format {
            Some(mode) => mode,
            None if self.json => OutputMode::Json,
            None => OutputMode::from_resolved(resolved),
        }
    }
}

fn run(cli: &Cli, session: &Session) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Tree(args) => cmd::tree::run_tree(args, session),
        Commands::Subordinates(args) => cmd::subordinates::run_subordinates(args, session),
        Commands::Reports(args) => cmd::reports::run_reports(args, session),
        Commands::Chain(args) => cmd::chain::run_chain(args, session),
        Commands::IsManager(args) => cmd::is_manager::run_is_manager(args, session),
        Commands::CheckReparent(args) => cmd::check_reparent::run_check_reparent(args, session),
        Commands::Eligible(args) => cmd::eligible::run_eligible(args, session),
        Commands::Cycles(args) => cmd::cycles::run_cycles(args, session),
        Commands::Stats(args) => cmd::stats::run_stats(args, session),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    // Errors raised before config is known are rendered per the flags alone.
    let mut output = cli.output_mode("text");

    let result = env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| cmd::resolve_config(&cwd, cli.json))
        .and_then(|config| {
            output = cli.output_mode(&config.resolved_output);
            debug!(source = ?config.source, ?output, "config resolved");
            Session::load(cli.members.as_deref(), config, output)
        })
        .and_then(|session| run(&cli, &session));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = render_error(output, &CliError::from_anyhow(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from(["orgchart", "tree", "--members", "m.json", "--json"]);
        assert!(cli.json);
        assert_eq!(cli.members, Some(PathBuf::from("m.json")));
        assert!(matches!(cli.command, Commands::Tree(_)));
    }

    #[test]
    fn format_flag_beats_json_and_config() {
        let cli = Cli::parse_from(["orgchart", "--format", "pretty", "--json", "stats"]);
        assert_eq!(cli.output_mode("text"), OutputMode::Pretty);
    }

    #[test]
    fn json_flag_beats_config() {
        let cli = Cli::parse_from(["orgchart", "--json", "cycles"]);
        assert_eq!(cli.output_mode("pretty"), OutputMode::Json);
    }

    #[test]
    fn resolved_mode_used_without_flags() {
        let cli = Cli::parse_from(["orgchart", "stats"]);
        assert_eq!(cli.output_mode("pretty"), OutputMode::Pretty);
        assert_eq!(cli.output_mode("text"), OutputMode::Text);
    }

    #[test]
    fn kebab_case_subcommands() {
        let cli = Cli::parse_from(["orgchart", "check-reparent", "1", "2"]);
        assert!(matches!(
            cli.command,
            Commands::CheckReparent(cmd::check_reparent::CheckReparentArgs {
                member: 1,
                new_manager: 2
            })
        ));
        let cli = Cli::parse_from(["orgchart", "is-manager", "1", "2"]);
        assert!(matches!(cli.command, Commands::IsManager(_)));
    }

    #[test]
    fn member_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["orgchart", "chain", "abc"]).is_err());
    }
}
