//! Command-line parsing for the bank stability dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring code.
//!
//! Every metric flag can also come from the environment (or a `.env` file,
//! loaded before parsing). Precedence: flag > environment > built-in default.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{BankMetrics, DashboardConfig, MetricKind};
use crate::scoring::{DEFAULT_SWEEP_POINTS, MAX_SWEEP_POINTS};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bsd", version, about = "Bank Stability Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score the given ratios and print the summary, recommendation and status.
    Score(ScoreArgs),
    /// Print how the score moves across one metric's range.
    Sweep(SweepArgs),
    /// Print a previously exported assessment JSON.
    Show(ShowArgs),
    /// Launch the interactive TUI.
    ///
    /// The metric flags set the initial slider positions.
    Tui(TuiArgs),
}

/// Bank name and the four ratios.
#[derive(Debug, Args, Clone)]
pub struct MetricArgs {
    /// Bank name used in recommendations.
    #[arg(short = 'b', long, env = "BSD_BANK_NAME", default_value = crate::domain::DEFAULT_BANK_NAME)]
    pub bank_name: String,

    /// Capital adequacy ratio (%), range 0-25.
    #[arg(long, env = "BSD_CAPITAL_ADEQUACY", default_value_t = 10.0, allow_negative_numbers = true)]
    pub capital_adequacy: f64,

    /// Non-performing loans ratio (%), range 0-15.
    #[arg(long, env = "BSD_NON_PERFORMING_LOANS", default_value_t = 5.0, allow_negative_numbers = true)]
    pub non_performing_loans: f64,

    /// Loan-to-deposit ratio (%), range 50-120.
    #[arg(long, env = "BSD_LOAN_TO_DEPOSIT", default_value_t = 85.0, allow_negative_numbers = true)]
    pub loan_to_deposit: f64,

    /// Net interest margin (%), range 0-10.
    #[arg(long, env = "BSD_NET_INTEREST_MARGIN", default_value_t = 3.0, allow_negative_numbers = true)]
    pub net_interest_margin: f64,
}

impl MetricArgs {
    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            bank_name: self.bank_name.clone(),
            metrics: BankMetrics::new(
                self.capital_adequacy,
                self.non_performing_loans,
                self.loan_to_deposit,
                self.net_interest_margin,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub metrics: MetricArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the assessment to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub metrics: MetricArgs,

    /// Metric to vary across its range.
    #[arg(long, value_enum, default_value_t = MetricKind::LoanToDeposit)]
    pub metric: MetricKind,

    /// Number of grid points (2-10001).
    #[arg(long, default_value_t = 15, value_parser = sweep_points_parser())]
    pub points: usize,
}

/// Options for printing a saved assessment.
#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Assessment JSON file produced by `bsd score --export`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub metrics: MetricArgs,

    /// Write logs to this file (the terminal is owned by the UI).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Grid points for the sensitivity chart (2-10001).
    #[arg(long, default_value_t = DEFAULT_SWEEP_POINTS, value_parser = sweep_points_parser())]
    pub chart_points: usize,
}

fn sweep_points_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(2..=MAX_SWEEP_POINTS as u64)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn metric_args_register_slider_defaults_and_env_names() {
        // Inspect the declared args rather than a parse result, so BSD_* variables
        // in the test environment can't mask the defaults.
        let cmd = Cli::command();
        let score = cmd.find_subcommand("score").unwrap();
        let expected = [
            ("capital_adequacy", "10", "BSD_CAPITAL_ADEQUACY"),
            ("non_performing_loans", "5", "BSD_NON_PERFORMING_LOANS"),
            ("loan_to_deposit", "85", "BSD_LOAN_TO_DEPOSIT"),
            ("net_interest_margin", "3", "BSD_NET_INTEREST_MARGIN"),
            ("bank_name", crate::domain::DEFAULT_BANK_NAME, "BSD_BANK_NAME"),
        ];
        for (id, default, env) in expected {
            let arg = score
                .get_arguments()
                .find(|a| a.get_id().as_str() == id)
                .unwrap_or_else(|| panic!("missing arg {id}"));
            let defaults: Vec<String> = arg
                .get_default_values()
                .iter()
                .map(|v| v.to_string_lossy().into_owned())
                .collect();
            assert_eq!(defaults, vec![default.to_string()], "{id}");
            assert_eq!(arg.get_env(), Some(OsStr::new(env)), "{id}");
        }
    }

    #[test]
    fn score_output_defaults() {
        let cli = Cli::try_parse_from(["bsd", "score"]).unwrap();
        let Command::Score(args) = cli.command else {
            panic!("expected score subcommand");
        };
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.export.is_none());
    }

    #[test]
    fn metric_flags_parse_including_negatives() {
        let cli = Cli::try_parse_from([
            "bsd",
            "score",
            "-b",
            "Acme",
            "--capital-adequacy",
            "12.5",
            "--non-performing-loans",
            "-1",
            "--loan-to-deposit",
            "80",
            "--net-interest-margin",
            "4",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Score(args) = cli.command else {
            panic!("expected score subcommand");
        };
        let config = args.metrics.to_config();
        assert_eq!(config.bank_name, "Acme");
        assert_eq!(config.metrics, BankMetrics::new(12.5, -1.0, 80.0, 4.0));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn non_numeric_metric_is_rejected_by_parser() {
        let err = Cli::try_parse_from(["bsd", "score", "--capital-adequacy", "lots"]);
        assert!(err.is_err());
    }

    #[test]
    fn sweep_metric_uses_kebab_case_names() {
        let cli = Cli::try_parse_from(["bsd", "sweep", "--metric", "net-interest-margin"]).unwrap();
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep subcommand");
        };
        assert_eq!(args.metric, MetricKind::NetInterestMargin);
        assert_eq!(args.points, 15);
    }

    #[test]
    fn grid_point_counts_are_bounded_at_parse_time() {
        for bad in ["0", "1", "10002", "18446744073709551615"] {
            let err = Cli::try_parse_from(["bsd", "sweep", "--points", bad]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{bad}");
        }
        assert!(Cli::try_parse_from(["bsd", "tui", "--chart-points", "99999"]).is_err());

        let cli = Cli::try_parse_from(["bsd", "sweep", "--points", "10001"]).unwrap();
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep subcommand");
        };
        assert_eq!(args.points, MAX_SWEEP_POINTS);
    }
}
