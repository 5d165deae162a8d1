//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the assessment pipeline
//! - prints reports or hands off to the TUI
//! - writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{Command, OutputFormat, ScoreArgs, ShowArgs, SweepArgs, TuiArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bsd` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` values feed clap's `env = ...` fallbacks, so load them first.
    dotenvy::dotenv().ok();

    // We want `bsd` and `bsd -b Acme` to behave like `bsd tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Score(args) => {
            crate::logging::init_stderr();
            handle_score(args)
        }
        Command::Sweep(args) => {
            crate::logging::init_stderr();
            handle_sweep(args)
        }
        Command::Show(args) => {
            crate::logging::init_stderr();
            handle_show(args)
        }
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = args.metrics.to_config();
    let assessment = pipeline::assess(&config)?;

    match args.format {
        OutputFormat::Text => {
            // Clamped inputs are reported by the pipeline's `warn!` on stderr.
            println!(
                "{}",
                crate::report::format_assessment(
                    &assessment.bank_name,
                    &assessment.metrics,
                    &assessment.result,
                    &assessment.recommendation,
                )
            );
        }
        OutputFormat::Json => {
            let record = crate::io::AssessmentFile::from_assessment(&assessment, chrono::Utc::now());
            let json = serde_json::to_string_pretty(&record)
                .map_err(|e| AppError::runtime(format!("Failed to encode assessment JSON: {e}")))?;
            println!("{json}");
        }
    }

    if let Some(path) = &args.export {
        crate::io::write_assessment_json(path, &assessment)?;
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = args.metrics.to_config();
    let assessment = pipeline::assess(&config)?;
    let sweep = crate::scoring::sensitivity(&assessment.metrics, args.metric, args.points);
    println!("{}", crate::report::format_sensitivity(&sweep));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let record = crate::io::read_assessment_json(&args.report)?;
    info!(generated_at = %record.generated_at, "loaded assessment");

    println!("Generated: {}", record.generated_at.to_rfc3339());
    println!(
        "{}",
        crate::report::format_assessment(
            &record.bank_name,
            &record.metrics,
            &record.result,
            &record.recommendation,
        )
    );
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::logging::init_file(args.log_file.as_deref())?;

    // Same rejection and clamping as `score`, before the terminal is taken over.
    let mut config = args.metrics.to_config();
    let (metrics, adjustments) = pipeline::validate_inputs(&config.metrics)?;
    config.metrics = metrics;

    crate::tui::run(config, args.chart_points, &adjustments)
}

/// Rewrite argv so `bsd` defaults to `bsd tui`.
///
/// Rules:
/// - `bsd`                      -> `bsd tui`
/// - `bsd -b Acme ...`          -> `bsd tui -b Acme ...`
/// - `bsd --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "score" | "sweep" | "show" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
