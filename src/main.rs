//! Fyre - Main Entry Point
//!
//! Checks pipeline documents from the command line and lists the element catalog.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fyre_pipeline::{
    config::{self, AppConfig, ReportFormat},
    document::PipelineDocument,
    pipeline::{
        CheckReport, ElementId, ElementRegistry, Pipeline, PipelineChecker, Violation,
        ViolationKind,
    },
    FyreError,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "fyre")]
#[command(author, version, about = "Type-check Fyre pipeline documents", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FYRE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Propagate types through a document and report every violation
    Check {
        /// Path to the pipeline document
        document: PathBuf,

        /// Report format (text, json); defaults to the configured format
        #[arg(short, long)]
        format: Option<ReportFormat>,

        /// Print the resolved type of every connection
        #[arg(long)]
        types: bool,
    },

    /// List the available element kinds and their pads
    Catalog,

    /// Write an example document
    New {
        /// Where to write the document
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, config_error) = load_config(cli.config.as_deref(), config::config_path())?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    let registry = ElementRegistry::new();

    match cli.command {
        Commands::Check {
            document,
            format,
            types,
        } => {
            let valid = check(&document, format, types, &config, &registry)?;
            remember(config, cli.config.as_deref(), &document);
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Catalog => {
            catalog(&registry)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::New { path, force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            PipelineDocument::example()?
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote example document to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// An explicit config file must load. A broken default file falls back to the
/// defaults and hands the error back so it can be logged once tracing is up.
fn load_config(
    explicit: Option<&Path>,
    default_path: Option<PathBuf>,
) -> Result<(AppConfig, Option<FyreError>)> {
    if let Some(path) = explicit {
        let config = AppConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        return Ok((config, None));
    }

    Ok(match default_path.map(AppConfig::load) {
        Some(Ok(config)) => (config, None),
        Some(Err(e)) => (AppConfig::default(), Some(e)),
        None => (AppConfig::default(), None),
    })
}

/// Returns whether the document is free of violations.
fn check(
    path: &Path,
    format: Option<ReportFormat>,
    show_types: bool,
    config: &AppConfig,
    registry: &ElementRegistry,
) -> Result<bool> {
    tracing::info!("Checking {}", path.display());

    let pipeline = PipelineDocument::load(path)?.into_pipeline(registry)?;
    let report = PipelineChecker::check(&pipeline);

    match format.unwrap_or(config.report.format) {
        ReportFormat::Text => print_text(
            &pipeline,
            &report,
            config.report.show_unresolved,
            show_types || config.report.show_types,
        ),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report_json(&report))?),
    }

    Ok(!report.has_violations())
}

fn element_label(pipeline: &Pipeline, id: ElementId) -> String {
    match pipeline.element(id) {
        Some(element) => match element.comment() {
            Some(comment) => format!("{} \"{}\" ({})", element.name(), comment, id),
            None => format!("{} ({})", element.name(), id),
        },
        None => id.to_string(),
    }
}

/// Where on the element a violation sits. Only type errors name an input pad.
fn violation_location(pipeline: &Pipeline, violation: &Violation) -> String {
    match violation.kind {
        ViolationKind::PadType { .. } => pipeline
            .element(violation.element)
            .and_then(|e| e.input_pad(violation.pad))
            .map(|p| format!("pad {} '{}'", violation.pad, p.name()))
            .unwrap_or_else(|| format!("pad {}", violation.pad)),
        ViolationKind::OutputArity { .. } => "outputs".to_string(),
        ViolationKind::InvalidConnection { .. } => format!("pad {}", violation.pad),
    }
}

fn print_text(pipeline: &Pipeline, report: &CheckReport, show_unresolved: bool, show_types: bool) {
    for violation in report.violations() {
        println!(
            "error: {} {}: {}",
            element_label(pipeline, violation.element),
            violation_location(pipeline, violation),
            violation.message()
        );
    }

    if show_unresolved {
        for &id in report.unresolved() {
            println!("unresolved: {}", element_label(pipeline, id));
        }
    }

    if show_types {
        for (connection, ty) in report.connection_types() {
            match ty {
                Some(ty) => println!("{}: {}", connection, ty),
                None => println!("{}: <unresolved>", connection),
            }
        }
    }

    let stats = &report.stats;
    println!(
        "{} element(s) checked of {}, {} of {} connection(s) typed, {} violation(s) in {} us",
        stats.checked_elements,
        stats.total_elements,
        stats.resolved_connections,
        stats.total_connections,
        stats.violations,
        stats.check_time_us
    );
}

fn report_json(report: &CheckReport) -> serde_json::Value {
    serde_json::json!({
        "valid": report.is_valid(),
        "violations": report.violations(),
        "unresolved": report.unresolved(),
        "connections": report
            .connection_types()
            .iter()
            .map(|(c, ty)| serde_json::json!({
                "from": c.source.to_string(),
                "to": c.sink.to_string(),
                "type": ty,
            }))
            .collect::<Vec<_>>(),
        "stats": report.stats,
    })
}

fn catalog(registry: &ElementRegistry) -> Result<()> {
    for tag in registry.tags() {
        let element = registry.create(tag, &serde_json::Value::Null)?;
        println!("{} [{}] ({})", element.name(), tag, element.category());
        for (i, pad) in element.inputs().iter().enumerate() {
            println!("  in  {}: {} - {}", i, pad.name, pad.description);
        }
        for (i, pad) in element.outputs().iter().enumerate() {
            println!("  out {}: {} - {}", i, pad.name, pad.description);
        }
    }
    Ok(())
}

/// Record the document in the recent list. Only the default config file is updated.
fn remember(mut config: AppConfig, explicit_config: Option<&Path>, document: &Path) {
    if explicit_config.is_some() {
        return;
    }
    let path = document.canonicalize().unwrap_or_else(|_| document.to_path_buf());
    config.cleanup_missing_documents();
    config.add_recent_document(path);
    if let Err(e) = config.save_default() {
        tracing::warn!("Failed to update recent documents: {}", e);
    }
}
