//! CLI entrypoint for atoss-distill
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use atoss_application::{
    BatchProgressNotifier, NoProgress, RecordSource, RunBatchInput, RunBatchUseCase,
};
use atoss_domain::Model;
use atoss_infrastructure::{
    AppendFileSink, ConfigLoader, FileConfig, JsonDataset, OpenAiCompatibleGateway,
};
use atoss_presentation::{BatchProgressReporter, Cli, ConsoleFormatter, SimpleProgress};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    info!("Starting atoss-distill");

    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Could not load .env: {}", e),
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let Some(config) = load_config(&cli) else {
        return Ok(ExitCode::from(EXIT_CONFIG));
    };

    // === Dependency Injection ===
    let dataset_path = config
        .dataset
        .path
        .as_deref()
        .context("No dataset path configured")?;
    let dataset = JsonDataset::open_with_fields(
        dataset_path,
        &config.dataset.text_field,
        &config.dataset.labels_field,
    )?;

    let api_key = config.inference.api_key();
    if api_key.is_none() {
        warn!(
            "{} is not set; requests are sent without credentials",
            config.inference.api_key_env
        );
    }
    let gateway = Arc::new(
        OpenAiCompatibleGateway::new(&config.inference.base_url, api_key)?
            .with_max_tokens(config.inference.max_tokens),
    );

    let mut sink = AppendFileSink::open(&config.batch.raw_output, &config.batch.final_output)
        .with_context(|| {
            format!(
                "Failed to open output files {} / {}",
                config.batch.raw_output.display(),
                config.batch.final_output.display()
            )
        })?;
    info!(
        "Appending raw splits to {} and selections to {}",
        sink.raw_path().display(),
        sink.final_path().display()
    );

    let cancellation = CancellationToken::new();
    spawn_interrupt_handler(cancellation.clone());

    let input = RunBatchInput::new(cli.start, cli.end.unwrap_or(dataset.len()));
    let use_case = RunBatchUseCase::new(gateway, config.split_params(), config.batch_params())
        .with_cancellation(cancellation);

    let progress: Box<dyn BatchProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(BatchProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let report = use_case
        .execute_with_progress(&dataset, &mut sink, input, progress.as_ref())
        .await?;

    println!("{}", ConsoleFormatter::render(&report, cli.report.into()));

    if report.cancelled {
        Ok(ExitCode::from(EXIT_INTERRUPTED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "atoss-distill.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            None
        }
    }
}

/// Load, override and validate configuration; `None` means exit with a config error
fn load_config(cli: &Cli) -> Option<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config
            && !path.exists()
        {
            eprintln!("Configuration error: {} does not exist", path.display());
            return None;
        }
        match ConfigLoader::load(cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return None;
            }
        }
    };

    apply_overrides(cli, &mut config);

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("Configuration error: {}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if issues.iter().any(|issue| issue.is_error()) {
        return None;
    }

    Some(config)
}

/// Command-line flags take priority over every config source
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(input) = &cli.input {
        config.dataset.path = Some(input.clone());
    }
    if let Some(path) = &cli.raw_output {
        config.batch.raw_output = path.clone();
    }
    if let Some(path) = &cli.output {
        config.batch.final_output = path.clone();
    }
    if let Some(model) = &cli.model {
        let Ok(model) = model.parse::<Model>();
        config.inference.model = model;
    }
    if let Some(cap) = cli.cap {
        config.batch.record_cap = cap;
    }
    if let Some(candidates) = cli.candidates {
        config.split.candidates = candidates;
    }
    if let Some(select) = cli.select {
        config.split.select = select;
    }
    if let Some(concurrency) = cli.concurrency {
        config.split.max_concurrency = concurrency;
    }
}

/// First Ctrl-C stops after the current record; a second one exits at once
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("Interrupt received, stopping after the current record (Ctrl-C again to abort)");
        token.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
    });
}
